pub mod projection;

pub use projection::{project, project_all, Pixel, Viewport, SCALE};

pub mod dynamics;
pub mod error;
pub mod render;
pub mod sim;

pub use error::{Error, Result};

pub mod types {
    pub use crate::dynamics::state::{LorenzParams, SimConfig, State, BETA, DT, RHO, SIGMA, TICK_PERIOD};
    pub use crate::render::projection::{Pixel, Viewport, SCALE};
    pub use crate::sim::trajectory::Retention;
}

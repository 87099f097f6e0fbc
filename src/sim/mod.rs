pub mod integrator;
pub mod trajectory;
pub mod runner;
pub mod clock;
pub mod summary;

pub use integrator::euler_step;
pub use trajectory::{Cursor, Retention, Snapshot, Trajectory};
pub use runner::{RunState, Simulation};
pub use clock::TickClock;
pub use summary::TrajectorySummary;

use thiserror::Error;

/// Errors raised while building a simulation or a viewport.
///
/// Stepping, projecting and reading the trajectory never fail; only the
/// configuration that feeds them is checked.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),

    #[error("parameter {name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("initial state must be finite, got ({x}, {y}, {z})")]
    NonFiniteInitialState { x: f64, y: f64, z: f64 },

    #[error("retention capacity must be at least {min}, got {got}")]
    RetentionTooSmall { min: usize, got: usize },

    #[error("tick period must be non-zero")]
    ZeroTickPeriod,

    #[error("viewport must have non-zero size, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

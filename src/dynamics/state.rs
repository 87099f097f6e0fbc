use std::time::Duration;

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::sim::trajectory::Retention;

// ---------------------------------------------------------------------------
// Classic Lorenz constants
// ---------------------------------------------------------------------------

pub const SIGMA: f64 = 10.0;
pub const RHO: f64 = 28.0;
pub const BETA: f64 = 8.0 / 3.0;
pub const DT: f64 = 0.01; // s, fixed Euler step
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Phase-space state
// ---------------------------------------------------------------------------

/// A point (x, y, z) in Lorenz phase space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub pos: Vector3<f64>,
}

impl State {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { pos: Vector3::new(x, y, z) }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn z(&self) -> f64 {
        self.pos.z
    }

    /// Advance state by a derivative scaled by dt.
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State { pos: self.pos + d.dpos * dt }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().all(|c| c.is_finite())
    }
}

impl Default for State {
    /// Starting point of every run: (0.1, 0, 0).
    fn default() -> Self {
        State::new(0.1, 0.0, 0.0)
    }
}

/// Time derivative of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deriv {
    pub dpos: Vector3<f64>,
}

// ---------------------------------------------------------------------------
// System parameters
// ---------------------------------------------------------------------------

/// σ (Prandtl), ρ (Rayleigh), β (geometry). Chaotic at the defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self { sigma: SIGMA, rho: RHO, beta: BETA }
    }
}

impl LorenzParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("sigma", self.sigma), ("rho", self.rho), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(Error::NonFiniteParameter { name, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub params: LorenzParams,
    pub dt: f64,
    pub initial: State,
    pub retention: Retention,
    pub tick_period: Duration, // cadence the driver is expected to use
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            params: LorenzParams::default(),
            dt: DT,
            initial: State::default(),
            retention: Retention::Unbounded,
            tick_period: TICK_PERIOD,
        }
    }
}

impl SimConfig {
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::InvalidTimeStep(self.dt));
        }
        if !self.initial.is_finite() {
            return Err(Error::NonFiniteInitialState {
                x: self.initial.x(),
                y: self.initial.y(),
                z: self.initial.z(),
            });
        }
        if self.tick_period.is_zero() {
            return Err(Error::ZeroTickPeriod);
        }
        self.retention.validate()
    }
}

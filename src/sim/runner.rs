use log::{info, warn};

use crate::dynamics::state::{LorenzParams, SimConfig, State};
use crate::error::Result;
use crate::render::projection::{self, Pixel, Viewport};
use super::integrator::euler_step;
use super::trajectory::{Cursor, Snapshot, Trajectory};

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// A Lorenz run: current state, accumulated trajectory and start/stop state.
///
/// Owns no timer. The caller invokes [`Simulation::tick`] (or
/// [`Simulation::advance`] directly) at whatever cadence it chooses, on a
/// single thread. Sharing across threads needs an external lock around the
/// whole value.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: LorenzParams,
    dt: f64,
    current: State,
    trajectory: Trajectory,
    run_state: RunState,
    diverged: bool,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &SimConfig) -> Self {
        Self {
            params: config.params,
            dt: config.dt,
            current: config.initial,
            trajectory: Trajectory::new(config.retention),
            run_state: RunState::Stopped,
            diverged: false,
        }
    }

    pub fn params(&self) -> &LorenzParams {
        &self.params
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Most recently integrated state (the initial state before any step).
    pub fn state(&self) -> &State {
        &self.current
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Enter `Running`. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.run_state = RunState::Running;
        info!(
            "simulation started at step {} ({:.3}, {:.3}, {:.3})",
            self.steps(),
            self.current.x(),
            self.current.y(),
            self.current.z()
        );
        true
    }

    /// Enter `Stopped`. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.run_state = RunState::Stopped;
        info!("simulation stopped after {} steps", self.steps());
        true
    }

    /// Integrate one step and append the result, regardless of run state.
    pub fn advance(&mut self) -> &State {
        let next = euler_step(&self.current, &self.params, self.dt);
        if !self.diverged && !next.is_finite() {
            self.diverged = true;
            warn!(
                "state became non-finite at step {}; fixed-step Euler has diverged",
                self.steps() + 1
            );
        }
        self.current = next;
        self.trajectory.push(next);
        &self.current
    }

    /// One driver tick: advances only while `Running`.
    pub fn tick(&mut self) -> Option<&State> {
        if self.is_running() {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Total steps integrated since construction.
    pub fn steps(&self) -> u64 {
        self.trajectory.total_appended()
    }

    pub fn has_diverged(&self) -> bool {
        self.diverged
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.trajectory.snapshot()
    }

    pub fn points_since(
        &self,
        cursor: Cursor,
    ) -> (impl DoubleEndedIterator<Item = &State> + ExactSizeIterator + '_, Cursor) {
        self.trajectory.points_since(cursor)
    }

    pub fn project(&self, state: &State, viewport: Viewport) -> Pixel {
        projection::project(state, viewport)
    }

    /// Every retained state projected onto `viewport`, oldest first.
    pub fn projected(&self, viewport: Viewport) -> impl Iterator<Item = Pixel> + '_ {
        projection::project_all(self.trajectory.snapshot().iter(), viewport)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_valid(&SimConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

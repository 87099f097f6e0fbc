use crate::dynamics;
use crate::dynamics::state::{LorenzParams, State};

// ---------------------------------------------------------------------------
// Explicit (forward) Euler, fixed step
// ---------------------------------------------------------------------------

/// Single Euler step: `state + f(state) * dt`.
///
/// Pure and deterministic. Non-finite values are propagated, not rejected.
pub fn euler_step(state: &State, params: &LorenzParams, dt: f64) -> State {
    let k = dynamics::derivatives(state, params);
    state.apply(&k, dt)
}

pub mod state;

use nalgebra::Vector3;

use self::state::{Deriv, LorenzParams, State};

// ---------------------------------------------------------------------------
// Lorenz equations
// ---------------------------------------------------------------------------

/// Compute state derivatives for a given state and parameter set.
///
///   dx/dt = σ(y - x)
///   dy/dt = x(ρ - z) - y
///   dz/dt = xy - βz
pub fn derivatives(state: &State, params: &LorenzParams) -> Deriv {
    let (x, y, z) = (state.x(), state.y(), state.z());
    Deriv {
        dpos: Vector3::new(
            params.sigma * (y - x),
            x * (params.rho - z) - y,
            x * y - params.beta * z,
        ),
    }
}

/// Equilibria of the system: the origin, plus C+ and C- when ρ > 1.
pub fn fixed_points(params: &LorenzParams) -> Vec<State> {
    if params.rho <= 1.0 {
        return vec![State::new(0.0, 0.0, 0.0)];
    }
    let c = (params.beta * (params.rho - 1.0)).sqrt();
    vec![
        State::new(0.0, 0.0, 0.0),
        State::new(c, c, params.rho - 1.0),
        State::new(-c, -c, params.rho - 1.0),
    ]
}

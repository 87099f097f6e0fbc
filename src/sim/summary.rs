use nalgebra::Vector3;

use crate::dynamics::state::State;
use super::trajectory::Snapshot;

/// Summary statistics over the retained trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySummary {
    pub points: usize,
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
    pub final_state: State,
    pub lobe_switches: usize, // sign changes of x
    pub all_finite: bool,
}

impl TrajectorySummary {
    /// Compute summary from a snapshot. `None` for an empty trajectory.
    pub fn from_snapshot(snapshot: Snapshot<'_>) -> Option<Self> {
        let first = snapshot.first()?;
        let mut min = first.pos;
        let mut max = first.pos;
        let mut all_finite = true;
        let mut lobe_switches = 0;
        let mut last_sign = 0.0_f64;

        for s in snapshot.iter() {
            min = min.inf(&s.pos);
            max = max.sup(&s.pos);
            all_finite &= s.is_finite();

            let sign = if s.x() > 0.0 {
                1.0
            } else if s.x() < 0.0 {
                -1.0
            } else {
                0.0
            };
            if sign != 0.0 {
                if last_sign != 0.0 && sign != last_sign {
                    lobe_switches += 1;
                }
                last_sign = sign;
            }
        }

        Some(TrajectorySummary {
            points: snapshot.len(),
            min,
            max,
            final_state: *snapshot.last()?,
            lobe_switches,
            all_finite,
        })
    }

    /// Axis-aligned extent (max - min) per coordinate.
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::runner::Simulation;
    use crate::sim::trajectory::{Retention, Trajectory};

    #[test]
    fn empty_trajectory_has_no_summary() {
        let t = Trajectory::new(Retention::Unbounded);
        assert!(TrajectorySummary::from_snapshot(t.snapshot()).is_none());
    }

    #[test]
    fn bounds_and_switches_on_hand_built_path() {
        let mut t = Trajectory::default();
        for (x, y, z) in [(1.0, 2.0, 3.0), (-1.0, 5.0, 0.0), (0.0, -4.0, 1.0), (2.0, 0.0, 9.0)] {
            t.push(State::new(x, y, z));
        }
        let s = TrajectorySummary::from_snapshot(t.snapshot()).unwrap();
        assert_eq!(s.points, 4);
        assert_eq!(s.min, Vector3::new(-1.0, -4.0, 0.0));
        assert_eq!(s.max, Vector3::new(2.0, 5.0, 9.0));
        assert_eq!(s.lobe_switches, 2); // + -> - -> (0 skipped) -> +
        assert_eq!(s.final_state, State::new(2.0, 0.0, 9.0));
        assert_eq!(s.extent(), Vector3::new(3.0, 9.0, 9.0));
        assert!(s.all_finite);
    }

    #[test]
    fn chaotic_run_visits_both_lobes() {
        let mut sim = Simulation::default();
        for _ in 0..5_000 {
            sim.advance();
        }
        let s = TrajectorySummary::from_snapshot(sim.snapshot()).unwrap();
        assert_eq!(s.points, 5_000);
        assert!(s.lobe_switches > 5, "only {} lobe switches", s.lobe_switches);
        assert!(s.min.x < 0.0 && s.max.x > 0.0);
        assert!(s.all_finite);
    }
}

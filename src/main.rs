use lorenz_sim::dynamics;
use lorenz_sim::render::{project, Pixel, Viewport};
use lorenz_sim::sim::{Simulation, Snapshot, TickClock, TrajectorySummary};
use lorenz_sim::types::{Retention, SimConfig, State};
use lorenz_sim::{Error, Result};

const DEFAULT_STEPS: u64 = 5_000;
const USAGE: &str = "usage: lorenz-sim [STEPS] [--window K | --decimate K]";

const TABLE_ROWS: usize = 30;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Some((steps, retention)) = parse_args(std::env::args().skip(1))? else {
        println!("{}", USAGE);
        return Ok(());
    };
    let config = SimConfig::default().with_retention(retention);
    let mut sim = Simulation::new(&config)?;

    // -----------------------------------------------------------------------
    // Run: drive the clock with exactly one period per iteration
    // -----------------------------------------------------------------------
    let mut clock = TickClock::new(config.tick_period)?;
    sim.start();
    while sim.steps() < steps {
        clock.drive(&mut sim, config.tick_period);
    }
    sim.stop();

    let Some(summary) = TrajectorySummary::from_snapshot(sim.snapshot()) else {
        println!("No steps requested.");
        return Ok(());
    };
    let viewport = Viewport::new(800, 600)?;

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  LORENZ ATTRACTOR — explicit Euler");
    println!("====================================================================");
    println!();
    println!("  Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    let p = sim.params();
    println!(
        "  sigma = {:.4}   rho = {:.4}   beta = {:.4}   dt = {}",
        p.sigma, p.rho, p.beta, sim.dt()
    );
    println!("  Retention:     {:?}", retention);
    for fp in dynamics::fixed_points(p) {
        println!(
            "  Fixed point:   ({:>8.4}, {:>8.4}, {:>8.4})",
            fp.x(),
            fp.y(),
            fp.z()
        );
    }
    println!();

    println!("  Trajectory Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Steps:         {:>8}       Retained:     {:>8}",
        sim.steps(),
        summary.points
    );
    println!(
        "  x range:       [{:>8.3}, {:>8.3}]",
        summary.min.x, summary.max.x
    );
    println!(
        "  y range:       [{:>8.3}, {:>8.3}]",
        summary.min.y, summary.max.y
    );
    println!(
        "  z range:       [{:>8.3}, {:>8.3}]",
        summary.min.z, summary.max.z
    );
    println!("  Lobe switches: {:>8}", summary.lobe_switches);
    let fin = summary.final_state;
    println!(
        "  Final state:   ({:.4}, {:.4}, {:.4})",
        fin.x(),
        fin.y(),
        fin.z()
    );
    if !summary.all_finite {
        println!("  WARNING: trajectory contains non-finite values");
    }
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled), projected onto an 800x600 viewport
    // -----------------------------------------------------------------------
    println!("  Trajectory ({}x{} projection)", viewport.width, viewport.height);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>6}  {:>6}",
        "#", "x", "y", "z", "px", "py"
    );
    println!("  {}", "─".repeat(56));

    for row in sampled_rows(sim.snapshot(), viewport, TABLE_ROWS) {
        let (s, px) = (row.state, row.pixel);
        println!(
            "  {:>7}  {:>9.3}  {:>9.3}  {:>9.3}  {:>6}  {:>6}",
            row.step, s.x(), s.y(), s.z(), px.x, px.y
        );
    }

    println!();
    println!("====================================================================");
    println!();
    Ok(())
}

/// One line of the sampled trajectory table.
#[derive(Debug, Clone, PartialEq)]
struct Row {
    step: u64,
    state: State,
    pixel: Pixel,
}

/// Roughly `max_rows` evenly spaced retained states plus the newest one,
/// labelled with the step that produced them.
fn sampled_rows(snapshot: Snapshot<'_>, viewport: Viewport, max_rows: usize) -> Vec<Row> {
    let len = snapshot.len();
    let sample_interval = (len / max_rows.max(1)).max(1);
    snapshot
        .iter_indexed()
        .enumerate()
        .filter(|(i, _)| i % sample_interval == 0 || *i == len - 1)
        .map(|(_, (step, s))| Row {
            step,
            state: *s,
            pixel: project(s, viewport),
        })
        .collect()
}

/// `Ok(None)` means help was requested.
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Option<(u64, Retention)>> {
    let mut steps = DEFAULT_STEPS;
    let mut retention = Retention::Unbounded;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--window" | "--decimate" => {
                let k = args
                    .next()
                    .ok_or_else(|| Error::InvalidArgument(format!("{} needs a value\n{}", arg, USAGE)))?;
                let k: usize = k
                    .parse()
                    .map_err(|_| Error::InvalidArgument(format!("bad capacity '{}'\n{}", k, USAGE)))?;
                retention = if arg == "--window" {
                    Retention::Window(k)
                } else {
                    Retention::Decimate(k)
                };
            }
            "-h" | "--help" => return Ok(None),
            other => {
                steps = other
                    .parse()
                    .map_err(|_| Error::InvalidArgument(format!("bad step count '{}'\n{}", other, USAGE)))?;
            }
        }
    }

    Ok(Some((steps, retention)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_without_arguments() {
        assert_eq!(parse_args(args(&[])).unwrap(), Some((DEFAULT_STEPS, Retention::Unbounded)));
    }

    #[test]
    fn parses_steps_and_retention() {
        assert_eq!(
            parse_args(args(&["1200", "--window", "300"])).unwrap(),
            Some((1200, Retention::Window(300)))
        );
        assert_eq!(
            parse_args(args(&["--decimate", "64"])).unwrap(),
            Some((DEFAULT_STEPS, Retention::Decimate(64)))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_args(args(&["lots"])).is_err());
        assert!(parse_args(args(&["--window"])).is_err());
        assert!(parse_args(args(&["--window", "-3"])).is_err());
    }

    #[test]
    fn help_is_not_an_error() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
        assert_eq!(parse_args(args(&["500", "-h"])).unwrap(), None);
    }

    #[test]
    fn parse_errors_display_usage() {
        let err = parse_args(args(&["lots"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid argument: bad step count 'lots'"), "{}", msg);
        assert!(msg.ends_with(USAGE), "{}", msg);
    }

    #[test]
    fn table_rows_carry_step_numbers_under_window() {
        let config = SimConfig::default().with_retention(Retention::Window(300));
        let mut sim = Simulation::new(&config).unwrap();
        for _ in 0..1_200 {
            sim.advance();
        }
        let viewport = Viewport::new(800, 600).unwrap();
        let rows = sampled_rows(sim.snapshot(), viewport, 30);

        let steps: Vec<u64> = rows.iter().map(|r| r.step).collect();
        let mut expected: Vec<u64> = (0..30).map(|k| 901 + 10 * k).collect();
        expected.push(1_200);
        assert_eq!(steps, expected);

        let last = rows.last().unwrap();
        assert_eq!(last.state, *sim.state());
        assert_eq!(last.pixel, project(sim.state(), viewport));
    }

    #[test]
    fn table_rows_start_at_step_one_when_unbounded() {
        let mut sim = Simulation::default();
        for _ in 0..10 {
            sim.advance();
        }
        let rows = sampled_rows(sim.snapshot(), Viewport::new(800, 600).unwrap(), 30);
        assert_eq!(rows.iter().map(|r| r.step).collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
    }
}

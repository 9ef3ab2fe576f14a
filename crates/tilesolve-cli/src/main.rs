//! # tilesolve
//!
//! Command line solver for sliding-tile puzzles.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tilesolve_core::{Board, HeuristicKind, Move, SolveError};
use tilesolve_planner::{AStarPlanner, Planner, PlannerConfig};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod report;

use cli::{Cli, Command, Format};

/// Moves that scramble the solved 3x3 board into the demo goal.
const DEMO_MOVES: &str = "r r d l u l d d r r u l d r u u l d l d r r u l u";

/// Install the global tracing subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Load planner settings from a JSON file.
fn load_config(path: &Path) -> anyhow::Result<PlannerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = PlannerConfig::from_json(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

/// Fail fast when the parity check rules the goal out, instead of letting
/// the search exhaust the whole reachable half of the state space.
fn ensure_reachable(start: &Board, goal: &Board) -> tilesolve_core::Result<()> {
    if start.is_solvable_to(goal)? {
        Ok(())
    } else {
        warn!("Goal has the wrong parity and cannot be reached from the start");
        Err(SolveError::Unreachable {
            goal: goal.to_string(),
            expanded: 0,
        })
    }
}

/// Plan from `start` to `goal` and print the result.
fn run_solve(
    start: &Board,
    goal: &Board,
    heuristic: HeuristicKind,
    config: PlannerConfig,
    format: Format,
) -> anyhow::Result<()> {
    ensure_reachable(start, goal)?;

    let planner = AStarPlanner::with_heuristic(heuristic).with_config(config);
    let plan = planner.plan(start, goal)?;

    if !planner.validate_plan(&plan, start, goal)? {
        bail!("planner produced a plan that does not reach the goal");
    }

    report::write_plan(&mut io::stdout().lock(), &plan, heuristic, format)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let base = match &cli.search.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    let config = cli.search.override_config(base);
    let heuristic: HeuristicKind = cli.search.heuristic.map(Into::into).unwrap_or_default();

    match cli.command {
        Command::Solve { start, goal } => {
            let goal = match goal {
                Some(goal) => goal,
                None => Board::solved(start.rows(), start.cols())?,
            };
            run_solve(&start, &goal, heuristic, config, cli.format)
        }
        Command::Scramble {
            rows,
            cols,
            moves,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let (board, walk) = Board::solved(rows, cols)?.scramble(moves as usize, &mut rng);
            info!("Scrambled with {} moves", walk.len());
            println!("{}", board);
            Ok(())
        }
        Command::Demo => {
            let start = Board::solved(3, 3)?;
            let moves = DEMO_MOVES
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<Move>, _>>()?;
            let goal = start.apply_all(&moves)?;
            if cli.format == Format::Text {
                println!("original number of actions:{}", moves.len());
            }
            run_solve(&start, &goal, heuristic, config, cli.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_unreachable_goal_fails_fast() {
        let start = Board::solved(3, 4).unwrap();
        let goal: Board = "2 1 3 4 / 5 6 7 8 / 9 10 11 0".parse().unwrap();

        let err = ensure_reachable(&start, &goal).unwrap_err();
        assert!(matches!(err, SolveError::Unreachable { expanded: 0, .. }));

        let err = run_solve(
            &start,
            &goal,
            HeuristicKind::Manhattan,
            PlannerConfig::default(),
            Format::Text,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SolveError>(),
            Some(SolveError::Unreachable { expanded: 0, .. })
        ));
    }

    #[test]
    fn test_reachable_goal_passes() {
        let start = Board::solved(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let (goal, _) = start.scramble(30, &mut rng);
        assert!(ensure_reachable(&start, &goal).is_ok());
    }

    #[test]
    fn test_load_config_reports_bad_json() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("tilesolve-config-{}.json", std::process::id()));
        fs::write(&path, "{\"max_expansions\": \"many\"}").unwrap();

        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(
            err.downcast_ref::<SolveError>(),
            Some(SolveError::Config(_))
        ));
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("tilesolve-config-ok-{}.json", std::process::id()));
        fs::write(&path, "{\"max_expansions\": 42}").unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.max_expansions, Some(42));
    }
}

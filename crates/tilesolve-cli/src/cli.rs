//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tilesolve_core::{Board, HeuristicKind};
use tilesolve_planner::{PlannerConfig, Relaxation};

/// Upper bound for `scramble --moves`.
pub const MAX_SCRAMBLE_MOVES: i64 = 1_000_000;

#[derive(Debug, Parser)]
#[command(name = "tilesolve", version, about = "Optimal A* planning for sliding-tile puzzles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Output format for plans.
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    pub format: Format,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find a shortest plan between two boards.
    Solve {
        /// Start board, rows separated by '/' or newlines.
        #[arg(long)]
        start: Board,

        /// Goal board. Defaults to the solved board of the same shape.
        #[arg(long)]
        goal: Option<Board>,
    },

    /// Print a board reached by a random walk from the solved board.
    Scramble {
        #[arg(long, default_value_t = 3)]
        rows: usize,

        #[arg(long, default_value_t = 3)]
        cols: usize,

        /// Number of random moves.
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_SCRAMBLE_MOVES))]
        moves: u32,

        /// Seed for a reproducible walk.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve the 25-move reference scramble of the solved 3x3 board.
    Demo,
}

/// Options shared by every command that runs a search.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Heuristic guiding the search.
    #[arg(long, value_enum, global = true)]
    pub heuristic: Option<HeuristicArg>,

    /// Distance relaxation rule.
    #[arg(long, value_enum, global = true)]
    pub relaxation: Option<RelaxationArg>,

    /// Stop after expanding this many states.
    #[arg(long, global = true)]
    pub max_expansions: Option<usize>,

    /// Stop after this many milliseconds.
    #[arg(long, global = true)]
    pub time_limit_ms: Option<u64>,

    /// JSON file with planner settings; flags override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    Manhattan,
    Misplaced,
    Zero,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => HeuristicKind::Manhattan,
            HeuristicArg::Misplaced => HeuristicKind::Misplaced,
            HeuristicArg::Zero => HeuristicKind::Zero,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelaxationArg {
    Improving,
    Legacy,
}

impl From<RelaxationArg> for Relaxation {
    fn from(arg: RelaxationArg) -> Self {
        match arg {
            RelaxationArg::Improving => Relaxation::Improving,
            RelaxationArg::Legacy => Relaxation::Legacy,
        }
    }
}

impl SearchArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn override_config(&self, mut config: PlannerConfig) -> PlannerConfig {
        if let Some(relaxation) = self.relaxation {
            config.relaxation = relaxation.into();
        }
        if let Some(max) = self.max_expansions {
            config.max_expansions = Some(max);
        }
        if let Some(ms) = self.time_limit_ms {
            config.max_planning_time_ms = Some(ms);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "tilesolve",
            "solve",
            "--start",
            "1 2 3 / 4 5 6 / 7 0 8",
            "--heuristic",
            "misplaced",
            "--max-expansions",
            "50",
        ])
        .unwrap();

        match cli.command {
            Command::Solve { start, goal } => {
                assert_eq!(start.blank_position(), (2, 1));
                assert!(goal.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.search.heuristic, Some(HeuristicArg::Misplaced));
        assert_eq!(cli.format, Format::Text);
    }

    #[test]
    fn test_rejects_bad_board() {
        let parsed = Cli::try_parse_from(["tilesolve", "solve", "--start", "1 1 / 2 0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_scramble_moves_are_bounded() {
        let cli = Cli::try_parse_from(["tilesolve", "scramble", "--moves", "25"]).unwrap();
        assert!(matches!(cli.command, Command::Scramble { moves: 25, .. }));

        let too_many = Cli::try_parse_from([
            "tilesolve",
            "scramble",
            "--moves",
            "18446744073709551615",
        ]);
        assert!(too_many.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "tilesolve",
            "demo",
            "--relaxation",
            "legacy",
            "--time-limit-ms",
            "250",
        ])
        .unwrap();

        let base = PlannerConfig::default().with_max_expansions(7);
        let config = cli.search.override_config(base);
        assert_eq!(config.relaxation, Relaxation::Legacy);
        assert_eq!(config.max_expansions, Some(7));
        assert_eq!(config.max_planning_time_ms, Some(250));
    }
}

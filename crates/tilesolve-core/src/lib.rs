//! # tilesolve Core
//!
//! Core primitives and types for tilesolve.
//!
//! This crate provides the fundamental building blocks:
//! - [`Board`] and [`Move`] - the sliding-tile state model
//! - [`SearchState`] - the interface the planner searches over
//! - [`Heuristic`] - pluggable distance estimates
//! - [`Plan`] - the solution trace handed back to callers
//! - [`SolveError`] - error types

pub mod board;
pub mod error;
pub mod heuristic;
pub mod plan;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use board::{Board, Move};
pub use error::{Result, SolveError};
pub use heuristic::{Heuristic, HeuristicKind, Manhattan, MisplacedTiles, Zero};
pub use plan::{Plan, PlanStep};
pub use state::SearchState;
pub use types::*;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::board::{Board, Move};
    pub use crate::error::{Result, SolveError};
    pub use crate::heuristic::{Heuristic, HeuristicKind, Manhattan, MisplacedTiles, Zero};
    pub use crate::plan::{Plan, PlanStep};
    pub use crate::state::SearchState;
}

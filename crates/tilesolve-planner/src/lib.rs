//! # tilesolve Planner
//!
//! A* search engine and path reconstruction for sliding-tile puzzles.

pub mod astar;
pub mod planner;
pub mod traverse;

pub use astar::{AStarPlanner, SearchResult};
pub use planner::{Planner, PlannerConfig, Relaxation};
pub use traverse::{traverse, PredecessorMap};

use tilesolve_core::{Heuristic, Manhattan, Plan, Result, SearchState};

/// Solve with the Manhattan heuristic and the default configuration.
pub fn solve<S>(start: &S, goal: &S) -> Result<Plan<S>>
where
    S: SearchState,
    Manhattan: Heuristic<S>,
{
    solve_with(start, goal, Manhattan)
}

/// Solve with a custom heuristic and the default configuration.
pub fn solve_with<S, H>(start: &S, goal: &S, heuristic: H) -> Result<Plan<S>>
where
    S: SearchState,
    H: Heuristic<S>,
{
    AStarPlanner::with_heuristic(heuristic).plan(start, goal)
}

//! Distance estimates used to guide the search.

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Estimate of the remaining cost from a state to the goal.
///
/// The search returns optimal plans only when the estimate never exceeds
/// the true remaining number of moves.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S, goal: &S) -> u32;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S, &S) -> u32,
{
    fn estimate(&self, state: &S, goal: &S) -> u32 {
        self(state, goal)
    }
}

/// Sum of tile grid distances to their goal positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic<Board> for Manhattan {
    fn estimate(&self, state: &Board, goal: &Board) -> u32 {
        state.manhattan_distance(goal)
    }
}

/// Count of tiles not on their goal position.
#[derive(Debug, Clone, Copy, Default)]
pub struct MisplacedTiles;

impl Heuristic<Board> for MisplacedTiles {
    fn estimate(&self, state: &Board, goal: &Board) -> u32 {
        state.misplaced_tiles(goal)
    }
}

/// Always zero, which turns the search into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;

impl<S> Heuristic<S> for Zero {
    fn estimate(&self, _state: &S, _goal: &S) -> u32 {
        0
    }
}

/// Board heuristic selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Misplaced,
    Zero,
}

impl Heuristic<Board> for HeuristicKind {
    fn estimate(&self, state: &Board, goal: &Board) -> u32 {
        match self {
            HeuristicKind::Manhattan => Manhattan.estimate(state, goal),
            HeuristicKind::Misplaced => MisplacedTiles.estimate(state, goal),
            HeuristicKind::Zero => Zero.estimate(state, goal),
        }
    }
}

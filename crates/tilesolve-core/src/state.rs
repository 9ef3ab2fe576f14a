//! The state abstraction the planner searches over.

use std::fmt;
use std::hash::Hash;

/// A node in the search space.
///
/// States are immutable values: applying an action returns a new state and
/// leaves `self` untouched. Two states that compare equal must produce the
/// same [`key`](SearchState::key).
pub trait SearchState: Clone + Eq + fmt::Display {
    /// Symbolic label of a legal move.
    type Action: Copy + Eq + fmt::Debug + fmt::Display;

    /// Canonical hashable encoding used by the search bookkeeping.
    type Key: Hash + Eq + Clone;

    /// Canonical key for this state.
    fn key(&self) -> Self::Key;

    /// Actions available from this state, in a fixed order.
    fn actions(&self) -> Vec<Self::Action>;

    /// Apply an action, returning `None` if it is not legal here.
    fn apply(&self, action: Self::Action) -> Option<Self>;
}

//! Error types for tilesolve.

use thiserror::Error;

/// Main error type for tilesolve operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A board could not be constructed from the given tiles or text.
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// A move was applied that would slide a tile off the board.
    #[error("Illegal move '{action}' for board:\n{state}")]
    IllegalMove { action: String, state: String },

    /// Start and goal boards do not have the same shape.
    #[error("Dimension mismatch: start is {start}, goal is {goal}")]
    DimensionMismatch { start: String, goal: String },

    /// The search exhausted the reachable space without meeting the goal.
    #[error("Goal is unreachable after expanding {expanded} states:\n{goal}")]
    Unreachable { goal: String, expanded: usize },

    /// A configured search limit stopped the search early.
    #[error("Search limit exceeded ({limit}) after expanding {expanded} states")]
    LimitExceeded { limit: String, expanded: usize },

    /// Path reconstruction found a state with no predecessor entry.
    #[error("No predecessor recorded for state:\n{state}")]
    MissingPredecessor { state: String },

    /// No action reproduces a recorded predecessor transition.
    #[error("Inconsistent transition, no action leads from\n{from}\nto\n{to}")]
    InconsistentTransition { from: String, to: String },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SolveError {
    /// Returns true if this error reports a broken internal invariant
    /// rather than a problem with the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SolveError::MissingPredecessor { .. } | SolveError::InconsistentTransition { .. }
        )
    }
}

/// Convenience Result type for tilesolve operations.
pub type Result<T> = std::result::Result<T, SolveError>;

impl From<serde_json::Error> for SolveError {
    fn from(err: serde_json::Error) -> Self {
        SolveError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_classification() {
        let err = SolveError::InconsistentTransition {
            from: "a".to_string(),
            to: "b".to_string(),
        };
        assert!(err.is_internal());

        let err = SolveError::Unreachable {
            goal: "g".to_string(),
            expanded: 3,
        };
        assert!(!err.is_internal());
    }

    #[test]
    fn test_from_serde_json() {
        let err: SolveError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SolveError::Config(_)));
    }
}

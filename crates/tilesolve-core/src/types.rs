//! Common types shared by the planner and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a search invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The goal was popped from the open set.
    Reached,
    /// The open set ran empty without meeting the goal.
    Exhausted,
    /// A configured expansion or time limit stopped the search.
    LimitExceeded,
}

impl SearchStatus {
    /// Returns true if the goal was found.
    pub fn is_reached(&self) -> bool {
        matches!(self, SearchStatus::Reached)
    }
}

/// A search limit that stopped a search, with its configured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLimit {
    /// Expansion cap.
    Expansions(usize),
    /// Wall-clock deadline in milliseconds.
    TimeMs(u64),
}

impl fmt::Display for SearchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLimit::Expansions(max) => write!(f, "max_expansions = {}", max),
            SearchLimit::TimeMs(max) => write!(f, "max_planning_time_ms = {}", max),
        }
    }
}

/// Counters collected during one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// States whose neighbors were generated.
    pub expanded: usize,
    /// Entries pushed onto the open set, the start included.
    pub generated: usize,
    /// Wall-clock time spent searching.
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reached() {
        assert!(SearchStatus::Reached.is_reached());
        assert!(!SearchStatus::Exhausted.is_reached());
        assert!(!SearchStatus::LimitExceeded.is_reached());
    }

    #[test]
    fn test_limit_display() {
        assert_eq!(SearchLimit::Expansions(10).to_string(), "max_expansions = 10");
        assert_eq!(SearchLimit::TimeMs(250).to_string(), "max_planning_time_ms = 250");
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&SearchStatus::LimitExceeded).unwrap();
        assert_eq!(json, "\"limit_exceeded\"");
    }
}

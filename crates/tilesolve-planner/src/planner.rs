//! Planner trait and configuration.

use serde::{Deserialize, Serialize};
use tilesolve_core::{Plan, Result, SearchState};

/// Rule deciding when a newly found path replaces a neighbor's recorded
/// distance and predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relaxation {
    /// Replace when the candidate distance is strictly smaller.
    #[default]
    Improving,
    /// Replace when the recorded distance is strictly smaller than the
    /// candidate. Reproduces the behavior of the reference solver, whose
    /// plans are valid but not always shortest.
    Legacy,
}

impl Relaxation {
    /// Whether `candidate` should replace the `recorded` distance.
    pub fn accepts(self, recorded: Option<u32>, candidate: u32) -> bool {
        match (self, recorded) {
            (_, None) => true,
            (Relaxation::Improving, Some(recorded)) => candidate < recorded,
            (Relaxation::Legacy, Some(recorded)) => recorded < candidate,
        }
    }
}

/// Configuration for the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Maximum number of states to expand, unbounded when `None`.
    pub max_expansions: Option<usize>,

    /// Maximum planning time in milliseconds, unbounded when `None`.
    pub max_planning_time_ms: Option<u64>,

    /// Distance relaxation rule.
    pub relaxation: Relaxation,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_planning_time_ms: None,
            relaxation: Relaxation::Improving,
        }
    }
}

impl PlannerConfig {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the expansion cap.
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    /// Set the wall-clock deadline.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.max_planning_time_ms = Some(ms);
        self
    }

    /// Set the relaxation rule.
    pub fn with_relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }
}

/// Trait for planning engines.
pub trait Planner<S: SearchState> {
    /// Find a plan leading from `start` to `goal`.
    fn plan(&self, start: &S, goal: &S) -> Result<Plan<S>>;

    /// Check that replaying the plan's actions from `start` ends at `goal`.
    fn validate_plan(&self, plan: &Plan<S>, start: &S, goal: &S) -> Result<bool>;

    /// Get the planner configuration.
    fn config(&self) -> &PlannerConfig;

    /// Update the planner configuration.
    fn set_config(&mut self, config: PlannerConfig);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxation_rules() {
        assert!(Relaxation::Improving.accepts(None, 4));
        assert!(Relaxation::Improving.accepts(Some(5), 4));
        assert!(!Relaxation::Improving.accepts(Some(4), 4));
        assert!(!Relaxation::Improving.accepts(Some(3), 4));

        assert!(Relaxation::Legacy.accepts(None, 4));
        assert!(Relaxation::Legacy.accepts(Some(3), 4));
        assert!(!Relaxation::Legacy.accepts(Some(4), 4));
        assert!(!Relaxation::Legacy.accepts(Some(5), 4));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"relaxation": "legacy", "max_expansions": 10}"#).unwrap();
        assert_eq!(config.relaxation, Relaxation::Legacy);
        assert_eq!(config.max_expansions, Some(10));
        assert_eq!(config.max_planning_time_ms, None);

        let empty: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PlannerConfig::default());
    }

    #[test]
    fn test_config_from_json() {
        let config = PlannerConfig::from_json(r#"{"max_planning_time_ms": 500}"#).unwrap();
        assert_eq!(config.max_planning_time_ms, Some(500));

        let err = PlannerConfig::from_json(r#"{"relaxation": "sideways"}"#).unwrap_err();
        assert!(matches!(err, tilesolve_core::SolveError::Config(_)));
    }

    #[test]
    fn test_config_builders() {
        let config = PlannerConfig::default()
            .with_max_expansions(5)
            .with_time_limit_ms(100)
            .with_relaxation(Relaxation::Legacy);
        assert_eq!(config.max_expansions, Some(5));
        assert_eq!(config.max_planning_time_ms, Some(100));
        assert_eq!(config.relaxation, Relaxation::Legacy);
    }
}

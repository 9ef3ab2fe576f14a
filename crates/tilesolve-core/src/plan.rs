//! Solution traces produced by the planner.

use std::fmt;

use serde::Serialize;

use crate::state::SearchState;
use crate::types::SearchStats;

/// One element of a solution trace: a state and the action taken from it.
///
/// The final step carries the goal and no action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "S: Serialize, S::Action: Serialize"))]
pub struct PlanStep<S: SearchState> {
    pub state: S,
    pub action: Option<S::Action>,
}

/// A complete solution from start to goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "S: Serialize, S::Action: Serialize"))]
pub struct Plan<S: SearchState> {
    steps: Vec<PlanStep<S>>,
    stats: SearchStats,
}

impl<S: SearchState> Plan<S> {
    /// Build a plan from a trace of `(state, action)` pairs.
    pub fn new(trace: Vec<(S, Option<S::Action>)>, stats: SearchStats) -> Self {
        let steps = trace
            .into_iter()
            .map(|(state, action)| PlanStep { state, action })
            .collect();
        Self { steps, stats }
    }

    pub fn steps(&self) -> &[PlanStep<S>] {
        &self.steps
    }

    /// Number of actions in the plan.
    pub fn cost(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The actions in order, without the states.
    pub fn actions(&self) -> Vec<S::Action> {
        self.steps.iter().filter_map(|step| step.action).collect()
    }

    pub fn start(&self) -> Option<&S> {
        self.steps.first().map(|step| &step.state)
    }

    pub fn goal(&self) -> Option<&S> {
        self.steps.last().map(|step| &step.state)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<S: SearchState> fmt::Display for Plan<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "plan length {}", self.cost())?;
        for step in &self.steps {
            writeln!(f, "{}", step.state)?;
            if let Some(action) = step.action {
                writeln!(f, "apply action {}", action)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Move};

    fn two_step_plan() -> Plan<Board> {
        let start = Board::solved(2, 2).unwrap();
        let mid = start.try_apply(Move::Right).unwrap();
        let goal = mid.try_apply(Move::Down).unwrap();
        Plan::new(
            vec![
                (start, Some(Move::Right)),
                (mid, Some(Move::Down)),
                (goal, None),
            ],
            SearchStats::default(),
        )
    }

    #[test]
    fn test_plan_accessors() {
        let plan = two_step_plan();
        assert_eq!(plan.steps().len(), 3);
        assert_eq!(plan.cost(), 2);
        assert_eq!(plan.actions(), vec![Move::Right, Move::Down]);
        assert_eq!(plan.start(), Some(&Board::solved(2, 2).unwrap()));
        assert_eq!(plan.goal().unwrap().to_string(), "0 2\n1 3");
    }

    #[test]
    fn test_plan_display() {
        let text = two_step_plan().to_string();
        let expected = "plan length 2\n\
                        1 2\n3 0\napply action r\n\
                        1 2\n0 3\napply action d\n\
                        0 2\n1 3\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_plan_serialize() {
        let value = serde_json::to_value(two_step_plan()).unwrap();
        assert_eq!(value["steps"][0]["action"], "r");
        assert_eq!(value["steps"][2]["action"], serde_json::Value::Null);
        assert_eq!(value["stats"]["expanded"], 0);
    }
}

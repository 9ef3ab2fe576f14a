//! Path reconstruction from the search's predecessor map.

use std::collections::HashMap;

use tilesolve_core::{Result, SearchState, SolveError};

/// Maps each visited state's key to the state that achieved its recorded
/// distance. The start maps to `None`.
#[derive(Debug, Clone)]
pub struct PredecessorMap<S: SearchState> {
    entries: HashMap<S::Key, Option<S>>,
}

impl<S: SearchState> PredecessorMap<S> {
    /// A map holding only the start sentinel.
    pub fn new(start: &S) -> Self {
        let mut entries = HashMap::new();
        entries.insert(start.key(), None);
        Self { entries }
    }

    /// Record `predecessor` as the cause of `state`'s best distance.
    pub fn insert(&mut self, state: &S, predecessor: S) {
        self.entries.insert(state.key(), Some(predecessor));
    }

    /// `None` if `state` was never reached, `Some(None)` for the start.
    pub fn get(&self, state: &S) -> Option<Option<&S>> {
        self.entries.get(&state.key()).map(Option::as_ref)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.entries.contains_key(&state.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk the predecessor map back from `goal`, recovering the action that
/// links each consecutive pair of states.
///
/// The returned trace starts at the start state with its outgoing action
/// and ends with `(goal, None)`.
pub fn traverse<S: SearchState>(
    goal: &S,
    predecessors: &PredecessorMap<S>,
) -> Result<Vec<(S, Option<S::Action>)>> {
    let mut trace = vec![(goal.clone(), None)];
    let mut current = goal.clone();

    loop {
        let entry = predecessors
            .get(&current)
            .ok_or_else(|| SolveError::MissingPredecessor {
                state: current.to_string(),
            })?;
        let Some(previous) = entry else {
            break;
        };

        // every key is visited at most once on an acyclic chain
        if trace.len() > predecessors.len() {
            return Err(SolveError::InconsistentTransition {
                from: previous.to_string(),
                to: current.to_string(),
            });
        }

        let action = previous
            .actions()
            .into_iter()
            .find(|&action| previous.apply(action).as_ref() == Some(&current))
            .ok_or_else(|| SolveError::InconsistentTransition {
                from: previous.to_string(),
                to: current.to_string(),
            })?;

        trace.push((previous.clone(), Some(action)));
        current = previous.clone();
    }

    trace.reverse();
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilesolve_core::{Board, Move};

    #[test]
    fn test_start_is_goal() {
        let start = Board::solved(3, 3).unwrap();
        let map = PredecessorMap::new(&start);
        let trace = traverse(&start, &map).unwrap();
        assert_eq!(trace, vec![(start, None)]);
    }

    #[test]
    fn test_walks_chain_in_order() {
        let start = Board::solved(3, 3).unwrap();
        let mid = start.try_apply(Move::Right).unwrap();
        let goal = mid.try_apply(Move::Down).unwrap();

        let mut map = PredecessorMap::new(&start);
        map.insert(&mid, start.clone());
        map.insert(&goal, mid.clone());

        let trace = traverse(&goal, &map).unwrap();
        assert_eq!(
            trace,
            vec![
                (start, Some(Move::Right)),
                (mid, Some(Move::Down)),
                (goal, None),
            ]
        );
    }

    #[test]
    fn test_missing_goal_entry() {
        let start = Board::solved(3, 3).unwrap();
        let goal = start.try_apply(Move::Right).unwrap();
        let map = PredecessorMap::new(&start);

        let err = traverse(&goal, &map).unwrap_err();
        assert!(matches!(err, SolveError::MissingPredecessor { .. }));
    }

    #[test]
    fn test_inconsistent_transition() {
        let start = Board::solved(3, 3).unwrap();
        let far = start
            .apply_all(&[Move::Right, Move::Right, Move::Down])
            .unwrap();

        let mut map = PredecessorMap::new(&start);
        map.insert(&far, start.clone());

        let err = traverse(&far, &map).unwrap_err();
        assert!(matches!(err, SolveError::InconsistentTransition { .. }));
        assert!(err.is_internal());
    }

    #[test]
    fn test_cycle_is_reported() {
        let start = Board::solved(3, 3).unwrap();
        let a = start.try_apply(Move::Right).unwrap();
        let b = a.try_apply(Move::Right).unwrap();

        let mut map = PredecessorMap::new(&start);
        map.insert(&a, b.clone());
        map.insert(&b, a.clone());

        let err = traverse(&b, &map).unwrap_err();
        assert!(matches!(err, SolveError::InconsistentTransition { .. }));
    }
}

//! A* search-based planner implementation.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use tilesolve_core::{
    Heuristic, Manhattan, Plan, Result, SearchLimit, SearchState, SearchStats, SearchStatus,
    SolveError,
};
use tracing::{debug, info, warn};

use crate::planner::{Planner, PlannerConfig};
use crate::traverse::{traverse, PredecessorMap};

/// A* search-based planner with an injected heuristic.
pub struct AStarPlanner<H = Manhattan> {
    config: PlannerConfig,
    heuristic: H,
}

/// Entry in the open set.
///
/// Ordered by priority, then by push order, so that among equal priorities
/// the entry pushed first is popped first.
struct OpenEntry<S> {
    /// f(n) = g(n) + h(n).
    priority: u32,
    /// Push counter.
    seq: u64,
    state: S,
}

impl<S> PartialEq for OpenEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<S> Eq for OpenEntry<S> {}

impl<S> Ord for OpenEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower priority = popped first)
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for OpenEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything one search invocation leaves behind.
#[derive(Debug)]
pub struct SearchResult<S: SearchState> {
    /// Predecessor of every reached state. Lacks the goal unless
    /// `status` is [`SearchStatus::Reached`].
    pub predecessors: PredecessorMap<S>,
    /// Best known distance from the start for every reached state.
    pub distances: HashMap<S::Key, u32>,
    pub status: SearchStatus,
    /// The limit that stopped the search, set with
    /// [`SearchStatus::LimitExceeded`].
    pub limit: Option<SearchLimit>,
    pub stats: SearchStats,
}

impl<S: SearchState> SearchResult<S> {
    /// Recorded distance from the start to `state`.
    pub fn distance(&self, state: &S) -> Option<u32> {
        self.distances.get(&state.key()).copied()
    }
}

impl AStarPlanner<Manhattan> {
    /// Create a new A* planner with the Manhattan heuristic and default
    /// configuration.
    pub fn new() -> Self {
        Self::with_heuristic(Manhattan)
    }
}

impl Default for AStarPlanner<Manhattan> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> AStarPlanner<H> {
    /// Create a new A* planner with a custom heuristic.
    pub fn with_heuristic(heuristic: H) -> Self {
        Self {
            config: PlannerConfig::default(),
            heuristic,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// The limit that is exhausted, if any.
    fn limit_hit(&self, expanded: usize, start_time: &Instant) -> Option<SearchLimit> {
        if let Some(max) = self.config.max_expansions {
            if expanded >= max {
                return Some(SearchLimit::Expansions(max));
            }
        }
        if let Some(max_ms) = self.config.max_planning_time_ms {
            if start_time.elapsed().as_millis() as u64 >= max_ms {
                return Some(SearchLimit::TimeMs(max_ms));
            }
        }
        None
    }

    /// Run the search from `start` towards `goal`.
    ///
    /// Never fails: an unreachable goal or a tripped limit is reported
    /// through [`SearchResult::status`], and the predecessor map is
    /// returned either way.
    pub fn search<S>(&self, start: &S, goal: &S) -> SearchResult<S>
    where
        S: SearchState,
        H: Heuristic<S>,
    {
        let start_time = Instant::now();

        let mut open_set: BinaryHeap<OpenEntry<S>> = BinaryHeap::new();
        let mut closed_set: HashSet<S::Key> = HashSet::new();
        let mut distances: HashMap<S::Key, u32> = HashMap::new();
        let mut predecessors = PredecessorMap::new(start);
        let mut stats = SearchStats::default();
        let mut seq: u64 = 0;

        distances.insert(start.key(), 0);
        open_set.push(OpenEntry {
            priority: self.heuristic.estimate(start, goal),
            seq,
            state: start.clone(),
        });
        stats.generated += 1;

        let mut status = SearchStatus::Exhausted;
        let mut limit = None;

        while let Some(OpenEntry { state: current, .. }) = open_set.pop() {
            let current_key = current.key();

            // Stale duplicate of a state that is already final
            if closed_set.contains(&current_key) {
                continue;
            }

            let Some(&curr_dist) = distances.get(&current_key) else {
                debug!("Popped state without a recorded distance:\n{}", current);
                continue;
            };

            if current == *goal {
                status = SearchStatus::Reached;
                break;
            }

            if let Some(hit) = self.limit_hit(stats.expanded, &start_time) {
                warn!(
                    "A* stopped by {} after expanding {} states",
                    hit, stats.expanded
                );
                status = SearchStatus::LimitExceeded;
                limit = Some(hit);
                break;
            }

            stats.expanded += 1;
            let candidate = curr_dist + 1;

            for action in current.actions() {
                let Some(neighbor) = current.apply(action) else {
                    continue;
                };
                let neighbor_key = neighbor.key();

                if closed_set.contains(&neighbor_key) {
                    continue;
                }

                let recorded = distances.get(&neighbor_key).copied();
                if self.config.relaxation.accepts(recorded, candidate) {
                    distances.insert(neighbor_key, candidate);
                    predecessors.insert(&neighbor, current.clone());
                }

                seq += 1;
                open_set.push(OpenEntry {
                    priority: self.heuristic.estimate(&neighbor, goal) + candidate,
                    seq,
                    state: neighbor,
                });
                stats.generated += 1;
            }

            closed_set.insert(current_key);
        }

        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "A* finished ({:?}): expanded {} states, generated {}, in {}ms",
            status, stats.expanded, stats.generated, stats.elapsed_ms
        );

        SearchResult {
            predecessors,
            distances,
            status,
            limit,
            stats,
        }
    }
}

impl<S, H> Planner<S> for AStarPlanner<H>
where
    S: SearchState,
    H: Heuristic<S>,
{
    fn plan(&self, start: &S, goal: &S) -> Result<Plan<S>> {
        info!("Starting A* planning towards goal:\n{}", goal);

        let result = self.search(start, goal);

        match result.status {
            SearchStatus::Reached => {
                let trace = traverse(goal, &result.predecessors)?;
                info!("A* found plan with {} actions", trace.len() - 1);
                Ok(Plan::new(trace, result.stats))
            }
            SearchStatus::Exhausted => Err(SolveError::Unreachable {
                goal: goal.to_string(),
                expanded: result.stats.expanded,
            }),
            SearchStatus::LimitExceeded => Err(SolveError::LimitExceeded {
                limit: result
                    .limit
                    .map(|limit| limit.to_string())
                    .unwrap_or_else(|| "unknown limit".to_string()),
                expanded: result.stats.expanded,
            }),
        }
    }

    fn validate_plan(&self, plan: &Plan<S>, start: &S, goal: &S) -> Result<bool> {
        let Some((last, body)) = plan.steps().split_last() else {
            return Ok(false);
        };
        let mut state = start.clone();

        for step in body {
            if step.state != state {
                debug!("Plan step does not match replayed state:\n{}", state);
                return Ok(false);
            }
            let Some(action) = step.action else {
                debug!("Plan step without an action before the goal");
                return Ok(false);
            };
            match state.apply(action) {
                Some(next) => state = next,
                None => {
                    debug!("Illegal action {} in plan validation", action);
                    return Ok(false);
                }
            }
        }

        Ok(last.action.is_none() && last.state == state && state == *goal)
    }

    fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
    }
}

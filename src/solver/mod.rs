//! Anytime branch-and-bound search for the precedence-constrained TSP.
//!
//! The search explores permutations of the reduced graph's vertices
//! depth-first, starting and ending at vertex 0, and prunes any partial
//! path whose cost plus a lower bound cannot beat the best circuit found so
//! far. It is *anytime*: every improvement is reported as soon as it is
//! found, and the caller can stop the search at a deadline or through a
//! shared stop flag while keeping the best result so far.
//!
//! The bound and candidate-generation policies are injected as a
//! [`Strategy`] pair, so "swap one policy, keep the other" needs no
//! inheritance: [`Strategy::exhaustive`] solves plain TSP instances, while
//! [`Strategy::precedence`] adds the pickup-before-delivery filter and a
//! stronger bound.

mod bounds;
mod candidates;

pub use bounds::{cheapest_arc_bound, zero_bound};
pub use candidates::{precedence_candidates, sequential_candidates};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::reduction::ReducedGraph;

/// Read-only view of the search state handed to bound and candidate
/// functions.
pub struct SearchView<'a> {
    /// The reduced cost graph being searched.
    pub graph: &'a ReducedGraph,
    /// Vertex at the end of the current partial path.
    pub current: usize,
    /// Visited flag per vertex; vertex 0 is always visited.
    pub visited: &'a [bool],
}

/// A pair of injected search policies: a lower-bound function and a
/// candidate-generation function.
pub struct Strategy {
    bound: Box<dyn Fn(&SearchView<'_>) -> f64 + Send + Sync>,
    candidates: Box<dyn Fn(&SearchView<'_>) -> Vec<usize> + Send + Sync>,
}

impl Strategy {
    /// Builds a strategy from arbitrary policies.
    pub fn new(
        bound: impl Fn(&SearchView<'_>) -> f64 + Send + Sync + 'static,
        candidates: impl Fn(&SearchView<'_>) -> Vec<usize> + Send + Sync + 'static,
    ) -> Self {
        Self {
            bound: Box::new(bound),
            candidates: Box::new(candidates),
        }
    }

    /// Zero bound with sequential candidates: correct for any instance,
    /// weakest pruning.
    pub fn exhaustive() -> Self {
        Self::new(zero_bound, sequential_candidates)
    }

    /// Cheapest-arc bound with precedence-aware candidates: the pair used
    /// for pickup-and-delivery instances.
    pub fn precedence() -> Self {
        Self::new(cheapest_arc_bound, precedence_candidates)
    }

    /// Lower bound on the cost to complete the tour from this state.
    pub fn bound(&self, view: &SearchView<'_>) -> f64 {
        (self.bound)(view)
    }

    /// Next vertices to branch on, in stable order.
    pub fn candidates(&self, view: &SearchView<'_>) -> Vec<usize> {
        (self.candidates)(view)
    }
}

/// Cooperative cancellation handle shared with the thread driving the
/// search.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Creates a handle in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a cooperative stop; polled at each search recursion entry.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Time budget and stop flag for one search run.
///
/// # Examples
///
/// ```
/// use pd_routing::solver::SearchControl;
///
/// let control = SearchControl::with_time_limit_ms(500);
/// let handle = control.stop_handle();
/// assert!(!handle.is_stopped());
/// handle.stop(); // e.g. from a UI thread
/// assert!(handle.is_stopped());
/// ```
#[derive(Debug, Clone)]
pub struct SearchControl {
    time_limit: Duration,
    stop: StopHandle,
}

impl SearchControl {
    /// Creates a control with the given time budget.
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit,
            stop: StopHandle::new(),
        }
    }

    /// Creates a control with a time budget in milliseconds. A zero budget
    /// yields no search at all.
    pub fn with_time_limit_ms(millis: u64) -> Self {
        Self::with_time_limit(Duration::from_millis(millis))
    }

    /// The time budget.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// A clonable handle for requesting a cooperative stop.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

/// Result of a search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best circuit found (vertex order starting at 0) and its total cost.
    pub best: Option<(Vec<usize>, f64)>,
    /// `true` when the search space was fully explored (the result is
    /// proved optimal, or proved infeasible when `best` is `None`); `false`
    /// after a deadline or requested stop.
    pub exhausted: bool,
}

/// Searches for the cheapest Hamiltonian circuit of the reduced graph that
/// starts and ends at vertex 0.
///
/// Every strict improvement is reported through `on_improved` the moment it
/// is found, so successive reports have strictly decreasing cost. The
/// search stops cooperatively at the control's deadline or stop flag,
/// checked at each recursion entry; already-expanded branches run to their
/// natural pruning point.
pub fn search_solution(
    graph: &ReducedGraph,
    strategy: &Strategy,
    control: &SearchControl,
    on_improved: impl FnMut(&[usize], f64),
) -> SearchOutcome {
    let size = graph.size();
    if size == 0 || control.time_limit().is_zero() {
        return SearchOutcome {
            best: None,
            exhausted: false,
        };
    }

    let stop = control.stop_handle();
    let mut search = Search {
        graph,
        strategy,
        deadline: Instant::now() + control.time_limit(),
        stop: &stop,
        best: None,
        best_cost: f64::INFINITY,
        on_improved,
        interrupted: false,
    };

    let mut path = Vec::with_capacity(size);
    path.push(0);
    let mut visited = vec![false; size];
    visited[0] = true;
    search.explore(&mut path, &mut visited, 0.0);

    let exhausted = !search.interrupted;
    let best_cost = search.best_cost;
    SearchOutcome {
        best: search.best.map(|order| (order, best_cost)),
        exhausted,
    }
}

struct Search<'a, F: FnMut(&[usize], f64)> {
    graph: &'a ReducedGraph,
    strategy: &'a Strategy,
    deadline: Instant,
    stop: &'a StopHandle,
    best: Option<Vec<usize>>,
    best_cost: f64,
    on_improved: F,
    interrupted: bool,
}

impl<F: FnMut(&[usize], f64)> Search<'_, F> {
    fn explore(&mut self, path: &mut Vec<usize>, visited: &mut [bool], cost: f64) {
        if self.interrupted {
            return;
        }
        if self.stop.is_stopped() || Instant::now() >= self.deadline {
            self.interrupted = true;
            return;
        }

        let current = path[path.len() - 1];
        if path.len() == self.graph.size() {
            if self.graph.has_arc(current, 0) {
                let total = cost + self.graph.cost(current, 0);
                // Strictly less: the first-found circuit of a given cost
                // wins, keeping results reproducible.
                if total < self.best_cost {
                    self.best_cost = total;
                    self.best = Some(path.clone());
                    debug!("improved circuit: cost {total}");
                    (self.on_improved)(path, total);
                }
            }
            return;
        }

        let view = SearchView {
            graph: self.graph,
            current,
            visited,
        };
        if cost + self.strategy.bound(&view) >= self.best_cost {
            return;
        }
        for next in self.strategy.candidates(&view) {
            visited[next] = true;
            path.push(next);
            self.explore(path, visited, cost + self.graph.cost(current, next));
            path.pop();
            visited[next] = false;
        }
    }
}

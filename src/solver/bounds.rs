//! Lower-bound functions for branch-and-bound pruning.

use super::SearchView;

/// The trivial bound: always zero.
///
/// Correct for any cost graph but prunes nothing beyond completed tours.
pub fn zero_bound(_view: &SearchView<'_>) -> f64 {
    0.0
}

/// Sums, for the current vertex and every unvisited vertex, the cheapest
/// outgoing arc into the remaining vertices or back to vertex 0.
///
/// Any completion must leave each of those vertices exactly once toward
/// that target set, so the sum is a valid lower bound. Returns
/// `f64::INFINITY` when some vertex has no such arc, in which case the
/// subtree cannot be completed at all.
pub fn cheapest_arc_bound(view: &SearchView<'_>) -> f64 {
    let size = view.graph.size();
    let mut total = 0.0;
    let remaining = (0..size).filter(|&v| !view.visited[v]);
    for v in std::iter::once(view.current).chain(remaining) {
        let mut cheapest = f64::INFINITY;
        for u in 0..size {
            let is_target = u != v && (u == 0 || !view.visited[u]);
            if is_target && view.graph.has_arc(v, u) {
                let cost = view.graph.cost(v, u);
                if cost < cheapest {
                    cheapest = cost;
                }
            }
        }
        if cheapest.is_infinite() {
            return f64::INFINITY;
        }
        total += cheapest;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::ReducedGraph;

    /// Fully connected asymmetric graph (no self arcs) with cost
    /// `10 * i + j`.
    fn full_graph(size: usize) -> ReducedGraph {
        let mut g = ReducedGraph::new(size);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    g.set_cost(i, j, (10 * i + j) as f64);
                }
            }
        }
        g
    }

    #[test]
    fn test_zero_bound() {
        let g = full_graph(3);
        let visited = vec![true, false, false];
        let view = SearchView {
            graph: &g,
            current: 0,
            visited: &visited,
        };
        assert_eq!(zero_bound(&view), 0.0);
    }

    #[test]
    fn test_cheapest_arc_bound_sums_minima() {
        let g = full_graph(3);
        let visited = vec![true, false, false];
        let view = SearchView {
            graph: &g,
            current: 0,
            visited: &visited,
        };
        // From 0: min(cost(0,1)=1, cost(0,2)=2) = 1.
        // From 1: min(cost(1,0)=10, cost(1,2)=12) = 10.
        // From 2: min(cost(2,0)=20, cost(2,1)=21) = 20.
        assert!((cheapest_arc_bound(&view) - 31.0).abs() < 1e-10);
    }

    #[test]
    fn test_cheapest_arc_bound_excludes_visited_targets() {
        let g = full_graph(4);
        // 1 already visited: arcs into it no longer count.
        let visited = vec![true, true, false, false];
        let view = SearchView {
            graph: &g,
            current: 1,
            visited: &visited,
        };
        // From current 1: min(cost(1,0)=10, cost(1,2)=12, cost(1,3)=13) = 10.
        // From 2: min(cost(2,0)=20, cost(2,3)=23) = 20.
        // From 3: min(cost(3,0)=30, cost(3,2)=32) = 30.
        assert!((cheapest_arc_bound(&view) - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_cheapest_arc_bound_dead_end_is_infinite() {
        let mut g = ReducedGraph::new(3);
        g.set_cost(0, 1, 1.0);
        g.set_cost(1, 2, 1.0);
        // Vertex 2 has no outgoing arc: no completion exists.
        let visited = vec![true, false, false];
        let view = SearchView {
            graph: &g,
            current: 0,
            visited: &visited,
        };
        assert!(cheapest_arc_bound(&view).is_infinite());
    }
}

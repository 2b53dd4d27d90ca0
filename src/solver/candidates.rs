//! Candidate-generation functions for the branch-and-bound search.

use crate::models::PointKind;

use super::SearchView;

/// Unvisited vertices reachable from the current vertex by an existing arc,
/// in ascending vertex order.
///
/// Suitable for plain TSP instances with no precedence constraint.
pub fn sequential_candidates(view: &SearchView<'_>) -> Vec<usize> {
    (0..view.graph.size())
        .filter(|&v| !view.visited[v] && view.graph.has_arc(view.current, v))
        .collect()
}

/// [`sequential_candidates`] minus deliveries whose pickup has not been
/// visited yet.
///
/// This is the runtime half of the pickup-before-delivery guarantee: the
/// reduced graph's missing arcs cover the structural cases, but only the
/// candidate filter can know whether a pickup was already visited earlier
/// in the current partial path.
pub fn precedence_candidates(view: &SearchView<'_>) -> Vec<usize> {
    (0..view.graph.size())
        .filter(|&v| {
            if view.visited[v] || !view.graph.has_arc(view.current, v) {
                return false;
            }
            match PointKind::from_vertex(v) {
                PointKind::Delivery(k) => view.visited[PointKind::Pickup(k).vertex()],
                _ => true,
            }
        })
        .collect()
}

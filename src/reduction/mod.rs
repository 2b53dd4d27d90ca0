//! Reduction of the road network to a complete cost graph over points of
//! interest.
//!
//! The reduced graph's vertices follow the [`PointKind`] numbering: vertex 0
//! is the depot, then each request's pickup and delivery. Edge costs are
//! precomputed shortest-path lengths; the pickup-before-delivery precedence
//! is encoded *structurally* by leaving four families of arcs out entirely:
//! self-loops, delivery to its own pickup, depot to any delivery, and any
//! pickup back to the depot. A generic TSP search over this topology can
//! then respect the constraint without knowing about requests.

use crate::error::PathError;
use crate::models::{PoiTable, PointKind, RoadGraph, ShortestPath};
use crate::pathfinding::shortest_paths;

/// A dense cost matrix over the points of interest, stored row-major.
///
/// An absent arc is marked with the sentinel [`ReducedGraph::ABSENT`]
/// (`-1.0`); use [`ReducedGraph::has_arc`] rather than comparing costs.
///
/// # Examples
///
/// ```
/// use pd_routing::reduction::ReducedGraph;
///
/// let mut g = ReducedGraph::new(3);
/// assert!(!g.has_arc(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedGraph {
    costs: Vec<f64>,
    size: usize,
}

impl ReducedGraph {
    /// Sentinel cost marking a structurally forbidden or irrelevant arc.
    pub const ABSENT: f64 = -1.0;

    /// Creates a reduced graph of the given size with every arc absent.
    pub fn new(size: usize) -> Self {
        Self {
            costs: vec![Self::ABSENT; size * size],
            size,
        }
    }

    /// Cost of the arc from `i` to `j`; [`Self::ABSENT`] when missing.
    pub fn cost(&self, i: usize, j: usize) -> f64 {
        self.costs[i * self.size + j]
    }

    /// Returns `true` if the arc from `i` to `j` exists.
    pub fn has_arc(&self, i: usize, j: usize) -> bool {
        self.cost(i, j) >= 0.0
    }

    /// Number of vertices (`2n + 1` for `n` requests).
    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn set_cost(&mut self, i: usize, j: usize, cost: f64) {
        debug_assert!(cost >= 0.0);
        self.costs[i * self.size + j] = cost;
    }
}

/// The realized shortest paths behind each reduced-graph arc, used to
/// stitch a vertex ordering back into a road-level tour.
#[derive(Debug, Clone)]
pub struct PoiPaths {
    paths: Vec<Option<ShortestPath>>,
    size: usize,
}

impl PoiPaths {
    fn new(size: usize) -> Self {
        Self {
            paths: vec![None; size * size],
            size,
        }
    }

    /// Path realizing the arc from vertex `i` to vertex `j`, if the arc
    /// exists.
    pub fn get(&self, i: usize, j: usize) -> Option<&ShortestPath> {
        self.paths[i * self.size + j].as_ref()
    }

    fn set(&mut self, i: usize, j: usize, path: ShortestPath) {
        self.paths[i * self.size + j] = Some(path);
    }
}

/// Structural precedence encoding: the four arc families excluded from the
/// reduced graph.
fn arc_forbidden(from: PointKind, to: PointKind) -> bool {
    if from == to {
        return true;
    }
    match (from, to) {
        // A delivery cannot be followed by its own pickup.
        (PointKind::Delivery(a), PointKind::Pickup(b)) => a == b,
        // The tour cannot open with a delivery,
        (PointKind::Depot, PointKind::Delivery(_)) => true,
        // nor close directly after an unmatched pickup.
        (PointKind::Pickup(_), PointKind::Depot) => true,
        _ => false,
    }
}

/// Builds the reduced cost graph and its realized paths for the given
/// points of interest.
///
/// Runs one restricted Dijkstra per point of interest. The caller is
/// expected to have validated reachability first; an unreachable pair
/// surfaces as [`PathError::NoPath`].
pub fn reduce(graph: &RoadGraph, pois: &PoiTable) -> Result<(ReducedGraph, PoiPaths), PathError> {
    let size = pois.len();
    let ids = pois.ids();
    let mut reduced = ReducedGraph::new(size);
    let mut paths = PoiPaths::new(size);

    for i in 0..size {
        let from_paths = shortest_paths(graph, ids[i], ids)?;
        let from = PointKind::from_vertex(i);
        for j in 0..size {
            if arc_forbidden(from, PointKind::from_vertex(j)) {
                continue;
            }
            // Same-id pairs across distinct vertices share the empty path.
            let path = &from_paths[&ids[j]];
            reduced.set_cost(i, j, path.length());
            paths.set(i, j, path.clone());
        }
    }
    Ok((reduced, paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Intersection, PlanningRequest, Request, Segment};

    /// Complete bidirectional 5-node graph over intersections 0..5 with
    /// unit-ish lengths so every pair is directly connected.
    fn dense_graph() -> RoadGraph {
        let mut segments = Vec::new();
        for a in 0..5u64 {
            for b in 0..5u64 {
                if a != b {
                    segments.push(Segment::new(a, b, 10.0 + (a * 5 + b) as f64, "s"));
                }
            }
        }
        RoadGraph::new(
            (0..5).map(|i| Intersection::new(i, 0.0, 0.0)).collect(),
            segments,
        )
    }

    fn two_request_pois() -> PoiTable {
        PoiTable::from_plan(&PlanningRequest::new(
            0,
            "8:00",
            vec![
                Request::new(1, 2, 0, 0).expect("valid"),
                Request::new(3, 4, 0, 0).expect("valid"),
            ],
        ))
    }

    #[test]
    fn test_forbidden_arcs() {
        let (reduced, _) = reduce(&dense_graph(), &two_request_pois()).expect("reachable");
        assert_eq!(reduced.size(), 5);
        for v in 0..5 {
            assert!(!reduced.has_arc(v, v), "self loop {v}");
        }
        // Depot -> deliveries (vertices 2 and 4) absent.
        assert!(!reduced.has_arc(0, 2));
        assert!(!reduced.has_arc(0, 4));
        // Pickups (1 and 3) -> depot absent.
        assert!(!reduced.has_arc(1, 0));
        assert!(!reduced.has_arc(3, 0));
        // Delivery -> own pickup absent, other pickups fine.
        assert!(!reduced.has_arc(2, 1));
        assert!(!reduced.has_arc(4, 3));
        assert!(reduced.has_arc(2, 3));
        assert!(reduced.has_arc(4, 1));
        // Depot -> pickups and deliveries -> depot present.
        assert!(reduced.has_arc(0, 1));
        assert!(reduced.has_arc(0, 3));
        assert!(reduced.has_arc(2, 0));
        assert!(reduced.has_arc(4, 0));
    }

    #[test]
    fn test_costs_are_shortest_path_lengths() {
        let g = dense_graph();
        let (reduced, paths) = reduce(&g, &two_request_pois()).expect("reachable");
        // Vertex 1 = intersection 1, vertex 2 = intersection 2: direct
        // segment length is 10 + 1*5 + 2 = 17, and no detour is cheaper.
        assert!((reduced.cost(1, 2) - 17.0).abs() < 1e-10);
        let p = paths.get(1, 2).expect("arc exists");
        assert_eq!(p.origin(), 1);
        assert_eq!(p.destination(), 2);
        assert!(p.is_contiguous());
    }

    #[test]
    fn test_absent_cost_sentinel() {
        let (reduced, paths) = reduce(&dense_graph(), &two_request_pois()).expect("reachable");
        assert_eq!(reduced.cost(1, 0), ReducedGraph::ABSENT);
        assert!(paths.get(1, 0).is_none());
    }

    #[test]
    fn test_unreachable_pair_errors() {
        // Only 0 -> 1; 1 cannot reach anything.
        let g = RoadGraph::new(
            vec![Intersection::new(0, 0.0, 0.0), Intersection::new(1, 0.0, 0.0), Intersection::new(2, 0.0, 0.0)],
            vec![Segment::new(0, 1, 1.0, "s"), Segment::new(2, 0, 1.0, "s")],
        );
        let pois = PoiTable::from_plan(&PlanningRequest::new(
            0,
            "8:00",
            vec![Request::new(1, 2, 0, 0).expect("valid")],
        ));
        assert!(matches!(reduce(&g, &pois), Err(PathError::NoPath { .. })));
    }

    #[test]
    fn test_depot_only() {
        let g = dense_graph();
        let pois = PoiTable::from_plan(&PlanningRequest::new(0, "8:00", vec![]));
        let (reduced, _) = reduce(&g, &pois).expect("trivial");
        assert_eq!(reduced.size(), 1);
        assert!(!reduced.has_arc(0, 0));
    }
}

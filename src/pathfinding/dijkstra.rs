//! Label-setting shortest-path search restricted to useful destinations.
//!
//! # Algorithm
//!
//! Classic Dijkstra over the road graph, with one pruning twist: the caller
//! names the destinations it actually needs, and the search stops as soon as
//! all of them are settled. Points of interest are a tiny subset of the
//! network, so most runs touch only a fraction of the intersections.
//!
//! Distances rely on non-negative segment lengths; path reconstruction walks
//! parent links backward from each destination.

use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::PathError;
use crate::models::{RoadGraph, Segment, ShortestPath};

/// Min-heap entry ordered by tentative distance, then by dense node index
/// for deterministic tie-breaking.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist: f64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so the std max-heap pops the smallest distance first.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes shortest paths from `origin` to every intersection in
/// `useful_destinations`.
///
/// Returns one [`ShortestPath`] per requested destination, keyed by
/// intersection id. The search terminates early once every requested
/// destination is settled. A destination equal to `origin` yields the empty
/// zero-length path.
///
/// # Errors
///
/// [`PathError::UnknownIntersection`] if `origin` or any destination is not
/// in the graph; [`PathError::NoPath`] if a destination is never settled.
pub fn shortest_paths(
    graph: &RoadGraph,
    origin: u64,
    useful_destinations: &[u64],
) -> Result<HashMap<u64, ShortestPath>, PathError> {
    let origin_idx = graph
        .index_of(origin)
        .ok_or(PathError::UnknownIntersection(origin))?;

    let mut targets: HashSet<usize> = HashSet::new();
    for &id in useful_destinations {
        let idx = graph
            .index_of(id)
            .ok_or(PathError::UnknownIntersection(id))?;
        targets.insert(idx);
    }
    let mut pending = targets.len();

    let n = graph.num_intersections();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<(usize, Segment)>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[origin_idx] = 0.0;
    heap.push(HeapEntry {
        dist: 0.0,
        node: origin_idx,
    });

    while let Some(HeapEntry { dist: d, node: u }) = heap.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;
        if targets.contains(&u) {
            pending -= 1;
            if pending == 0 {
                break;
            }
        }
        for segment in graph.at(u).outgoing() {
            let Some(v) = graph.index_of(segment.destination()) else {
                continue;
            };
            let candidate = d + segment.length();
            if candidate < dist[v] {
                dist[v] = candidate;
                parent[v] = Some((u, segment.clone()));
                heap.push(HeapEntry {
                    dist: candidate,
                    node: v,
                });
            }
        }
    }

    let mut paths = HashMap::with_capacity(useful_destinations.len());
    for &id in useful_destinations {
        let idx = graph
            .index_of(id)
            .ok_or(PathError::UnknownIntersection(id))?;
        if !settled[idx] {
            return Err(PathError::NoPath {
                origin,
                destination: id,
            });
        }
        paths.insert(id, reconstruct(origin, id, idx, origin_idx, &parent));
    }
    Ok(paths)
}

/// Shortest path between two intersections; convenience wrapper used by the
/// tour editor for local recomputation.
pub fn shortest_path_between(
    graph: &RoadGraph,
    origin: u64,
    destination: u64,
) -> Result<ShortestPath, PathError> {
    let mut paths = shortest_paths(graph, origin, &[destination])?;
    paths.remove(&destination).ok_or(PathError::NoPath {
        origin,
        destination,
    })
}

fn reconstruct(
    origin: u64,
    destination: u64,
    destination_idx: usize,
    origin_idx: usize,
    parent: &[Option<(usize, Segment)>],
) -> ShortestPath {
    let mut segments = Vec::new();
    let mut at = destination_idx;
    while at != origin_idx {
        let Some((prev, segment)) = &parent[at] else {
            // Settled vertices other than the origin always have a parent.
            debug_assert!(false, "settled vertex without parent link");
            break;
        };
        segments.push(segment.clone());
        at = *prev;
    }
    segments.reverse();
    ShortestPath::new(origin, destination, segments)
}

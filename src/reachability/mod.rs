//! Pre-flight reachability validation.
//!
//! A round trip can only visit intersections that are mutually reachable
//! with the depot, i.e. inside the depot's strongly connected component.
//! This module computes SCCs with Kosaraju's two-pass method (finish-order
//! depth-first search, then depth-first search over the transposed graph in
//! reverse finish order) and reports the points of interest that fall
//! outside the depot's component, so the caller can reject a request set
//! before any optimization effort is spent.
//!
//! Pure and reentrant; never mutates the road graph.

use std::collections::HashSet;

use log::warn;

use crate::models::RoadGraph;

/// Returns the points of interest that cannot take part in a round trip
/// from `depot`: either unreachable from it, or unable to return to it.
///
/// Input order is preserved and duplicates are reported once. Ids missing
/// from the graph (including an unknown depot, in which case every point is
/// rejected) are treated as unreachable.
pub fn unreachable_from_depot(graph: &RoadGraph, depot: u64, points: &[u64]) -> Vec<u64> {
    let Some(depot_idx) = graph.index_of(depot) else {
        warn!("depot {depot} is not in the road graph; rejecting all points");
        return dedup_in_order(points);
    };

    let (forward, transpose) = adjacency(graph);
    let order = finish_order(&forward);
    let components = assign_components(&transpose, &order);
    let depot_component = components[depot_idx];

    let mut seen = HashSet::new();
    let mut rejected = Vec::new();
    for &id in points {
        if !seen.insert(id) {
            continue;
        }
        let in_depot_scc = graph
            .index_of(id)
            .is_some_and(|idx| components[idx] == depot_component);
        if !in_depot_scc {
            rejected.push(id);
        }
    }
    if !rejected.is_empty() {
        warn!("{} point(s) not mutually reachable with depot {depot}: {rejected:?}", rejected.len());
    }
    rejected
}

fn dedup_in_order(points: &[u64]) -> Vec<u64> {
    let mut seen = HashSet::new();
    points.iter().copied().filter(|&p| seen.insert(p)).collect()
}

/// Dense forward and transposed adjacency lists.
fn adjacency(graph: &RoadGraph) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let n = graph.num_intersections();
    let mut forward = vec![Vec::new(); n];
    let mut transpose = vec![Vec::new(); n];
    for u in 0..n {
        for segment in graph.at(u).outgoing() {
            let Some(v) = graph.index_of(segment.destination()) else {
                continue;
            };
            forward[u].push(v);
            transpose[v].push(u);
        }
    }
    (forward, transpose)
}

/// First pass: vertices in increasing finish time (iterative DFS).
fn finish_order(adj: &[Vec<usize>]) -> Vec<usize> {
    let n = adj.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some(frame) = stack.last_mut() {
            let u = frame.0;
            if frame.1 < adj[u].len() {
                let v = adj[u][frame.1];
                frame.1 += 1;
                if !visited[v] {
                    visited[v] = true;
                    stack.push((v, 0));
                }
            } else {
                order.push(u);
                stack.pop();
            }
        }
    }
    order
}

/// Second pass: component ids from DFS over the transpose in reverse
/// finish order.
fn assign_components(transpose: &[Vec<usize>], order: &[usize]) -> Vec<usize> {
    let n = transpose.len();
    let mut components = vec![usize::MAX; n];
    let mut next_component = 0;
    for &root in order.iter().rev() {
        if components[root] != usize::MAX {
            continue;
        }
        components[root] = next_component;
        let mut stack = vec![root];
        while let Some(u) = stack.pop() {
            for &v in &transpose[u] {
                if components[v] == usize::MAX {
                    components[v] = next_component;
                    stack.push(v);
                }
            }
        }
        next_component += 1;
    }
    components
}

//! High-level planning facade: reachability validation and tour
//! computation.
//!
//! This is the boundary the presentation/editing layer talks to. Flow:
//! validate reachability (a hard precondition), reduce the road graph to
//! the point-of-interest cost graph, run the anytime branch-and-bound
//! search, and stitch each improving vertex order back into a road-level
//! [`Tour`]. Improvements are surfaced through a plain callback invoked on
//! the calling thread; the caller decides how to forward them to a UI.

use log::{debug, info};

use crate::error::PlanError;
use crate::models::{PlanningRequest, PoiTable, PointKind, RoadGraph, Tour};
use crate::reachability::unreachable_from_depot;
use crate::reduction::{reduce, PoiPaths};
use crate::solver::{search_solution, SearchControl, Strategy};

/// Returns the pickup/delivery points (if any) that cannot take part in a
/// round trip from the plan's depot.
///
/// Call this before [`compute_tour`]; a non-empty result means the request
/// set must be amended first.
pub fn validate_reachability(graph: &RoadGraph, plan: &PlanningRequest) -> Vec<u64> {
    let pois = PoiTable::from_plan(plan);
    unreachable_from_depot(graph, plan.depot(), &pois.ids()[1..])
}

/// Computes a minimum-length pickup-and-delivery tour.
///
/// Reports each improving tour through `on_improved` as soon as the search
/// finds it, then returns the final best. A plan with no requests yields
/// the trivial tour. A search stopped by the time limit (or the control's
/// stop handle) before finding any circuit is not an error: the trivial
/// tour is returned as the best-so-far state.
///
/// # Errors
///
/// [`PlanError::Unreachable`] when some pickup/delivery cannot take part in
/// a round trip (resolve and retry); [`PlanError::NoFeasibleCircuit`] when
/// the search space was exhausted without finding a circuit.
pub fn compute_tour(
    graph: &RoadGraph,
    plan: &PlanningRequest,
    control: &SearchControl,
    mut on_improved: impl FnMut(&Tour),
) -> Result<Tour, PlanError> {
    let rejected = validate_reachability(graph, plan);
    if !rejected.is_empty() {
        return Err(PlanError::Unreachable(rejected));
    }
    if plan.requests().is_empty() {
        return Ok(Tour::trivial(plan.depot()));
    }

    let pois = PoiTable::from_plan(plan);
    let (reduced, poi_paths) = reduce(graph, &pois)?;
    info!(
        "reduced {} intersections to {} points of interest",
        graph.num_intersections(),
        reduced.size()
    );

    let strategy = Strategy::precedence();
    let outcome = search_solution(&reduced, &strategy, control, |order, cost| {
        debug!("improved tour: length {cost}");
        if let Some(tour) = assemble(plan, &poi_paths, order) {
            on_improved(&tour);
        }
    });

    match outcome.best {
        Some((order, cost)) => {
            info!(
                "search {}: best tour length {cost}",
                if outcome.exhausted { "exhausted" } else { "stopped" }
            );
            assemble(plan, &poi_paths, &order).ok_or(PlanError::NoFeasibleCircuit)
        }
        None if outcome.exhausted => Err(PlanError::NoFeasibleCircuit),
        None => {
            info!("search stopped before finding any circuit");
            Ok(Tour::trivial(plan.depot()))
        }
    }
}

/// Stitches a reduced-graph vertex order into a road-level tour.
fn assemble(plan: &PlanningRequest, paths: &PoiPaths, order: &[usize]) -> Option<Tour> {
    let n = order.len();
    let stops: Vec<PointKind> = order.iter().map(|&v| PointKind::from_vertex(v)).collect();
    let mut tour_paths = Vec::with_capacity(n);
    for i in 0..n {
        // The solver only traverses existing arcs, so each leg has a path.
        let path = paths.get(order[i], order[(i + 1) % n])?;
        tour_paths.push(path.clone());
    }
    Some(Tour::new(
        plan.depot(),
        plan.requests().to_vec(),
        stops,
        tour_paths,
    ))
}

//! Reversible tour-editing commands.
//!
//! Each command validates fully before touching the tour (a rejected edit
//! leaves it unchanged), captures the paths it displaces while applying,
//! and restores those exact captures on inversion — so an apply/invert
//! round trip reproduces the previous tour value for value, even when the
//! road graph admits several equal-length shortest paths.

use crate::error::EditError;
use crate::models::{PointKind, Request, RoadGraph, ShortestPath, Tour};
use crate::pathfinding::shortest_path_between;

/// A tour edit that can be applied and exactly inverted.
///
/// `invert` must only be called on the tour state produced by the matching
/// `apply`; [`super::CommandLog`] guarantees that sequencing.
pub trait ReversibleCommand {
    /// Applies the edit. On error the tour is left unchanged.
    fn apply(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError>;

    /// Reverts the matching `apply`, restoring the previous tour value.
    fn invert(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError>;
}

fn stop_location(tour: &Tour, stop: PointKind) -> Result<u64, EditError> {
    tour.location_of(stop)
        .ok_or(EditError::RequestOutOfRange(stop.request_index().unwrap_or(0)))
}

/// Splices a new request's pickup and delivery into the visiting order.
///
/// Positions index the visiting sequence *after* insertion: the pickup
/// becomes stop `pickup_pos` (at least 1, the depot stays at 0) and the
/// delivery stop `delivery_pos` (strictly greater). Inserting into the
/// trivial tour requires positions 1 and 2.
pub struct InsertRequest {
    request: Request,
    pickup_pos: usize,
    delivery_pos: usize,
    snapshot: Option<InsertSnapshot>,
}

struct InsertSnapshot {
    /// Path displaced by the pickup splice; `None` when the tour was
    /// trivial.
    pickup_displaced: Option<ShortestPath>,
    delivery_displaced: ShortestPath,
}

impl InsertRequest {
    /// Creates the command; nothing is validated until `apply`.
    pub fn new(request: Request, pickup_pos: usize, delivery_pos: usize) -> Self {
        Self {
            request,
            pickup_pos,
            delivery_pos,
            snapshot: None,
        }
    }
}

impl ReversibleCommand for InsertRequest {
    fn apply(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError> {
        let len = tour.num_stops();
        let (p_pos, d_pos) = (self.pickup_pos, self.delivery_pos);
        if len == 0 {
            if p_pos != 1 {
                return Err(EditError::PositionOutOfRange(p_pos));
            }
            if d_pos != 2 {
                return Err(EditError::PositionOutOfRange(d_pos));
            }
        } else {
            if p_pos < 1 || p_pos > len {
                return Err(EditError::PositionOutOfRange(p_pos));
            }
            if d_pos <= p_pos || d_pos > len + 1 {
                return Err(EditError::PositionOutOfRange(d_pos));
            }
        }
        let pickup_addr = self.request.pickup();
        let delivery_addr = self.request.delivery();
        for addr in [pickup_addr, delivery_addr] {
            if !graph.contains(addr) {
                return Err(EditError::InvalidAddress(addr));
            }
        }

        // Neighbor locations of the pickup slot, then of the delivery slot
        // in the sequence as it will be once the pickup is in.
        let (prev_p, next_p, prev_d, next_d) = if len == 0 {
            (tour.depot(), tour.depot(), pickup_addr, tour.depot())
        } else {
            let loc_after_pickup = |i: usize| -> Result<u64, EditError> {
                if i == p_pos {
                    Ok(pickup_addr)
                } else {
                    let original = if i < p_pos { i } else { i - 1 };
                    stop_location(tour, tour.stops()[original])
                }
            };
            (
                stop_location(tour, tour.stops()[p_pos - 1])?,
                stop_location(tour, tour.stops()[p_pos % len])?,
                loc_after_pickup(d_pos - 1)?,
                loc_after_pickup(d_pos % (len + 1))?,
            )
        };

        let p_in = shortest_path_between(graph, prev_p, pickup_addr)?;
        let p_out = shortest_path_between(graph, pickup_addr, next_p)?;
        let d_in = shortest_path_between(graph, prev_d, delivery_addr)?;
        let d_out = shortest_path_between(graph, delivery_addr, next_d)?;

        let k = tour.push_request(self.request.clone());
        let pickup_displaced = tour.insert_stop(p_pos, PointKind::Pickup(k), p_in, p_out);
        let delivery_displaced = tour.insert_stop(d_pos, PointKind::Delivery(k), d_in, d_out);
        let Some(delivery_displaced) = delivery_displaced else {
            debug_assert!(false, "delivery splice always displaces a path");
            return Ok(());
        };
        self.snapshot = Some(InsertSnapshot {
            pickup_displaced,
            delivery_displaced,
        });
        debug_assert!(tour.is_consistent());
        Ok(())
    }

    fn invert(&mut self, tour: &mut Tour, _graph: &RoadGraph) -> Result<(), EditError> {
        let snapshot = self.snapshot.take().ok_or(EditError::NothingToUndo)?;
        let k = tour.requests().len() - 1;
        tour.remove_stop(self.delivery_pos, Some(snapshot.delivery_displaced));
        tour.remove_stop(self.pickup_pos, snapshot.pickup_displaced);
        tour.remove_request(k);
        debug_assert!(tour.is_consistent());
        Ok(())
    }
}

/// Removes a request's pickup and delivery stops, bridging each gap with a
/// freshly computed direct path.
pub struct RemoveRequest {
    request_index: usize,
    snapshot: Option<RemovedRequest>,
}

struct RemovedRequest {
    request: Request,
    pickup_pos: usize,
    delivery_pos: usize,
    pickup_inbound: ShortestPath,
    pickup_outbound: ShortestPath,
    delivery_inbound: ShortestPath,
    delivery_outbound: ShortestPath,
}

impl RemoveRequest {
    /// Creates the command for the request at `request_index`.
    pub fn new(request_index: usize) -> Self {
        Self {
            request_index,
            snapshot: None,
        }
    }
}

impl ReversibleCommand for RemoveRequest {
    fn apply(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError> {
        let k = self.request_index;
        if k >= tour.requests().len() {
            return Err(EditError::RequestOutOfRange(k));
        }
        let len = tour.num_stops();
        let pickup_pos = tour
            .position_of(PointKind::Pickup(k))
            .ok_or(EditError::RequestOutOfRange(k))?;
        let delivery_pos = tour
            .position_of(PointKind::Delivery(k))
            .ok_or(EditError::RequestOutOfRange(k))?;
        debug_assert!(pickup_pos < delivery_pos);

        // Bridge path over the delivery slot, in the current sequence.
        let prev_d = stop_location(tour, tour.stops()[delivery_pos - 1])?;
        let next_d = stop_location(tour, tour.stops()[(delivery_pos + 1) % len])?;
        let delivery_bridge = shortest_path_between(graph, prev_d, next_d)?;

        // Bridge over the pickup slot, in the sequence without the delivery.
        let pickup_bridge = if tour.requests().len() == 1 {
            None // the tour collapses to trivial
        } else {
            let prev_p = stop_location(tour, tour.stops()[pickup_pos - 1])?;
            let next_idx = if pickup_pos + 1 == delivery_pos {
                (delivery_pos + 1) % len
            } else {
                pickup_pos + 1
            };
            let next_p = stop_location(tour, tour.stops()[next_idx])?;
            Some(shortest_path_between(graph, prev_p, next_p)?)
        };

        let (_, delivery_inbound, delivery_outbound) =
            tour.remove_stop(delivery_pos, Some(delivery_bridge));
        let (_, pickup_inbound, pickup_outbound) = tour.remove_stop(pickup_pos, pickup_bridge);
        let request = tour.remove_request(k);
        self.snapshot = Some(RemovedRequest {
            request,
            pickup_pos,
            delivery_pos,
            pickup_inbound,
            pickup_outbound,
            delivery_inbound,
            delivery_outbound,
        });
        debug_assert!(tour.is_consistent());
        Ok(())
    }

    fn invert(&mut self, tour: &mut Tour, _graph: &RoadGraph) -> Result<(), EditError> {
        let s = self.snapshot.take().ok_or(EditError::NothingToUndo)?;
        let k = self.request_index;
        tour.insert_request(k, s.request);
        tour.insert_stop(
            s.pickup_pos,
            PointKind::Pickup(k),
            s.pickup_inbound,
            s.pickup_outbound,
        );
        tour.insert_stop(
            s.delivery_pos,
            PointKind::Delivery(k),
            s.delivery_inbound,
            s.delivery_outbound,
        );
        debug_assert!(tour.is_consistent());
        Ok(())
    }
}

/// Moves a request's pickup or delivery to a different intersection,
/// recomputing only the two adjacent paths.
pub struct ChangeAddress {
    target: PointKind,
    new_address: u64,
    snapshot: Option<AddressSnapshot>,
}

struct AddressSnapshot {
    old_address: u64,
    inbound: ShortestPath,
    outbound: ShortestPath,
}

impl ChangeAddress {
    /// Creates the command; `target` must be a pickup or delivery.
    pub fn new(target: PointKind, new_address: u64) -> Self {
        Self {
            target,
            new_address,
            snapshot: None,
        }
    }

    fn swap_address(&self, tour: &mut Tour, address: u64) -> u64 {
        match self.target {
            PointKind::Pickup(k) => {
                let old = tour.requests()[k].pickup();
                tour.request_mut(k).set_pickup(address);
                old
            }
            PointKind::Delivery(k) => {
                let old = tour.requests()[k].delivery();
                tour.request_mut(k).set_delivery(address);
                old
            }
            PointKind::Depot => unreachable!("validated in apply"),
        }
    }
}

impl ReversibleCommand for ChangeAddress {
    fn apply(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError> {
        let Some(k) = self.target.request_index() else {
            return Err(EditError::PrecedenceViolated); // the depot is fixed
        };
        if k >= tour.requests().len() {
            return Err(EditError::RequestOutOfRange(k));
        }
        if !graph.contains(self.new_address) {
            return Err(EditError::InvalidAddress(self.new_address));
        }
        let partner = self
            .target
            .partner()
            .and_then(|p| tour.location_of(p))
            .ok_or(EditError::RequestOutOfRange(k))?;
        if self.new_address == partner {
            return Err(EditError::InvalidAddress(self.new_address));
        }

        let pos = tour
            .position_of(self.target)
            .ok_or(EditError::RequestOutOfRange(k))?;
        let len = tour.num_stops();
        let prev = stop_location(tour, tour.stops()[pos - 1])?;
        let next = stop_location(tour, tour.stops()[(pos + 1) % len])?;
        let inbound = shortest_path_between(graph, prev, self.new_address)?;
        let outbound = shortest_path_between(graph, self.new_address, next)?;

        let old_address = self.swap_address(tour, self.new_address);
        let old_inbound = tour.replace_path(pos - 1, inbound);
        let old_outbound = tour.replace_path(pos, outbound);
        self.snapshot = Some(AddressSnapshot {
            old_address,
            inbound: old_inbound,
            outbound: old_outbound,
        });
        debug_assert!(tour.is_consistent());
        Ok(())
    }

    fn invert(&mut self, tour: &mut Tour, _graph: &RoadGraph) -> Result<(), EditError> {
        let s = self.snapshot.take().ok_or(EditError::NothingToUndo)?;
        let pos = tour
            .position_of(self.target)
            .ok_or(EditError::NothingToUndo)?;
        self.swap_address(tour, s.old_address);
        tour.replace_path(pos - 1, s.inbound);
        tour.replace_path(pos, s.outbound);
        debug_assert!(tour.is_consistent());
        Ok(())
    }
}

/// Changes a pickup or delivery service duration. Pure metadata: tour
/// geometry and length are untouched.
pub struct ChangeDuration {
    target: PointKind,
    seconds: u32,
    previous: Option<u32>,
}

impl ChangeDuration {
    /// Creates the command; `target` must be a pickup or delivery.
    pub fn new(target: PointKind, seconds: u32) -> Self {
        Self {
            target,
            seconds,
            previous: None,
        }
    }

    fn swap_duration(&self, tour: &mut Tour, seconds: u32) -> Result<u32, EditError> {
        match self.target {
            PointKind::Depot => Err(EditError::PrecedenceViolated),
            PointKind::Pickup(k) => {
                if k >= tour.requests().len() {
                    return Err(EditError::RequestOutOfRange(k));
                }
                let old = tour.requests()[k].pickup_duration();
                tour.request_mut(k).set_pickup_duration(seconds);
                Ok(old)
            }
            PointKind::Delivery(k) => {
                if k >= tour.requests().len() {
                    return Err(EditError::RequestOutOfRange(k));
                }
                let old = tour.requests()[k].delivery_duration();
                tour.request_mut(k).set_delivery_duration(seconds);
                Ok(old)
            }
        }
    }
}

impl ReversibleCommand for ChangeDuration {
    fn apply(&mut self, tour: &mut Tour, _graph: &RoadGraph) -> Result<(), EditError> {
        self.previous = Some(self.swap_duration(tour, self.seconds)?);
        Ok(())
    }

    fn invert(&mut self, tour: &mut Tour, _graph: &RoadGraph) -> Result<(), EditError> {
        let previous = self.previous.take().ok_or(EditError::NothingToUndo)?;
        self.swap_duration(tour, previous)?;
        Ok(())
    }
}

/// Direction of a single-slot visit move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Swap with the preceding stop.
    Earlier,
    /// Swap with the following stop.
    Later,
}

/// Swaps a stop with one of its neighbors, recomputing the (at most three)
/// affected paths.
pub struct MoveVisit {
    position: usize,
    direction: MoveDirection,
    snapshot: Option<[ShortestPath; 3]>,
}

impl MoveVisit {
    /// Creates the command for the stop at `position` in the visiting
    /// order.
    pub fn new(position: usize, direction: MoveDirection) -> Self {
        Self {
            position,
            direction,
            snapshot: None,
        }
    }

    /// Normalized swap-with-successor index.
    fn swap_index(&self, tour: &Tour) -> Result<usize, EditError> {
        let len = tour.num_stops();
        let pos = self.position;
        if pos == 0 || pos >= len {
            return Err(EditError::PositionOutOfRange(pos));
        }
        match self.direction {
            MoveDirection::Earlier if pos == 1 => Err(EditError::PrecedenceViolated),
            MoveDirection::Earlier => Ok(pos - 1),
            MoveDirection::Later if pos == len - 1 => Err(EditError::PositionOutOfRange(pos)),
            MoveDirection::Later => Ok(pos),
        }
    }
}

impl ReversibleCommand for MoveVisit {
    fn apply(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError> {
        let p = self.swap_index(tour)?;
        let len = tour.num_stops();
        let first = tour.stops()[p];
        let second = tour.stops()[p + 1];
        // The only adjacency that can break the visiting-order invariant is
        // a pickup immediately before its own delivery.
        if first.partner() == Some(second) {
            return Err(EditError::PrecedenceViolated);
        }

        let before = stop_location(tour, tour.stops()[p - 1])?;
        let x = stop_location(tour, first)?;
        let y = stop_location(tour, second)?;
        let after = stop_location(tour, tour.stops()[(p + 2) % len])?;
        let new_paths = [
            shortest_path_between(graph, before, y)?,
            shortest_path_between(graph, y, x)?,
            shortest_path_between(graph, x, after)?,
        ];
        self.snapshot = Some(tour.swap_with_next(p, new_paths));
        debug_assert!(tour.is_consistent());
        Ok(())
    }

    fn invert(&mut self, tour: &mut Tour, _graph: &RoadGraph) -> Result<(), EditError> {
        let snapshot = self.snapshot.take().ok_or(EditError::NothingToUndo)?;
        let p = self.swap_index(tour)?;
        tour.swap_with_next(p, snapshot);
        debug_assert!(tour.is_consistent());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Intersection, PlanningRequest, Segment};
    use crate::planner::compute_tour;
    use crate::solver::SearchControl;

    /// Bidirectional star over intersections 0..=5 centered on 5 (spokes:
    /// 50 inward, 63 outward), plus a one-way dead end 5 -> 6.
    fn star_graph() -> RoadGraph {
        let mut segments = Vec::new();
        for i in 0..5u64 {
            segments.push(Segment::new(i, 5, 50.0, "spoke"));
            segments.push(Segment::new(5, i, 63.0, "spoke"));
        }
        segments.push(Segment::new(5, 6, 10.0, "dead end"));
        RoadGraph::new(
            (0..7).map(|i| Intersection::new(i, 0.0, 0.0)).collect(),
            segments,
        )
    }

    fn solved_tour(graph: &RoadGraph) -> Tour {
        let plan = PlanningRequest::new(
            0,
            "8:00:00",
            vec![
                Request::new(1, 2, 300, 240).expect("valid"),
                Request::new(3, 4, 180, 120).expect("valid"),
            ],
        );
        compute_tour(graph, &plan, &SearchControl::with_time_limit_ms(10_000), |_| {})
            .expect("feasible")
    }

    #[test]
    fn test_insert_into_trivial_and_undo() {
        let graph = star_graph();
        let mut tour = Tour::trivial(0);
        let mut cmd = InsertRequest::new(Request::new(1, 2, 60, 60).expect("valid"), 1, 2);
        cmd.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour.visits(), vec![0, 1, 2]);
        assert!((tour.length() - 3.0 * 113.0).abs() < 1e-9);
        assert!(tour.is_consistent());

        cmd.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour, Tour::trivial(0));
    }

    #[test]
    fn test_insert_then_undo_restores_value() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();
        let mut cmd = InsertRequest::new(Request::new(5, 1, 0, 0).expect("valid"), 2, 4);
        cmd.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour.requests().len(), 3);
        assert_eq!(tour.num_stops(), 7);
        assert!(tour.is_consistent());
        assert_ne!(tour, before);

        cmd.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour, before);
    }

    #[test]
    fn test_insert_positions_validated() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();
        let request = Request::new(5, 1, 0, 0).expect("valid");

        let mut depot_slot = InsertRequest::new(request.clone(), 0, 2);
        assert_eq!(
            depot_slot.apply(&mut tour, &graph),
            Err(EditError::PositionOutOfRange(0))
        );
        let mut delivery_first = InsertRequest::new(request.clone(), 3, 2);
        assert_eq!(
            delivery_first.apply(&mut tour, &graph),
            Err(EditError::PositionOutOfRange(2))
        );
        let mut too_far = InsertRequest::new(request, 2, 9);
        assert_eq!(
            too_far.apply(&mut tour, &graph),
            Err(EditError::PositionOutOfRange(9))
        );
        assert_eq!(tour, before);
    }

    #[test]
    fn test_insert_unknown_address_rejected() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();
        let mut cmd = InsertRequest::new(Request::new(99, 1, 0, 0).expect("valid"), 1, 2);
        assert_eq!(
            cmd.apply(&mut tour, &graph),
            Err(EditError::InvalidAddress(99))
        );
        assert_eq!(tour, before);
    }

    #[test]
    fn test_remove_request_and_undo() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();

        let mut cmd = RemoveRequest::new(0);
        cmd.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour.requests().len(), 1);
        assert_eq!(tour.num_stops(), 3);
        // Former request 1 is now request 0.
        assert_eq!(tour.visits(), vec![0, 3, 4]);
        assert!(tour.is_consistent());

        cmd.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour, before);
    }

    #[test]
    fn test_remove_last_request_collapses_to_trivial() {
        let graph = star_graph();
        let mut tour = Tour::trivial(0);
        let mut insert = InsertRequest::new(Request::new(1, 2, 0, 0).expect("valid"), 1, 2);
        insert.apply(&mut tour, &graph).expect("applies");

        let mut remove = RemoveRequest::new(0);
        remove.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour, Tour::trivial(0));

        remove.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour.visits(), vec![0, 1, 2]);
        assert!(tour.is_consistent());
    }

    #[test]
    fn test_remove_out_of_range() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();
        let mut cmd = RemoveRequest::new(5);
        assert_eq!(
            cmd.apply(&mut tour, &graph),
            Err(EditError::RequestOutOfRange(5))
        );
        assert_eq!(tour, before);
    }

    #[test]
    fn test_change_address_and_undo() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();

        let mut cmd = ChangeAddress::new(PointKind::Pickup(0), 5);
        cmd.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour.requests()[0].pickup(), 5);
        assert_eq!(tour.visits(), vec![0, 5, 2, 3, 4]);
        // Legs 0->5 (50) and 5->2 (63) replace two 113 legs.
        assert!((tour.length() - (565.0 - 226.0 + 113.0)).abs() < 1e-9);
        assert!(tour.is_consistent());

        cmd.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour, before);
    }

    #[test]
    fn test_change_address_rejections() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();

        let mut depot = ChangeAddress::new(PointKind::Depot, 5);
        assert_eq!(
            depot.apply(&mut tour, &graph),
            Err(EditError::PrecedenceViolated)
        );
        let mut unknown = ChangeAddress::new(PointKind::Pickup(0), 99);
        assert_eq!(
            unknown.apply(&mut tour, &graph),
            Err(EditError::InvalidAddress(99))
        );
        let mut same_as_partner = ChangeAddress::new(PointKind::Pickup(0), 2);
        assert_eq!(
            same_as_partner.apply(&mut tour, &graph),
            Err(EditError::InvalidAddress(2))
        );
        let mut out_of_range = ChangeAddress::new(PointKind::Delivery(7), 5);
        assert_eq!(
            out_of_range.apply(&mut tour, &graph),
            Err(EditError::RequestOutOfRange(7))
        );
        assert_eq!(tour, before);
    }

    #[test]
    fn test_change_address_unreachable_is_atomic() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();
        // Intersection 6 can be entered but never left.
        let mut cmd = ChangeAddress::new(PointKind::Delivery(1), 6);
        assert!(matches!(
            cmd.apply(&mut tour, &graph),
            Err(EditError::Path(_))
        ));
        assert_eq!(tour, before);
    }

    #[test]
    fn test_change_duration_and_undo() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();

        let mut cmd = ChangeDuration::new(PointKind::Delivery(1), 999);
        cmd.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour.requests()[1].delivery_duration(), 999);
        assert_eq!(tour.length(), before.length());
        assert_eq!(tour.paths(), before.paths());

        cmd.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour, before);
    }

    #[test]
    fn test_move_visit_later_and_undo() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();

        // Move delivery(0) (stop 2) after pickup(1): order 0,1,3,2,4.
        let mut cmd = MoveVisit::new(2, MoveDirection::Later);
        cmd.apply(&mut tour, &graph).expect("applies");
        assert_eq!(tour.visits(), vec![0, 1, 3, 2, 4]);
        assert!(tour.is_consistent());

        cmd.invert(&mut tour, &graph).expect("inverts");
        assert_eq!(tour, before);
    }

    #[test]
    fn test_move_visit_earlier_matches_later() {
        let graph = star_graph();
        let mut later = solved_tour(&graph);
        let mut earlier = later.clone();

        MoveVisit::new(2, MoveDirection::Later)
            .apply(&mut later, &graph)
            .expect("applies");
        MoveVisit::new(3, MoveDirection::Earlier)
            .apply(&mut earlier, &graph)
            .expect("applies");
        assert_eq!(later, earlier);
    }

    #[test]
    fn test_move_visit_rejections() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let before = tour.clone();

        // Depot cannot move, nothing can move past it.
        assert_eq!(
            MoveVisit::new(0, MoveDirection::Later).apply(&mut tour, &graph),
            Err(EditError::PositionOutOfRange(0))
        );
        assert_eq!(
            MoveVisit::new(1, MoveDirection::Earlier).apply(&mut tour, &graph),
            Err(EditError::PrecedenceViolated)
        );
        assert_eq!(
            MoveVisit::new(4, MoveDirection::Later).apply(&mut tour, &graph),
            Err(EditError::PositionOutOfRange(4))
        );
        // Pickup(1) at stop 3 cannot move past its own delivery at stop 4.
        assert_eq!(
            MoveVisit::new(3, MoveDirection::Later).apply(&mut tour, &graph),
            Err(EditError::PrecedenceViolated)
        );
        assert_eq!(tour, before);
    }

    #[test]
    fn test_invert_without_apply_fails() {
        let graph = star_graph();
        let mut tour = solved_tour(&graph);
        let mut cmd = RemoveRequest::new(0);
        assert_eq!(
            cmd.invert(&mut tour, &graph),
            Err(EditError::NothingToUndo)
        );
    }
}

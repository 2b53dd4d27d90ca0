//! The computed tour: visiting order and realized road paths.

use crate::models::{PointKind, Request, ShortestPath};

/// A closed pickup-and-delivery tour.
///
/// The visiting order is the `stops` sequence (stop 0 is always the depot);
/// `paths()[i]` is the realized road path from stop `i` to stop `i + 1`,
/// the last path wrapping back to the depot. The trivial tour (no requests)
/// has empty stop and path lists.
///
/// Invariants held at all times:
/// 1. every request's pickup stop precedes its delivery stop;
/// 2. the path list is a closed walk starting and ending at the depot;
/// 3. `length()` equals the sum of path lengths;
/// 4. consecutive path endpoints chain and every path is a contiguous
///    segment chain.
///
/// [`Tour::is_consistent`] checks all four; editing code asserts it in
/// debug builds after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    depot: u64,
    requests: Vec<Request>,
    stops: Vec<PointKind>,
    paths: Vec<ShortestPath>,
    length: f64,
}

impl Tour {
    /// The trivial tour: the vehicle stays at the depot.
    pub fn trivial(depot: u64) -> Self {
        Self {
            depot,
            requests: Vec::new(),
            stops: Vec::new(),
            paths: Vec::new(),
            length: 0.0,
        }
    }

    /// Assembles a tour from its parts; the length is computed.
    pub fn new(
        depot: u64,
        requests: Vec<Request>,
        stops: Vec<PointKind>,
        paths: Vec<ShortestPath>,
    ) -> Self {
        let mut tour = Self {
            depot,
            requests,
            stops,
            paths,
            length: 0.0,
        };
        tour.recompute_length();
        debug_assert!(tour.is_consistent());
        tour
    }

    /// Depot intersection id.
    pub fn depot(&self) -> u64 {
        self.depot
    }

    /// The requests served by this tour, in vertex-numbering order.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// The visiting order; empty for the trivial tour, otherwise starts at
    /// the depot.
    pub fn stops(&self) -> &[PointKind] {
        &self.stops
    }

    /// Realized road paths between consecutive stops, the last wrapping to
    /// the depot.
    pub fn paths(&self) -> &[ShortestPath] {
        &self.paths
    }

    /// Total tour length (sum of path lengths).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of stops (including the depot); 0 for the trivial tour.
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    /// Intersection id of a stop, `None` for an out-of-range request index.
    pub fn location_of(&self, stop: PointKind) -> Option<u64> {
        match stop {
            PointKind::Depot => Some(self.depot),
            PointKind::Pickup(k) => self.requests.get(k).map(Request::pickup),
            PointKind::Delivery(k) => self.requests.get(k).map(Request::delivery),
        }
    }

    /// Position of a stop in the visiting order.
    pub fn position_of(&self, stop: PointKind) -> Option<usize> {
        self.stops.iter().position(|&s| s == stop)
    }

    /// Visited intersection ids, in visiting order.
    pub fn visits(&self) -> Vec<u64> {
        self.stops
            .iter()
            .filter_map(|&s| self.location_of(s))
            .collect()
    }

    /// Checks every tour invariant.
    pub fn is_consistent(&self) -> bool {
        if self.stops.is_empty() {
            return self.paths.is_empty() && self.requests.is_empty() && self.length == 0.0;
        }
        if self.stops.len() != self.paths.len()
            || self.stops.len() != 1 + 2 * self.requests.len()
            || self.stops[0] != PointKind::Depot
        {
            return false;
        }
        // Each request appears exactly once per side, pickup first.
        for k in 0..self.requests.len() {
            let pickup = self.position_of(PointKind::Pickup(k));
            let delivery = self.position_of(PointKind::Delivery(k));
            match (pickup, delivery) {
                (Some(p), Some(d)) if p < d => {}
                _ => return false,
            }
        }
        // Closed walk: path endpoints chain through the stop locations.
        let n = self.stops.len();
        for i in 0..n {
            let path = &self.paths[i];
            let from = self.location_of(self.stops[i]);
            let to = self.location_of(self.stops[(i + 1) % n]);
            if from != Some(path.origin()) || to != Some(path.destination()) {
                return false;
            }
            if !path.is_contiguous() {
                return false;
            }
        }
        let sum: f64 = self.paths.iter().map(ShortestPath::length).sum();
        (self.length - sum).abs() < 1e-9
    }

    pub(crate) fn recompute_length(&mut self) {
        self.length = self.paths.iter().map(ShortestPath::length).sum();
    }

    pub(crate) fn request_mut(&mut self, k: usize) -> &mut Request {
        &mut self.requests[k]
    }

    /// Appends a request; its stops must be spliced in separately.
    /// Returns the new request index.
    pub(crate) fn push_request(&mut self, request: Request) -> usize {
        self.requests.push(request);
        self.requests.len() - 1
    }

    /// Removes request `k`, renumbering stop references above it. The
    /// request's own stops must have been spliced out already.
    pub(crate) fn remove_request(&mut self, k: usize) -> Request {
        debug_assert!(
            self.stops.iter().all(|s| s.request_index() != Some(k)),
            "stops of request {k} must be spliced out before removal"
        );
        for stop in &mut self.stops {
            *stop = match *stop {
                PointKind::Pickup(i) if i > k => PointKind::Pickup(i - 1),
                PointKind::Delivery(i) if i > k => PointKind::Delivery(i - 1),
                other => other,
            };
        }
        self.requests.remove(k)
    }

    /// Re-inserts a request at index `k`, renumbering stop references.
    /// Inverse of [`Tour::remove_request`].
    pub(crate) fn insert_request(&mut self, k: usize, request: Request) {
        for stop in &mut self.stops {
            *stop = match *stop {
                PointKind::Pickup(i) if i >= k => PointKind::Pickup(i + 1),
                PointKind::Delivery(i) if i >= k => PointKind::Delivery(i + 1),
                other => other,
            };
        }
        self.requests.insert(k, request);
    }

    /// Splices a stop in at `pos`, replacing the path that used to jump the
    /// slot with `inbound` then `outbound`. Returns the displaced path,
    /// `None` when the tour was trivial (the new stop becomes the only
    /// visit after the depot).
    pub(crate) fn insert_stop(
        &mut self,
        pos: usize,
        stop: PointKind,
        inbound: ShortestPath,
        outbound: ShortestPath,
    ) -> Option<ShortestPath> {
        let displaced = if self.stops.is_empty() {
            debug_assert_eq!(pos, 1);
            self.stops.push(PointKind::Depot);
            None
        } else {
            Some(self.paths.remove(pos - 1))
        };
        self.stops.insert(pos, stop);
        self.paths.insert(pos - 1, inbound);
        self.paths.insert(pos, outbound);
        self.recompute_length();
        displaced
    }

    /// Removes the stop at `pos`, replacing its two adjacent paths with
    /// `replacement` (which must be `None` exactly when the tour collapses
    /// to trivial). Returns the removed stop and its two adjacent paths.
    /// Inverse of [`Tour::insert_stop`].
    pub(crate) fn remove_stop(
        &mut self,
        pos: usize,
        replacement: Option<ShortestPath>,
    ) -> (PointKind, ShortestPath, ShortestPath) {
        let stop = self.stops.remove(pos);
        let inbound = self.paths.remove(pos - 1);
        let outbound = self.paths.remove(pos - 1);
        if self.stops.len() == 1 {
            debug_assert!(replacement.is_none());
            self.stops.clear();
        } else if let Some(path) = replacement {
            self.paths.insert(pos - 1, path);
        } else {
            debug_assert!(false, "non-trivial removal requires a replacement path");
        }
        self.recompute_length();
        (stop, inbound, outbound)
    }

    /// Swaps the stop at `pos` with its successor, replacing the three
    /// affected paths. Returns the previous paths in the same order
    /// (into `pos`, between the pair, out of `pos + 1`).
    pub(crate) fn swap_with_next(
        &mut self,
        pos: usize,
        new_paths: [ShortestPath; 3],
    ) -> [ShortestPath; 3] {
        self.stops.swap(pos, pos + 1);
        let [a, b, c] = new_paths;
        let old_a = std::mem::replace(&mut self.paths[pos - 1], a);
        let old_b = std::mem::replace(&mut self.paths[pos], b);
        let old_c = std::mem::replace(&mut self.paths[pos + 1], c);
        self.recompute_length();
        [old_a, old_b, old_c]
    }

    /// Replaces the path at `idx`, returning the old one.
    pub(crate) fn replace_path(&mut self, idx: usize, path: ShortestPath) -> ShortestPath {
        let old = std::mem::replace(&mut self.paths[idx], path);
        self.recompute_length();
        old
    }
}

//! Pickup-and-delivery requests and the parsed planning input.

use serde::{Deserialize, Serialize};

/// A single pickup-and-delivery request.
///
/// Service durations are in seconds and do not affect tour geometry; they
/// are metadata carried for the presentation layer.
///
/// # Examples
///
/// ```
/// use pd_routing::models::Request;
///
/// let r = Request::new(3, 8, 300, 240).unwrap();
/// assert_eq!(r.pickup(), 3);
/// assert_eq!(r.delivery(), 8);
/// assert!(Request::new(3, 3, 0, 0).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pickup: u64,
    delivery: u64,
    pickup_duration: u32,
    delivery_duration: u32,
}

impl Request {
    /// Creates a new request.
    ///
    /// Returns `None` if pickup and delivery are the same intersection.
    pub fn new(
        pickup: u64,
        delivery: u64,
        pickup_duration: u32,
        delivery_duration: u32,
    ) -> Option<Self> {
        if pickup == delivery {
            return None;
        }
        Some(Self {
            pickup,
            delivery,
            pickup_duration,
            delivery_duration,
        })
    }

    /// Pickup intersection id.
    pub fn pickup(&self) -> u64 {
        self.pickup
    }

    /// Delivery intersection id.
    pub fn delivery(&self) -> u64 {
        self.delivery
    }

    /// Service duration at the pickup, in seconds.
    pub fn pickup_duration(&self) -> u32 {
        self.pickup_duration
    }

    /// Service duration at the delivery, in seconds.
    pub fn delivery_duration(&self) -> u32 {
        self.delivery_duration
    }

    pub(crate) fn set_pickup(&mut self, id: u64) {
        debug_assert_ne!(id, self.delivery);
        self.pickup = id;
    }

    pub(crate) fn set_delivery(&mut self, id: u64) {
        debug_assert_ne!(id, self.pickup);
        self.delivery = id;
    }

    pub(crate) fn set_pickup_duration(&mut self, seconds: u32) {
        self.pickup_duration = seconds;
    }

    pub(crate) fn set_delivery_duration(&mut self, seconds: u32) {
        self.delivery_duration = seconds;
    }
}

/// The parsed planning input handed over by the loader layer: a depot, a
/// departure time, and an ordered list of requests.
///
/// The departure time is kept verbatim for the presentation layer; the
/// optimizer does not schedule against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningRequest {
    depot: u64,
    departure: String,
    requests: Vec<Request>,
}

impl PlanningRequest {
    /// Creates a planning request.
    pub fn new(depot: u64, departure: &str, requests: Vec<Request>) -> Self {
        Self {
            depot,
            departure: departure.to_string(),
            requests,
        }
    }

    /// Depot intersection id.
    pub fn depot(&self) -> u64 {
        self.depot
    }

    /// Departure time as given by the loader.
    pub fn departure(&self) -> &str {
        &self.departure
    }

    /// The requests, in load order.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_valid() {
        let r = Request::new(1, 2, 120, 180).expect("valid");
        assert_eq!(r.pickup(), 1);
        assert_eq!(r.delivery(), 2);
        assert_eq!(r.pickup_duration(), 120);
        assert_eq!(r.delivery_duration(), 180);
    }

    #[test]
    fn test_request_same_endpoints_rejected() {
        assert!(Request::new(5, 5, 0, 0).is_none());
    }

    #[test]
    fn test_request_setters() {
        let mut r = Request::new(1, 2, 0, 0).expect("valid");
        r.set_pickup(7);
        r.set_delivery(9);
        r.set_pickup_duration(60);
        r.set_delivery_duration(90);
        assert_eq!(r.pickup(), 7);
        assert_eq!(r.delivery(), 9);
        assert_eq!(r.pickup_duration(), 60);
        assert_eq!(r.delivery_duration(), 90);
    }

    #[test]
    fn test_planning_request() {
        let plan = PlanningRequest::new(
            0,
            "8:30:00",
            vec![Request::new(1, 2, 0, 0).expect("valid")],
        );
        assert_eq!(plan.depot(), 0);
        assert_eq!(plan.departure(), "8:30:00");
        assert_eq!(plan.requests().len(), 1);
    }
}

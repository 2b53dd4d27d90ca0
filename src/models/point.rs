//! Point-of-interest identification and vertex numbering.
//!
//! The reduced planning graph numbers its vertices as: vertex 0 is the
//! depot, and request *k* (0-indexed) owns pickup vertex `2k + 1` and
//! delivery vertex `2k + 2`. That numbering is a contract shared by the
//! reducer, the solver, and the tour editor; [`PointKind`] centralizes the
//! conversions so the arithmetic lives in exactly one place.

use crate::models::PlanningRequest;

/// Identifies a stop in the planning graph: the depot, or one side of a
/// pickup-and-delivery request.
///
/// # Examples
///
/// ```
/// use pd_routing::models::PointKind;
///
/// assert_eq!(PointKind::Pickup(0).vertex(), 1);
/// assert_eq!(PointKind::Delivery(0).vertex(), 2);
/// assert_eq!(PointKind::from_vertex(5), PointKind::Pickup(2));
/// assert_eq!(PointKind::Delivery(2).partner(), Some(PointKind::Pickup(2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointKind {
    /// The tour's start and end point.
    Depot,
    /// The pickup side of request `k`.
    Pickup(usize),
    /// The delivery side of request `k`.
    Delivery(usize),
}

impl PointKind {
    /// Decodes a reduced-graph vertex id.
    ///
    /// Odd vertices are pickups, positive even vertices are deliveries.
    pub fn from_vertex(vertex: usize) -> Self {
        if vertex == 0 {
            Self::Depot
        } else if vertex % 2 == 1 {
            Self::Pickup((vertex - 1) / 2)
        } else {
            Self::Delivery(vertex / 2 - 1)
        }
    }

    /// Encodes this point as a reduced-graph vertex id.
    pub fn vertex(self) -> usize {
        match self {
            Self::Depot => 0,
            Self::Pickup(k) => 2 * k + 1,
            Self::Delivery(k) => 2 * k + 2,
        }
    }

    /// The owning request index, `None` for the depot.
    pub fn request_index(self) -> Option<usize> {
        match self {
            Self::Depot => None,
            Self::Pickup(k) | Self::Delivery(k) => Some(k),
        }
    }

    /// The matching other half of the same request, `None` for the depot.
    pub fn partner(self) -> Option<Self> {
        match self {
            Self::Depot => None,
            Self::Pickup(k) => Some(Self::Delivery(k)),
            Self::Delivery(k) => Some(Self::Pickup(k)),
        }
    }

    /// Returns `true` for the depot.
    pub fn is_depot(self) -> bool {
        matches!(self, Self::Depot)
    }

    /// Returns `true` for a pickup.
    pub fn is_pickup(self) -> bool {
        matches!(self, Self::Pickup(_))
    }

    /// Returns `true` for a delivery.
    pub fn is_delivery(self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

/// Maps reduced-graph vertices to road intersections for one planning
/// request: vertex 0 is the depot, then each request's pickup and delivery
/// in request order.
///
/// # Examples
///
/// ```
/// use pd_routing::models::{PlanningRequest, PoiTable, Request};
///
/// let plan = PlanningRequest::new(
///     9,
///     "8:00",
///     vec![Request::new(4, 6, 300, 240).unwrap()],
/// );
/// let pois = PoiTable::from_plan(&plan);
/// assert_eq!(pois.len(), 3);
/// assert_eq!(pois.intersection_id(0), 9);
/// assert_eq!(pois.intersection_id(1), 4);
/// assert_eq!(pois.intersection_id(2), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiTable {
    ids: Vec<u64>,
}

impl PoiTable {
    /// Builds the table for a planning request: `2n + 1` entries for `n`
    /// requests.
    pub fn from_plan(plan: &PlanningRequest) -> Self {
        let mut ids = Vec::with_capacity(2 * plan.requests().len() + 1);
        ids.push(plan.depot());
        for request in plan.requests() {
            ids.push(request.pickup());
            ids.push(request.delivery());
        }
        Self { ids }
    }

    /// Number of points of interest (`2n + 1`).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the table holds only the depot or nothing.
    pub fn is_empty(&self) -> bool {
        self.ids.len() <= 1
    }

    /// Intersection id of a reduced-graph vertex.
    pub fn intersection_id(&self, vertex: usize) -> u64 {
        self.ids[vertex]
    }

    /// All intersection ids, indexed by vertex.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }
}

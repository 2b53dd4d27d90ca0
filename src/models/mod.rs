//! Domain model types for pickup-and-delivery tour planning.
//!
//! Provides the core abstractions: the road network (intersections and
//! directed segments), pickup-and-delivery requests, the point-of-interest
//! numbering shared by the reducer/solver/editor, realized shortest paths,
//! and the tour itself.

mod graph;
mod path;
mod point;
mod request;
mod tour;

pub use graph::{Intersection, RoadGraph, Segment};
pub use path::ShortestPath;
pub use point::{PoiTable, PointKind};
pub use request::{PlanningRequest, Request};
pub use tour::Tour;

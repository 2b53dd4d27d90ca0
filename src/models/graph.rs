//! Road network types: intersections, directed segments, and the graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A directed road segment between two intersections.
///
/// A bidirectional street is modeled as two segments, one per direction.
///
/// # Examples
///
/// ```
/// use pd_routing::models::Segment;
///
/// let s = Segment::new(3, 7, 120.5, "Rue de la Paix");
/// assert_eq!(s.origin(), 3);
/// assert_eq!(s.destination(), 7);
/// assert!((s.length() - 120.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    origin: u64,
    destination: u64,
    length: f64,
    name: String,
}

impl Segment {
    /// Creates a new segment.
    ///
    /// Lengths are expected positive and finite; the excluded loader layer
    /// validates this, so the core only asserts it in debug builds.
    pub fn new(origin: u64, destination: u64, length: f64, name: &str) -> Self {
        debug_assert!(length.is_finite() && length > 0.0, "segment length must be positive");
        Self {
            origin,
            destination,
            length,
            name: name.to_string(),
        }
    }

    /// Origin intersection id.
    pub fn origin(&self) -> u64 {
        self.origin
    }

    /// Destination intersection id.
    pub fn destination(&self) -> u64 {
        self.destination
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Display name of the street this segment belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A road intersection with its outgoing segments.
///
/// The outgoing adjacency list is attached by [`RoadGraph::new`] at load
/// time; intersections are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    id: u64,
    latitude: f64,
    longitude: f64,
    outgoing: Vec<Segment>,
}

impl Intersection {
    /// Creates an intersection with no outgoing segments yet.
    pub fn new(id: u64, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            outgoing: Vec::new(),
        }
    }

    /// Stable intersection id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Latitude of this intersection.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude of this intersection.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Outgoing segments, in load order.
    pub fn outgoing(&self) -> &[Segment] {
        &self.outgoing
    }
}

/// The city road network: intersections and directed weighted segments.
///
/// Built once from loader output and never mutated afterwards; every
/// algorithm in this crate borrows it immutably.
///
/// # Examples
///
/// ```
/// use pd_routing::models::{Intersection, RoadGraph, Segment};
///
/// let graph = RoadGraph::new(
///     vec![Intersection::new(0, 45.75, 4.85), Intersection::new(1, 45.76, 4.86)],
///     vec![Segment::new(0, 1, 100.0, "Main St"), Segment::new(1, 0, 100.0, "Main St")],
/// );
/// assert_eq!(graph.num_intersections(), 2);
/// assert_eq!(graph.outgoing(0).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RoadGraph {
    intersections: Vec<Intersection>,
    index: HashMap<u64, usize>,
}

impl RoadGraph {
    /// Builds the graph, attaching each segment to its origin intersection.
    ///
    /// Referential integrity of segment endpoints is the loader's duty and
    /// is only asserted in debug builds; a segment whose origin is unknown
    /// is dropped.
    pub fn new(intersections: Vec<Intersection>, segments: Vec<Segment>) -> Self {
        let mut intersections = intersections;
        let index: HashMap<u64, usize> = intersections
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id(), i))
            .collect();
        debug_assert_eq!(index.len(), intersections.len(), "duplicate intersection id");

        for segment in segments {
            debug_assert!(
                index.contains_key(&segment.destination()),
                "segment destination {} not in graph",
                segment.destination()
            );
            match index.get(&segment.origin()) {
                Some(&i) => intersections[i].outgoing.push(segment),
                None => debug_assert!(false, "segment origin {} not in graph", segment.origin()),
            }
        }

        Self {
            intersections,
            index,
        }
    }

    /// Number of intersections.
    pub fn num_intersections(&self) -> usize {
        self.intersections.len()
    }

    /// All intersections, in load order.
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// Looks up an intersection by id.
    pub fn intersection(&self, id: u64) -> Option<&Intersection> {
        self.index.get(&id).map(|&i| &self.intersections[i])
    }

    /// Returns `true` if the graph contains the given intersection id.
    pub fn contains(&self, id: u64) -> bool {
        self.index.contains_key(&id)
    }

    /// Dense index of an intersection id, if present.
    ///
    /// Indices are stable for the lifetime of the graph and cover
    /// `0..num_intersections()`; algorithms use them for flat arrays.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Intersection at a dense index.
    pub fn at(&self, index: usize) -> &Intersection {
        &self.intersections[index]
    }

    /// Outgoing segments of an intersection, empty if the id is unknown.
    pub fn outgoing(&self, id: u64) -> &[Segment] {
        self.intersection(id).map_or(&[], |node| node.outgoing())
    }

    /// Returns `true` if a directed segment from `origin` to `destination`
    /// exists.
    pub fn has_segment(&self, origin: u64, destination: u64) -> bool {
        self.outgoing(origin)
            .iter()
            .any(|s| s.destination() == destination)
    }
}

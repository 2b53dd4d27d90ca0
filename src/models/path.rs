//! Realized shortest paths through the road network.

use crate::models::Segment;

/// An ordered chain of road segments realizing a shortest path between two
/// intersections.
///
/// Immutable once computed. The empty chain represents the zero-length path
/// from an intersection to itself.
///
/// # Examples
///
/// ```
/// use pd_routing::models::{Segment, ShortestPath};
///
/// let p = ShortestPath::new(0, 2, vec![
///     Segment::new(0, 1, 10.0, "a"),
///     Segment::new(1, 2, 20.0, "b"),
/// ]);
/// assert_eq!(p.origin(), 0);
/// assert_eq!(p.destination(), 2);
/// assert!((p.length() - 30.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    origin: u64,
    destination: u64,
    length: f64,
    segments: Vec<Segment>,
}

impl ShortestPath {
    /// Creates a path from its segment chain; the length is the sum of
    /// segment lengths.
    ///
    /// The chain must be contiguous from `origin` to `destination`; this is
    /// asserted in debug builds.
    pub fn new(origin: u64, destination: u64, segments: Vec<Segment>) -> Self {
        let length = segments.iter().map(Segment::length).sum();
        let path = Self {
            origin,
            destination,
            length,
            segments,
        };
        debug_assert!(path.is_contiguous(), "segment chain must connect origin to destination");
        path
    }

    /// The zero-length path from an intersection to itself.
    pub fn empty(at: u64) -> Self {
        Self::new(at, at, Vec::new())
    }

    /// Origin intersection id.
    pub fn origin(&self) -> u64 {
        self.origin
    }

    /// Destination intersection id.
    pub fn destination(&self) -> u64 {
        self.destination
    }

    /// Total length (sum of segment lengths).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The segment chain, in traversal order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` for the zero-length self path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Checks that the segments chain exactly from origin to destination.
    pub fn is_contiguous(&self) -> bool {
        if self.segments.is_empty() {
            return self.origin == self.destination;
        }
        let mut at = self.origin;
        for segment in &self.segments {
            if segment.origin() != at {
                return false;
            }
            at = segment.destination();
        }
        at == self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_length_is_segment_sum() {
        let p = ShortestPath::new(
            0,
            2,
            vec![Segment::new(0, 1, 1.5, "a"), Segment::new(1, 2, 2.5, "b")],
        );
        assert!((p.length() - 4.0).abs() < 1e-10);
        assert_eq!(p.segments().len(), 2);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_empty_path() {
        let p = ShortestPath::empty(7);
        assert_eq!(p.origin(), 7);
        assert_eq!(p.destination(), 7);
        assert_eq!(p.length(), 0.0);
        assert!(p.is_empty());
        assert!(p.is_contiguous());
    }

    #[test]
    fn test_contiguity() {
        let good = ShortestPath::new(
            0,
            2,
            vec![Segment::new(0, 1, 1.0, "a"), Segment::new(1, 2, 1.0, "b")],
        );
        assert!(good.is_contiguous());
    }
}

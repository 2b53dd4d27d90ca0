//! Error types for path computation, tour planning, and tour editing.

use thiserror::Error;

/// Errors from shortest-path queries over the road graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// An intersection id does not exist in the road graph.
    #[error("unknown intersection {0}")]
    UnknownIntersection(u64),
    /// No path exists between the two intersections.
    #[error("no path from intersection {origin} to {destination}")]
    NoPath {
        /// Origin intersection id.
        origin: u64,
        /// Destination intersection id.
        destination: u64,
    },
}

/// Errors from tour computation.
///
/// A time-limited stop is *not* an error: the planner returns the best tour
/// found so far, which may be the trivial tour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Points of interest that cannot take part in a round trip from the
    /// depot. Tour computation refuses to run until these are resolved.
    #[error("points unreachable from depot: {0:?}")]
    Unreachable(Vec<u64>),
    /// The search space was exhausted without finding a feasible circuit.
    #[error("no feasible circuit respecting pickup-before-delivery exists")]
    NoFeasibleCircuit,
    /// A required shortest path could not be computed.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Errors from tour-editing commands.
///
/// A rejected command leaves the tour untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// A stop position outside the current visiting sequence.
    #[error("stop position {0} out of range")]
    PositionOutOfRange(usize),
    /// A request index outside the tour's request list.
    #[error("request index {0} out of range")]
    RequestOutOfRange(usize),
    /// An address that is unknown or would break the pickup != delivery
    /// invariant.
    #[error("invalid address {0}")]
    InvalidAddress(u64),
    /// The edit would place a delivery before its own pickup, or displace
    /// the depot.
    #[error("edit would violate the visiting-order constraints")]
    PrecedenceViolated,
    /// `undo` with no applied command to revert.
    #[error("nothing to undo")]
    NothingToUndo,
    /// `redo` with no undone command to replay.
    #[error("nothing to redo")]
    NothingToRedo,
    /// A required shortest path could not be computed.
    #[error(transparent)]
    Path(#[from] PathError),
}

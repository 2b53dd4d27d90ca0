//! Interactive tour editing: reversible commands and a linear undo/redo
//! history.
//!
//! Edits recompute only the road paths they disturb; undo restores the
//! exact captured paths instead of recomputing, so round trips are
//! value-for-value even when several shortest paths tie.

mod command;
mod log;

pub use command::{
    ChangeAddress, ChangeDuration, InsertRequest, MoveDirection, MoveVisit, RemoveRequest,
    ReversibleCommand,
};
pub use log::CommandLog;

//! Linear undo/redo history over reversible tour edits.

use crate::error::EditError;
use crate::models::{RoadGraph, Tour};

use super::ReversibleCommand;

/// An ordered history of applied commands with a cursor.
///
/// Commands before the cursor have been applied; commands at or after it
/// were undone and can be redone. Adding a command while undone history
/// exists discards that forward history, keeping the log linear.
///
/// # Examples
///
/// ```
/// use pd_routing::editing::{CommandLog, InsertRequest};
/// use pd_routing::models::{Intersection, Request, RoadGraph, Segment, Tour};
///
/// let graph = RoadGraph::new(
///     (0..3u64).map(|i| Intersection::new(i, 0.0, 0.0)).collect(),
///     vec![
///         Segment::new(0, 1, 1.0, "a"),
///         Segment::new(1, 2, 1.0, "b"),
///         Segment::new(2, 0, 1.0, "c"),
///     ],
/// );
/// let mut tour = Tour::trivial(0);
/// let mut log = CommandLog::new();
/// let request = Request::new(1, 2, 60, 60).unwrap();
/// log.add(Box::new(InsertRequest::new(request, 1, 2)), &mut tour, &graph)
///     .unwrap();
/// assert_eq!(tour.visits(), vec![0, 1, 2]);
/// log.undo(&mut tour, &graph).unwrap();
/// assert_eq!(tour, Tour::trivial(0));
/// ```
#[derive(Default)]
pub struct CommandLog {
    commands: Vec<Box<dyn ReversibleCommand>>,
    current: usize,
}

impl CommandLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `command` to the tour and records it.
    ///
    /// Any undone commands beyond the cursor are discarded first. On error
    /// the tour and the log are unchanged.
    pub fn add(
        &mut self,
        mut command: Box<dyn ReversibleCommand>,
        tour: &mut Tour,
        graph: &RoadGraph,
    ) -> Result<(), EditError> {
        command.apply(tour, graph)?;
        self.commands.truncate(self.current);
        self.commands.push(command);
        self.current += 1;
        Ok(())
    }

    /// Reverts the most recently applied command and moves the cursor back.
    pub fn undo(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError> {
        if self.current == 0 {
            return Err(EditError::NothingToUndo);
        }
        self.commands[self.current - 1].invert(tour, graph)?;
        self.current -= 1;
        Ok(())
    }

    /// Re-applies the most recently undone command and advances the cursor.
    pub fn redo(&mut self, tour: &mut Tour, graph: &RoadGraph) -> Result<(), EditError> {
        if self.current == self.commands.len() {
            return Err(EditError::NothingToRedo);
        }
        self.commands[self.current].apply(tour, graph)?;
        self.current += 1;
        Ok(())
    }

    /// Forgets all history. The tour itself is not touched; call this when
    /// it is replaced wholesale, e.g. by a fresh computation.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.current = 0;
    }

    /// Number of commands held, applied or undone.
    pub fn size(&self) -> usize {
        self.commands.len()
    }

    /// Cursor position: how many held commands are currently applied.
    pub fn current_index(&self) -> usize {
        self.current
    }
}

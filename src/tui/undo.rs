use std::collections::VecDeque;

use crate::model::task::Task;
use crate::ops::TaskError;

/// Maximum number of snapshots kept; the oldest is evicted first.
pub const UNDO_STACK_LIMIT: usize = 50;

/// Bounded stack of whole-collection snapshots, each taken just before a
/// destructive operation.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    snapshots: VecDeque<Vec<Task>>,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack {
            snapshots: VecDeque::new(),
        }
    }

    /// Push a deep copy of `tasks`.
    pub fn capture(&mut self, tasks: &[Task]) {
        self.push(tasks.to_vec());
    }

    /// Push an already-owned snapshot (e.g. the order remembered when a
    /// reposition started).
    pub fn push(&mut self, snapshot: Vec<Task>) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > UNDO_STACK_LIMIT {
            self.snapshots.pop_front();
        }
    }

    /// Pop the most recent snapshot.
    pub fn restore(&mut self) -> Result<Vec<Task>, TaskError> {
        self.snapshots.pop_back().ok_or(TaskError::EmptyHistory)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

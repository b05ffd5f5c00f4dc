pub mod context_ops;
pub mod stats;
pub mod task_ops;

use crate::io::store_io::StoreError;

/// User-facing, non-fatal errors. The display text is what the status row
/// shows until the next input event.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Context already exists")]
    DuplicateContext,
    #[error("Cannot delete the only context")]
    LastContext,
    #[error("Nothing to undo")]
    EmptyHistory,
    #[error("No tags to remove")]
    NoTags,
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("Could not save: {0}")]
    Save(#[from] StoreError),
}

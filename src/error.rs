//! Error types for quasar.

use thiserror::Error;

/// Errors surfaced by the storage, configuration and command layers.
///
/// The statistics engine never fails; only the layers around it do.
#[derive(Debug, Error)]
pub enum QuasarError {
    /// Configuration could not be read, written or resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The `SQLite` store failed.
    #[error("database error: {0}")]
    Database(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document or argument could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A referenced goal, task or entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A new task overlaps an already scheduled one.
    #[error("schedule conflict: the new task overlaps '{content}' ({task_id})")]
    ScheduleConflict {
        /// Id of the existing task.
        task_id: String,
        /// Content of the existing task.
        content: String,
    },
}

impl From<serde_json::Error> for QuasarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for QuasarError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

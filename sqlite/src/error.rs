//! Error types for read-only connection operations.
//!
//! Separates failures by the phase they happen in: opening, preparing a
//! statement, stepping it, and using a connection after it was closed.

use thiserror::Error;

/// Errors that can occur while opening or querying a database.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The database file could not be opened.
    #[error("unable to open database '{path}': {message}")]
    Open { path: String, message: String },

    /// The SQL text failed to compile (syntax error, unknown table or column).
    #[error("{message}")]
    Prepare { message: String },

    /// The engine failed while stepping through the results.
    #[error("{message}")]
    Step { message: String },

    /// The connection was closed before the operation.
    #[error("the database connection is closed")]
    ConnectionClosed,

    /// Buffer sizes must hold at least one row.
    #[error("invalid buffer size {0}: must be at least 1")]
    InvalidBufferSize(usize),

    /// Extension loading was turned off when the connection was opened.
    #[error("extension loading is disabled for this connection")]
    ExtensionsDisabled,

    /// A dynamic extension failed to load.
    #[error("failed to load extension '{path}': {message}")]
    Extension { path: String, message: String },

    /// Any other SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ConnectionError`].
pub type Result<T> = std::result::Result<T, ConnectionError>;

/// Human-readable engine diagnostic for `err`.
///
/// For engine failures this is SQLite's own message (e.g. `no such table: t`).
pub(crate) fn engine_message(err: &rusqlite::Error) -> String {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message.clone(),
        other => other.to_string(),
    }
}

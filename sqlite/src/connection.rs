//! Read-only database connections.
//!
//! [`Connection`] owns the SQLite handle, the row-buffer size used to chunk
//! result sets, and the extension-loading setting. Everything it does beyond
//! [`eval`](Connection::eval) is a thin call into rusqlite.
//!
//! # Example
//!
//! ```no_run
//! use rsqlite_connection::Connection;
//!
//! let mut conn = Connection::open("library.db").unwrap();
//! let books = conn.eval("SELECT title, year FROM books ORDER BY year").unwrap();
//! for row in &books {
//!     println!("{:?}", row.get("title"));
//! }
//! conn.close().unwrap();
//! ```

use std::num::NonZeroUsize;
use std::path::Path;

use rsqlite_core::ResultSet;
use rusqlite::OpenFlags;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::cursor::SqliteCursor;
use crate::error::{ConnectionError, Result, engine_message};

/// Metadata for an open connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbInfo {
    /// The database path as given when opening.
    pub database_file: String,
    /// Rows per result chunk.
    pub buffer_size: usize,
}

/// A read-only connection to an SQLite database file.
///
/// Queries run synchronously on the caller's thread, one at a time. The
/// handle is released by [`close`](Connection::close) or on drop, whichever
/// comes first.
#[derive(Debug)]
pub struct Connection {
    inner: Option<rusqlite::Connection>,
    database_file: String,
    buffer_size: NonZeroUsize,
    extensions_enabled: bool,
}

impl Connection {
    /// Opens `path` read-only with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Open`] with SQLite's message if the file
    /// cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &Config::default())
    }

    /// Opens `path` read-only and applies `config`.
    ///
    /// Extension loading is switched on when `config.enable_extensions` is
    /// set, and every extension in `config.extensions` is loaded before the
    /// connection is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::InvalidBufferSize`] for a zero buffer size,
    /// [`ConnectionError::Open`] if the file cannot be opened, and
    /// [`ConnectionError::Extension`] if a configured extension fails to
    /// load.
    pub fn open_with_config(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let database_file = path.to_string_lossy().into_owned();
        let buffer_size = NonZeroUsize::new(config.buffer_size)
            .ok_or(ConnectionError::InvalidBufferSize(config.buffer_size))?;

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let inner = rusqlite::Connection::open_with_flags(path, flags).map_err(|err| {
            ConnectionError::Open {
                path: database_file.clone(),
                message: engine_message(&err),
            }
        })?;

        if config.enable_extensions {
            // SAFETY: this only turns the loader on; no library is loaded here.
            unsafe { inner.load_extension_enable() }?;
        }

        let conn = Self {
            inner: Some(inner),
            database_file,
            buffer_size,
            extensions_enabled: config.enable_extensions,
        };
        for extension in &config.extensions {
            conn.load_extension(&extension.path, extension.entry_point.as_deref())?;
        }

        info!(
            database_file = %conn.database_file,
            buffer_size = buffer_size.get(),
            extensions = config.extensions.len(),
            "opened read-only connection"
        );
        Ok(conn)
    }

    /// Evaluates `sql` and returns every row it produces.
    ///
    /// The statement is prepared, stepped to exhaustion and finalized before
    /// this returns. Results are collected in chunks of
    /// [`buffer_size`](Connection::buffer_size) rows.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::ConnectionClosed`] after [`close`](Connection::close).
    /// - [`ConnectionError::Prepare`] if the SQL does not compile, or holds
    ///   more than one statement. A trailing `;` or comment is fine.
    /// - [`ConnectionError::Step`] if the engine fails mid-stream. Rows
    ///   read before the failure are discarded. Empty or comment-only SQL
    ///   also fails here, as SQLite's API misuse error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use rsqlite_connection::Connection;
    /// # use rsqlite_core::HostValue;
    /// let conn = Connection::open("data.db").unwrap();
    /// let result = conn.eval("SELECT 1 AS x, 'a' AS y").unwrap();
    /// assert_eq!(result.len(), 1);
    /// assert_eq!(result[0].get("x"), Some(&HostValue::Integer(1)));
    /// ```
    pub fn eval(&self, sql: &str) -> Result<ResultSet> {
        let conn = self.handle()?;
        debug!(sql, buffer_size = self.buffer_size.get(), "evaluating statement");

        let mut stmt = conn.prepare(sql).map_err(|err| ConnectionError::Prepare {
            message: engine_message(&err),
        })?;
        let mut cursor = SqliteCursor::new(&mut stmt);
        let result = rsqlite_core::materialize(&mut cursor, self.buffer_size).map_err(|err| {
            ConnectionError::Step {
                message: engine_message(&err),
            }
        })?;
        Ok(result)
    }

    /// Loads a dynamic SQLite extension into this connection.
    ///
    /// When `entry_point` is `None`, SQLite derives the init symbol from the
    /// library's file name.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::ExtensionsDisabled`] if the connection was
    /// opened with extension loading off, and [`ConnectionError::Extension`]
    /// if the library cannot be loaded.
    pub fn load_extension(&self, path: impl AsRef<Path>, entry_point: Option<&str>) -> Result<()> {
        let conn = self.handle()?;
        if !self.extensions_enabled {
            return Err(ConnectionError::ExtensionsDisabled);
        }
        let path = path.as_ref();
        // SAFETY: the extension runs native code from `path`; which libraries
        // to trust is the caller's decision.
        unsafe { conn.load_extension(path, entry_point) }.map_err(|err| {
            ConnectionError::Extension {
                path: path.display().to_string(),
                message: engine_message(&err),
            }
        })?;
        debug!(path = %path.display(), entry_point, "loaded extension");
        Ok(())
    }

    /// Returns the database file name and buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::ConnectionClosed`] after
    /// [`close`](Connection::close).
    pub fn info(&self) -> Result<DbInfo> {
        self.handle()?;
        Ok(DbInfo {
            database_file: self.database_file.clone(),
            buffer_size: self.buffer_size.get(),
        })
    }

    /// Changes the number of rows per result chunk for later queries.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::ConnectionClosed`] after
    /// [`close`](Connection::close), and
    /// [`ConnectionError::InvalidBufferSize`] for zero.
    pub fn set_buffer_size(&mut self, buffer_size: usize) -> Result<()> {
        self.handle()?;
        self.buffer_size =
            NonZeroUsize::new(buffer_size).ok_or(ConnectionError::InvalidBufferSize(buffer_size))?;
        Ok(())
    }

    /// Closes the database handle. Closing twice is a no-op.
    ///
    /// If SQLite refuses to close, the handle is kept and the error returned.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.inner.take() {
            if let Err((conn, err)) = conn.close() {
                self.inner = Some(conn);
                return Err(err.into());
            }
            info!(database_file = %self.database_file, "closed connection");
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    pub fn database_file(&self) -> &str {
        &self.database_file
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size.get()
    }

    pub fn extensions_enabled(&self) -> bool {
        self.extensions_enabled
    }

    fn handle(&self) -> Result<&rusqlite::Connection> {
        self.inner.as_ref().ok_or(ConnectionError::ConnectionClosed)
    }
}

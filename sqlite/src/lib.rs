//! Read-only SQLite connections that evaluate SQL into materialized results.
//!
//! This crate is the connection layer around
//! [`rsqlite_core`](rsqlite_core): it opens database files read-only through
//! rusqlite, hands prepared statements to the core as cursors, and returns
//! the finished [`ResultSet`](rsqlite_core::ResultSet).
//!
//! # Architecture
//!
//! - **`connection`** — open/close lifecycle, metadata, buffer size,
//!   extension loading and [`Connection::eval`]
//! - **`cursor`** — the rusqlite implementation of [`rsqlite_core::Cursor`]
//! - **`config`** — YAML-loadable connection settings
//!
//! # Quick start
//!
//! ```no_run
//! use rsqlite_connection::{Config, Connection};
//!
//! let config = Config::load("rsqlite.yml").unwrap_or_default();
//! let mut conn = Connection::open_with_config("music.db", &config).unwrap();
//!
//! let result = conn.eval("SELECT name, plays FROM artists").unwrap();
//! println!("{} rows", result.len());
//!
//! conn.set_buffer_size(100).unwrap();
//! println!("{:?}", conn.info().unwrap());
//! ```
//!
//! # Known limitations
//!
//! BLOB values come back as [`HostValue::Null`](rsqlite_core::HostValue::Null).
//! There is no cap on result size; the whole result is held in memory.

mod config;
mod connection;
mod cursor;
mod error;

pub use config::{Config, ExtensionConfig};
pub use connection::{Connection, DbInfo};
pub use error::{ConnectionError, Result};

//! Result-set materialization for forward-only SQL cursors.
//!
//! This crate turns a prepared statement's cursor into one finished,
//! randomly-indexable collection of named rows:
//!
//! - [`Cell`] / [`HostValue`] — the per-cell dynamic type tag and its
//!   coercion into a closed set of host value kinds ([`coerce`]).
//! - [`Row`] — an ordered, named record built by [`assemble_row`].
//! - [`ChunkedAccumulator`] — fixed-capacity chunks that grow without
//!   knowing the row count up front.
//! - [`ResultSet`] — the flattened, exactly-sized result.
//!
//! The engine is reached only through the [`Cursor`] and [`RowCells`]
//! traits, so the crate carries no database dependency.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use rsqlite_core::*;
//!
//! struct Numbers { next: i64, end: i64 }
//! struct Current(i64);
//!
//! impl RowCells for Current {
//!     type Error = String;
//!     fn cell(&self, _index: usize) -> Result<Cell<'_>, String> {
//!         Ok(Cell::Integer(self.0))
//!     }
//! }
//!
//! impl Cursor for Numbers {
//!     type Error = String;
//!     type Row<'a> = Current;
//!     fn column_count(&self) -> usize { 1 }
//!     fn column_name(&self, _index: usize) -> Result<&str, String> { Ok("n") }
//!     fn advance(&mut self) -> Result<Option<Current>, String> {
//!         if self.next == self.end {
//!             return Ok(None);
//!         }
//!         self.next += 1;
//!         Ok(Some(Current(self.next)))
//!     }
//! }
//!
//! let mut cursor = Numbers { next: 0, end: 7 };
//! let result = materialize(&mut cursor, NonZeroUsize::new(3).unwrap()).unwrap();
//! assert_eq!(result.len(), 7);
//! assert_eq!(result[6].get("n"), Some(&HostValue::Integer(7)));
//! ```

mod accumulate;
mod cursor;
mod result;
mod row;
mod value;

pub use accumulate::{
    ChunkedAccumulator, DEFAULT_CHUNK_CAPACITY, Materialized, materialize, materialize_with_stats,
};
pub use cursor::{Cursor, RowCells};
pub use result::ResultSet;
pub use row::{Row, assemble_row};
pub use value::{Cell, HostValue, ValueKind, coerce};

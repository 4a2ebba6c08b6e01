//! The seam between the materialization engine and a SQL engine.
//!
//! A [`Cursor`] is a forward-only iterator over the rows of one prepared
//! statement. The core only borrows it: releasing the statement is the
//! owner's job, and with an RAII statement handle that happens on drop for
//! every exit path.

use crate::value::Cell;

/// Cell access for the row a cursor is currently positioned on.
pub trait RowCells {
    type Error;

    /// Reads the cell at `index` (its dynamic type tag and raw value).
    fn cell(&self, index: usize) -> Result<Cell<'_>, Self::Error>;
}

/// A forward-only, single-use SQL cursor.
///
/// Once [`advance`](Cursor::advance) has returned `Ok(None)` or an error the
/// cursor must not be stepped again.
pub trait Cursor {
    type Error;

    /// The row view handed out by [`advance`](Cursor::advance).
    type Row<'a>: RowCells<Error = Self::Error>
    where
        Self: 'a;

    /// Number of result columns. Fixed once the statement is prepared.
    fn column_count(&self) -> usize;

    /// Name of the result column at `index`.
    fn column_name(&self, index: usize) -> Result<&str, Self::Error>;

    /// Steps to the next row.
    ///
    /// Returns `Ok(Some(row))` when a row is available, `Ok(None)` once the
    /// statement is exhausted, and the engine's error otherwise.
    fn advance(&mut self) -> Result<Option<Self::Row<'_>>, Self::Error>;
}

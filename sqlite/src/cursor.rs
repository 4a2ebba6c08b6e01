//! [`Cursor`] implementation over a rusqlite statement.

use rsqlite_core::{Cell, Cursor, RowCells};
use rusqlite::types::ValueRef;
use rusqlite::{Rows, Statement};

/// Forward-only cursor over one prepared statement's rows.
///
/// Column names are snapshotted when the cursor is created; the schema of a
/// prepared statement does not change while it runs. The statement itself
/// stays owned by the caller and is finalized when it is dropped.
pub(crate) struct SqliteCursor<'stmt> {
    columns: Vec<String>,
    rows: Rows<'stmt>,
}

impl<'stmt> SqliteCursor<'stmt> {
    /// Nothing is bound; SQLite reads unbound parameters as NULL.
    pub(crate) fn new(stmt: &'stmt mut Statement<'_>) -> Self {
        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let rows = stmt.raw_query();
        Self { columns, rows }
    }
}

/// The row a [`SqliteCursor`] is positioned on.
pub(crate) struct SqliteRow<'a, 'stmt>(&'a rusqlite::Row<'stmt>);

impl RowCells for SqliteRow<'_, '_> {
    type Error = rusqlite::Error;

    fn cell(&self, index: usize) -> rusqlite::Result<Cell<'_>> {
        self.0.get_ref(index).map(cell_from_value_ref)
    }
}

impl<'stmt> Cursor for SqliteCursor<'stmt> {
    type Error = rusqlite::Error;
    type Row<'a>
        = SqliteRow<'a, 'stmt>
    where
        Self: 'a;

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> rusqlite::Result<&str> {
        self.columns
            .get(index)
            .map(String::as_str)
            .ok_or(rusqlite::Error::InvalidColumnIndex(index))
    }

    fn advance(&mut self) -> rusqlite::Result<Option<SqliteRow<'_, 'stmt>>> {
        Ok(self.rows.next()?.map(SqliteRow))
    }
}

/// Maps SQLite's storage class for one value onto a [`Cell`].
fn cell_from_value_ref(value: ValueRef<'_>) -> Cell<'_> {
    match value {
        ValueRef::Integer(i) => Cell::Integer(i),
        ValueRef::Real(f) => Cell::Float(f),
        ValueRef::Text(bytes) => Cell::Text(bytes),
        ValueRef::Blob(bytes) => Cell::Blob(bytes),
        ValueRef::Null => Cell::Null,
    }
}

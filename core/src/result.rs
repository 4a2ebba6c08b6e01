//! The finalized, caller-owned result of one query.

use std::ops::Index;

use serde::Serialize;

use crate::accumulate::ChunkedAccumulator;
use crate::row::Row;

/// Every row produced by one query, in cursor emission order.
///
/// Built once by [`ChunkedAccumulator::finish`](crate::ChunkedAccumulator::finish)
/// and never touched by the core afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    pub(crate) fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Column names taken from the first row.
    ///
    /// An empty result set carries no schema, so this is empty too.
    pub fn column_names(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.names().collect())
            .unwrap_or_default()
    }
}

impl ChunkedAccumulator {
    /// Flattens the chunk chain into one exactly-sized [`ResultSet`].
    ///
    /// Chunks are moved in link order; every chunk but the last is full, and
    /// only the filled prefix of the last one exists.
    pub fn finish(self) -> ResultSet {
        let mut rows = Vec::with_capacity(self.len);
        for chunk in self.chunks {
            rows.extend(chunk);
        }
        debug_assert_eq!(rows.len(), self.len);
        ResultSet::from_rows(rows)
    }
}

impl Index<usize> for ResultSet {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

//! Chunked accumulation of an unbounded row stream.
//!
//! A forward-only cursor does not know its row count until it is exhausted,
//! so rows are collected into fixed-capacity chunks linked in creation
//! order. Appends never move earlier rows; the single copy happens when the
//! chain is flattened by [`ChunkedAccumulator::finish`].

use std::num::NonZeroUsize;

use tracing::{debug, trace, warn};

use crate::cursor::Cursor;
use crate::result::ResultSet;
use crate::row::{Row, assemble_row};

/// Default chunk capacity, in rows.
pub const DEFAULT_CHUNK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(5000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Growable sequence of fixed-capacity row chunks.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use rsqlite_core::{ChunkedAccumulator, Row};
///
/// let mut acc = ChunkedAccumulator::new(NonZeroUsize::new(3).unwrap());
/// for _ in 0..7 {
///     acc.push(Row::default());
/// }
/// assert_eq!(acc.chunk_lens(), vec![3, 3, 1]);
///
/// let result = acc.finish();
/// assert_eq!(result.len(), 7);
/// ```
#[derive(Debug)]
pub struct ChunkedAccumulator {
    pub(crate) capacity: NonZeroUsize,
    pub(crate) chunks: Vec<Vec<Row>>,
    pub(crate) len: usize,
}

impl ChunkedAccumulator {
    /// Creates an accumulator holding one empty chunk of `capacity` rows.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            chunks: vec![Vec::with_capacity(capacity.get())],
            len: 0,
        }
    }

    /// Appends a row, linking a fresh chunk first if the current one is full.
    pub fn push(&mut self, row: Row) {
        let capacity = self.capacity.get();
        let needs_chunk = self
            .chunks
            .last()
            .is_none_or(|chunk| chunk.len() == capacity);
        if needs_chunk {
            trace!(chunk = self.chunks.len(), capacity, "linking new chunk");
            self.chunks.push(Vec::with_capacity(capacity));
        }
        if let Some(chunk) = self.chunks.last_mut() {
            chunk.push(row);
            self.len += 1;
        }
    }

    /// Total rows appended so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Fill count of every chunk, in link order.
    pub fn chunk_lens(&self) -> Vec<usize> {
        self.chunks.iter().map(Vec::len).collect()
    }
}

/// A finished result set together with the chunk layout that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct Materialized {
    pub result: ResultSet,
    pub chunk_lens: Vec<usize>,
}

/// Drives `cursor` to exhaustion and returns every row it produced.
///
/// All or nothing: if the cursor fails at any step, the rows collected so
/// far are dropped and the cursor's error is returned.
///
/// There is no cap on the number of rows; the whole result is held in
/// memory.
pub fn materialize<C>(cursor: &mut C, capacity: NonZeroUsize) -> Result<ResultSet, C::Error>
where
    C: Cursor + ?Sized,
{
    materialize_with_stats(cursor, capacity).map(|m| m.result)
}

/// Like [`materialize`], also reporting the fill count of every chunk.
pub fn materialize_with_stats<C>(
    cursor: &mut C,
    capacity: NonZeroUsize,
) -> Result<Materialized, C::Error>
where
    C: Cursor + ?Sized,
{
    let columns = (0..cursor.column_count())
        .map(|index| cursor.column_name(index).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;

    let mut acc = ChunkedAccumulator::new(capacity);
    loop {
        let row = match cursor.advance() {
            Ok(Some(cells)) => assemble_row(&cells, &columns),
            Ok(None) => break,
            Err(err) => Err(err),
        };
        match row {
            Ok(row) => acc.push(row),
            Err(err) => {
                warn!(
                    rows_discarded = acc.len(),
                    chunks_discarded = acc.chunk_count(),
                    "cursor failed mid-stream; discarding partial result"
                );
                return Err(err);
            }
        }
    }

    let chunk_lens = acc.chunk_lens();
    debug!(
        rows = acc.len(),
        columns = columns.len(),
        chunks = chunk_lens.len(),
        "cursor exhausted"
    );
    Ok(Materialized {
        result: acc.finish(),
        chunk_lens,
    })
}

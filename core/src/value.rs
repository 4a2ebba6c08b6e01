//! Cell-to-host value coercion.
//!
//! The embedded engine types values per cell, not per column, so every cell
//! read off a cursor carries its own tag. This module maps that tag onto the
//! closed set of [`HostValue`] kinds callers work with.
//!
//! # Known limitation
//!
//! BLOB cells have no host representation and coerce to [`HostValue::Null`].
//! Callers that need binary data have to `hex()` or `CAST` it in SQL.

use std::fmt;

use serde::Serialize;

/// One column value at the cursor's current row, borrowed from the engine.
///
/// The tag is resolved independently for each row: the same column can be
/// `Integer` in one row and `Null` in the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float.
    Float(f64),
    /// Text as stored by the engine (expected to be UTF-8).
    Text(&'a [u8]),
    /// Binary blob.
    Blob(&'a [u8]),
    /// SQL `NULL`.
    Null,
}

/// Kind of a [`HostValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
    Null,
}

/// A coerced, owned cell value.
///
/// Serializes untagged: numbers as JSON numbers, text as a string and
/// `Null` as `null`.
///
/// # Examples
///
/// ```
/// use rsqlite_core::{Cell, HostValue, coerce};
///
/// assert_eq!(coerce(Cell::Integer(7)), HostValue::Integer(7));
/// assert_eq!(coerce(Cell::Text(b"abc")), HostValue::Text("abc".into()));
/// assert_eq!(coerce(Cell::Blob(&[0xde, 0xad])), HostValue::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HostValue {
    Integer(i64),
    Float(f64),
    Text(String),
    /// SQL `NULL`, and every BLOB.
    Null,
}

/// Coerces one cell into exactly one [`HostValue`]. Never fails.
pub fn coerce(cell: Cell<'_>) -> HostValue {
    match cell {
        Cell::Integer(i) => HostValue::Integer(i),
        Cell::Float(f) => HostValue::Float(f),
        Cell::Text(bytes) => HostValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        Cell::Null | Cell::Blob(_) => HostValue::Null,
    }
}

impl From<Cell<'_>> for HostValue {
    fn from(cell: Cell<'_>) -> Self {
        coerce(cell)
    }
}

impl HostValue {
    /// Returns the payload-free kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            HostValue::Integer(_) => ValueKind::Integer,
            HostValue::Float(_) => ValueKind::Float,
            HostValue::Text(_) => ValueKind::Text,
            HostValue::Null => ValueKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HostValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::Float(f) => Some(*f),
            HostValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Integer(i) => write!(f, "{i}"),
            HostValue::Float(v) => write!(f, "{v}"),
            HostValue::Text(s) => f.write_str(s),
            HostValue::Null => f.write_str("NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_is_total_over_cell_tags() {
        let cells = [
            Cell::Integer(-3),
            Cell::Float(2.5),
            Cell::Text(b"hello"),
            Cell::Null,
            Cell::Blob(b"\x00\x01"),
        ];
        let kinds: Vec<ValueKind> = cells.into_iter().map(|c| coerce(c).kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Integer,
                ValueKind::Float,
                ValueKind::Text,
                ValueKind::Null,
                ValueKind::Null,
            ]
        );
    }

    #[test]
    fn test_integer_keeps_full_width() {
        assert_eq!(coerce(Cell::Integer(i64::MAX)), HostValue::Integer(i64::MAX));
        assert_eq!(coerce(Cell::Integer(i64::MIN)).as_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_text_with_invalid_utf8_degrades_instead_of_failing() {
        let value = coerce(Cell::Text(b"ok\xff"));
        assert_eq!(value.as_str(), Some("ok\u{fffd}"));
    }

    #[test]
    fn test_empty_text_and_empty_blob() {
        assert_eq!(coerce(Cell::Text(b"")), HostValue::Text(String::new()));
        assert!(coerce(Cell::Blob(b"")).is_null());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(HostValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(HostValue::Float(0.5).as_i64(), None);
        assert_eq!(HostValue::Null.as_str(), None);
        assert_eq!(HostValue::Text("x".into()).to_string(), "x");
        assert_eq!(HostValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_serializes_untagged() {
        let values = vec![
            HostValue::Integer(1),
            HostValue::Float(1.5),
            HostValue::Text("a".into()),
            HostValue::Null,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1,1.5,"a",null]"#);
    }
}

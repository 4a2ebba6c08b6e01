//! Named, ordered records built from one cursor position.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cursor::RowCells;
use crate::value::{HostValue, coerce};

/// One result row: `(column name, value)` pairs in `SELECT` order.
///
/// Each row carries its own column names so it can be handed around as a
/// self-contained record.
///
/// # Examples
///
/// ```
/// use rsqlite_core::{HostValue, Row};
///
/// let row = Row::new(vec![
///     ("x".to_string(), HostValue::Integer(1)),
///     ("y".to_string(), HostValue::Text("a".into())),
/// ]);
/// assert_eq!(row.len(), 2);
/// assert_eq!(row.get("y"), Some(&HostValue::Text("a".into())));
/// assert_eq!(row.names().collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, HostValue)>,
}

impl Row {
    pub fn new(fields: Vec<(String, HostValue)>) -> Self {
        Self { fields }
    }

    /// Number of fields (always the column count of the query).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by column name.
    ///
    /// SQL allows duplicate result column names; the first match wins.
    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Returns the value at a column position.
    pub fn value(&self, index: usize) -> Option<&HostValue> {
        self.fields.get(index).map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &HostValue> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builds one [`Row`] from the cells at the cursor's current position.
///
/// `columns` is the query's schema snapshot; its length fixes the field
/// count of every row in the result set.
pub fn assemble_row<R>(cells: &R, columns: &[String]) -> Result<Row, R::Error>
where
    R: RowCells + ?Sized,
{
    let mut fields = Vec::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        let value = coerce(cells.cell(index)?);
        fields.push((name.clone(), value));
    }
    Ok(Row { fields })
}

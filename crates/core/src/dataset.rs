//! Tabular transaction dataset with stable row identity.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SiftError;
use crate::value::FieldValue;

/// Stable identity of a row: its position in the original sequence.
///
/// Violations and metrics re-select rows by this identity, never by cell
/// values, so it must survive every sort/partition a consumer performs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row: stable id plus cells aligned with the dataset's column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub values: Vec<FieldValue>,
}

/// An ordered sequence of rows sharing a fixed column schema.
///
/// Columns keep insertion order. Consumers treat a dataset as read-only once
/// built; nothing here mutates rows in place.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: IndexSet<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given column schema.
    pub fn new<I, S>(columns: I) -> Result<Self, SiftError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for name in columns {
            let name = name.into();
            if set.contains(&name) {
                return Err(SiftError::Dataset(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
            set.insert(name);
        }
        Ok(Self {
            columns: set,
            rows: Vec::new(),
        })
    }

    /// Append a row, assigning it the next [`RowId`]. Width must match the
    /// column schema.
    pub fn push_row(&mut self, values: Vec<FieldValue>) -> Result<RowId, SiftError> {
        if values.len() != self.columns.len() {
            return Err(SiftError::Dataset(format!(
                "row width {} does not match {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        let id = RowId(self.rows.len());
        self.rows.push(Row { id, values });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in schema order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0)
    }

    /// Cell lookup by row identity and column name.
    pub fn value(&self, id: RowId, column: &str) -> Option<&FieldValue> {
        let index = self.column_index(column)?;
        self.rows.get(id.0)?.values.get(index)
    }

    /// Walk one column top to bottom. A missing column yields nothing.
    pub fn column_values<'a>(
        &'a self,
        column: &str,
    ) -> impl Iterator<Item = (RowId, &'a FieldValue)> + 'a {
        let index = self.column_index(column);
        self.rows.iter().filter_map(move |row| {
            index
                .and_then(|i| row.values.get(i))
                .map(|value| (row.id, value))
        })
    }
}

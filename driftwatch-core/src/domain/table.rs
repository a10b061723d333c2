// driftwatch-core/src/domain/table.rs
//
// In-memory tabular result set: an ordered list of named columns, each
// holding a vector of dynamically typed values. Produced per query by a
// Connector, inspected or handed to the validation layer, then discarded.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A single cell value. The engine decides the physical type; we only keep
/// what the validation layer can reason about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, used by range predicates.
    /// Text and booleans are NOT coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn empty() -> Self {
        Self { columns: vec![] }
    }

    /// Builds a table from columns, rejecting ragged shapes early so the
    /// validation layer can trust row counts.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, DomainError> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for col in &columns {
                if col.values.len() != expected {
                    return Err(DomainError::MalformedTable {
                        column: col.name.clone(),
                        expected,
                        actual: col.values.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a column by name. Exact match wins; unquoted identifiers come
    /// back lowercased from the engine, so fall back to a case-insensitive
    /// match like interactive users expect.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    /// One row of the table, as references in column order.
    pub fn row(&self, idx: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[idx]).collect()
    }

    /// The first `n` rows, keeping all columns. The classic `.head()` used to
    /// eyeball a result before validating it.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.iter().take(n).cloned().collect(),
                })
                .collect(),
        }
    }
}

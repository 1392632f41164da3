//! # Raw Cells and Rows
//!
//! The loader consumes rows of plain scalar cells. Sources produce them;
//! nothing here knows about files or spreadsheets.

use serde::{Deserialize, Serialize};

use nuts_core::ValidationError;

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// No value.
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Whether the cell counts as missing: empty, or a zero-length string.
    ///
    /// Whitespace is a value. It reaches validation like any other text.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the cell as text for a string field.
    ///
    /// Integral floats render without a fractional part, since spreadsheet
    /// readers report every number as a float.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Interpret the cell as a hierarchy level.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFormat`] for `level` unless the cell
    /// holds an integer, an integral float, or text parsing as an integer.
    pub fn to_level(&self) -> Result<i64, ValidationError> {
        let parsed = match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| ValidationError::InvalidFormat {
            field: "level",
            value: self.to_text(),
        })
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// One row of cells together with its position in the source.
///
/// `number` is 1-based and is what error messages report; spreadsheet
/// sources use the worksheet row number, so header rows count.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub number: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(number: usize, cells: Vec<Cell>) -> Self {
        Self { number, cells }
    }

    /// Number rows consecutively from 1.
    pub fn numbered(rows: impl IntoIterator<Item = Vec<Cell>>) -> Vec<Row> {
        rows.into_iter()
            .enumerate()
            .map(|(i, cells)| Row::new(i + 1, cells))
            .collect()
    }
}

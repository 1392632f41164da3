//! # Row Sources
//!
//! A [`RowSource`] hands out the rows of a named sheet. It is the only
//! seam between the loader and wherever the data actually lives; the
//! loader never opens files itself.

use std::collections::HashMap;

use crate::cell::{Cell, Row};
use crate::error::{LoadError, LoadResult};

/// Supplies the rows of a named sheet, in source order.
///
/// Cell positions must line up with the region field order
/// (`country_code`, `code`, `label`, `level`). Sources skip their own
/// header rows; every returned row is a data row.
pub trait RowSource {
    /// Read every data row of `sheet`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SheetNotFound`] if the source has no such sheet,
    /// or a source-specific error if it cannot be read.
    fn read_sheet(&mut self, sheet: &str) -> LoadResult<Vec<Row>>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn read_sheet(&mut self, sheet: &str) -> LoadResult<Vec<Row>> {
        (**self).read_sheet(sheet)
    }
}

/// Rows held in memory, keyed by sheet name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, numbering its rows from 1. Replaces any sheet with the
    /// same name.
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        self.sheets.insert(name.into(), Row::numbered(rows));
        self
    }
}

impl RowSource for MemorySource {
    fn read_sheet(&mut self, sheet: &str) -> LoadResult<Vec<Row>> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound {
                sheet: sheet.to_string(),
            })
    }
}

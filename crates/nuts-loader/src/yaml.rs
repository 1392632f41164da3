//! # YAML Row Source
//!
//! Bundled region tables in YAML. The document maps sheet names to lists
//! of rows; each row is either a positional sequence or a mapping keyed
//! by field name:
//!
//! ```yaml
//! NUTS2024:
//!   - [AT, AT1, Ostösterreich, 1]
//!   - country_code: AT
//!     code: AT12
//!     label: Niederösterreich
//!     level: 2
//! ```
//!
//! Named rows are laid out in field order; absent fields become empty
//! cells (and the row is then skipped as incomplete). Keys that are not
//! region fields, such as a stale `parent_code`, are ignored.

use std::collections::BTreeMap;
use std::path::Path;

use nuts_core::Field;
use serde::Deserialize;

use crate::cell::{Cell, Row};
use crate::error::{read_file, LoadError, LoadResult};
use crate::source::RowSource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YamlRow {
    Positional(Vec<Cell>),
    Named(BTreeMap<String, Cell>),
}

impl YamlRow {
    fn into_cells(self) -> Vec<Cell> {
        match self {
            Self::Positional(cells) => cells,
            Self::Named(mut map) => Field::all()
                .iter()
                .map(|field| map.remove(field.as_str()).unwrap_or(Cell::Empty))
                .collect(),
        }
    }
}

/// Rows parsed from a YAML document, keyed by sheet name.
#[derive(Debug, Clone)]
pub struct YamlSource {
    sheets: BTreeMap<String, Vec<Row>>,
}

impl YamlSource {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> LoadResult<Self> {
        let raw: BTreeMap<String, Vec<YamlRow>> = serde_yaml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    /// Load and parse a YAML file.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let bytes = read_file(path)?;
        let raw: BTreeMap<String, Vec<YamlRow>> =
            serde_yaml::from_slice(&bytes).map_err(|e| LoadError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::debug!(path = %path.display(), sheets = raw.len(), "parsed YAML region source");
        Ok(Self::from_raw(raw))
    }

    /// Sheet names present in the document.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    fn from_raw(raw: BTreeMap<String, Vec<YamlRow>>) -> Self {
        let sheets = raw
            .into_iter()
            .map(|(name, rows)| (name, Row::numbered(rows.into_iter().map(YamlRow::into_cells))))
            .collect();
        Self { sheets }
    }
}

impl RowSource for YamlSource {
    fn read_sheet(&mut self, sheet: &str) -> LoadResult<Vec<Row>> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound {
                sheet: sheet.to_string(),
            })
    }
}

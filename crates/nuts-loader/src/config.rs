//! # Loader Configuration
//!
//! Which sheets to read, which scheme each sheet holds, how many columns
//! and header rows to consider, and what to do with a row that fails
//! validation. Every field has a default matching the published
//! NUTS 2024 workbook, so an empty YAML document is a valid config.
//!
//! ```yaml
//! sheets:
//!   - name: NUTS2024
//!     scheme: nuts
//!   - name: Statistical Regions
//!     scheme: statistical_region
//! max_data_col: 4
//! header_rows: 1
//! row_policy: fail_fast
//! sha256: 3df559906175180d58a2a283985fb632b799b4cbe034e92515295064a9f2c01e
//! ```

use std::path::Path;

use nuts_core::{Field, Scheme};
use serde::{Deserialize, Serialize};

use crate::error::{read_file, LoadError, LoadResult};

/// Number of columns read from each row of the published workbook.
pub const DEFAULT_MAX_DATA_COL: usize = 4;
/// Header rows at the top of each published sheet.
pub const DEFAULT_HEADER_ROWS: usize = 1;

/// What to do when a complete row fails region validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Abort the whole load on the first invalid row.
    #[default]
    FailFast,
    /// Log the row at `warn` and continue.
    Skip,
}

/// A sheet to read and the scheme its rows belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    pub scheme: Scheme,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>, scheme: Scheme) -> Self {
        Self {
            name: name.into(),
            scheme,
        }
    }
}

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Sheets in load order.
    pub sheets: Vec<SheetSpec>,
    /// Columns considered per row; cells beyond this are ignored.
    pub max_data_col: usize,
    /// Rows skipped at the top of spreadsheet sheets.
    pub header_rows: usize,
    pub row_policy: RowPolicy,
    /// Expected SHA-256 of the workbook file, lowercase hex.
    pub sha256: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sheets: Scheme::all()
                .iter()
                .map(|scheme| SheetSpec::new(scheme.default_sheet(), *scheme))
                .collect(),
            max_data_col: DEFAULT_MAX_DATA_COL,
            header_rows: DEFAULT_HEADER_ROWS,
            row_policy: RowPolicy::default(),
            sha256: None,
        }
    }
}

impl LoaderConfig {
    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> LoadResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn from_yaml_file(path: &Path) -> LoadResult<Self> {
        let bytes = read_file(path)?;
        let config: Self = serde_yaml::from_slice(&bytes).map_err(|e| LoadError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }

    pub fn with_sheets(mut self, sheets: Vec<SheetSpec>) -> Self {
        self.sheets = sheets;
        self
    }

    /// Check that the configuration can produce regions at all.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidConfig`] if no sheets are listed, a sheet
    /// is listed twice, or fewer columns are read than a region has fields.
    pub fn validate(&self) -> LoadResult<()> {
        if self.sheets.is_empty() {
            return Err(LoadError::InvalidConfig("no sheets configured".to_string()));
        }
        for (i, sheet) in self.sheets.iter().enumerate() {
            if self.sheets[..i].iter().any(|s| s.name == sheet.name) {
                return Err(LoadError::InvalidConfig(format!(
                    "sheet {:?} listed more than once",
                    sheet.name
                )));
            }
        }
        let fields = Field::all().len();
        if self.max_data_col < fields {
            return Err(LoadError::InvalidConfig(format!(
                "max_data_col is {} but a region needs {fields} columns",
                self.max_data_col
            )));
        }
        Ok(())
    }
}

//! # Region Loader
//!
//! Turns the rows of each configured sheet into validated [`Region`]s.
//!
//! ## Row handling
//!
//! - Only the first `max_data_col` cells of a row are considered.
//! - A row with any missing cell in that window is incomplete and is
//!   skipped silently (logged at `debug`). Blank separator rows and
//!   footnotes in the published workbook fall in this bucket.
//! - A complete row that fails validation is handled per
//!   [`RowPolicy`]: `FailFast` aborts the load with
//!   [`LoadError::InvalidRow`]; `Skip` logs at `warn` and moves on.

use nuts_core::{Field, Region, Scheme, ValidationError};

use crate::cell::{Cell, Row};
use crate::config::{LoaderConfig, RowPolicy, SheetSpec};
use crate::error::{LoadError, LoadResult};
use crate::source::RowSource;

/// Converts raw rows into regions according to a [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load every configured sheet, in configuration order.
    ///
    /// The returned regions keep source row order within each sheet and
    /// sheet order across sheets.
    ///
    /// # Errors
    ///
    /// Returns the first source error, or the first invalid row under
    /// [`RowPolicy::FailFast`]. Nothing is returned on failure.
    pub fn load_all<S: RowSource + ?Sized>(&self, source: &mut S) -> LoadResult<Vec<Region>> {
        self.config.validate()?;
        let mut regions = Vec::new();
        for sheet in &self.config.sheets {
            let loaded = self.load_sheet(source, sheet)?;
            regions.extend(loaded);
        }
        tracing::info!(
            total = regions.len(),
            nuts = regions.iter().filter(|r| r.scheme() == Scheme::Nuts).count(),
            statistical_regions = regions
                .iter()
                .filter(|r| r.scheme() == Scheme::StatisticalRegion)
                .count(),
            "loaded regions"
        );
        Ok(regions)
    }

    /// Load a single sheet as the given scheme.
    pub fn load_sheet<S: RowSource + ?Sized>(
        &self,
        source: &mut S,
        sheet: &SheetSpec,
    ) -> LoadResult<Vec<Region>> {
        let rows = source.read_sheet(&sheet.name)?;
        let mut regions = Vec::with_capacity(rows.len());
        let mut incomplete = 0usize;
        let mut rejected = 0usize;

        for row in &rows {
            match self.map_row(sheet.scheme, row) {
                Ok(Some(region)) => regions.push(region),
                Ok(None) => {
                    incomplete += 1;
                    tracing::debug!(sheet = %sheet.name, row = row.number, "skipping incomplete row");
                }
                Err(source) => match self.config.row_policy {
                    RowPolicy::FailFast => {
                        return Err(LoadError::InvalidRow {
                            sheet: sheet.name.clone(),
                            row: row.number,
                            source,
                        });
                    }
                    RowPolicy::Skip => {
                        rejected += 1;
                        tracing::warn!(
                            sheet = %sheet.name,
                            row = row.number,
                            error = %source,
                            "skipping invalid row"
                        );
                    }
                },
            }
        }

        tracing::debug!(
            sheet = %sheet.name,
            scheme = %sheet.scheme,
            loaded = regions.len(),
            incomplete,
            rejected,
            "loaded sheet"
        );
        Ok(regions)
    }

    /// Map one row onto a region. `Ok(None)` means the row is incomplete.
    fn map_row(&self, scheme: Scheme, row: &Row) -> Result<Option<Region>, ValidationError> {
        let window = &row.cells[..row.cells.len().min(self.config.max_data_col)];
        if window.len() < Field::all().len() || window.iter().any(Cell::is_missing) {
            return Ok(None);
        }
        row_to_region(scheme, window).map(Some)
    }
}

/// Build a region from positional cells in field order
/// (`country_code`, `code`, `label`, `level`).
///
/// Cells past the fourth are ignored. The caller is responsible for
/// deciding whether a row is complete.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] if `level` is not an integer,
/// plus anything [`Region::new`] rejects. A short row reports the first
/// absent field as malformed.
pub fn row_to_region(scheme: Scheme, cells: &[Cell]) -> Result<Region, ValidationError> {
    let country_code = cell_at(cells, Field::CountryCode)?.to_text();
    let code = cell_at(cells, Field::Code)?.to_text();
    let label = cell_at(cells, Field::Label)?.to_text();
    let level = cell_at(cells, Field::Level)?.to_level()?;
    Region::new(scheme, country_code, code, label, level)
}

// Field discriminants follow declaration order, which is the column order.
fn cell_at(cells: &[Cell], field: Field) -> Result<&Cell, ValidationError> {
    cells.get(field as usize).ok_or(ValidationError::InvalidFormat {
        field: field.as_str(),
        value: String::new(),
    })
}

//! # Spreadsheet Row Source
//!
//! Reads the published classification workbook (xlsx, xls, xlsb, ods)
//! through calamine. Each configured sheet is read in full; the leading
//! header rows are dropped and row numbers are reported as worksheet rows.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::cell::{Cell, Row};
use crate::config::LoaderConfig;
use crate::digest::verify_sha256;
use crate::error::{LoadError, LoadResult};
use crate::source::RowSource;

/// A workbook opened for reading.
pub struct XlsxSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    header_rows: usize,
}

impl std::fmt::Debug for XlsxSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxSource")
            .field("path", &self.path)
            .field("header_rows", &self.header_rows)
            .finish_non_exhaustive()
    }
}

impl XlsxSource {
    /// Open a workbook, skipping `header_rows` rows at the top of each sheet.
    pub fn open(path: &Path, header_rows: usize) -> LoadResult<Self> {
        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let workbook = open_workbook_auto(path).map_err(|e| LoadError::Spreadsheet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            header_rows,
        })
    }

    /// Verify the workbook against a pinned SHA-256, then open it.
    pub fn open_verified(path: &Path, header_rows: usize, sha256: &str) -> LoadResult<Self> {
        verify_sha256(path, sha256)?;
        Self::open(path, header_rows)
    }

    /// Open a workbook using the header rows and optional digest from `config`.
    pub fn from_config(path: &Path, config: &LoaderConfig) -> LoadResult<Self> {
        match &config.sha256 {
            Some(digest) => Self::open_verified(path, config.header_rows, digest),
            None => Self::open(path, config.header_rows),
        }
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }
}

impl RowSource for XlsxSource {
    fn read_sheet(&mut self, sheet: &str) -> LoadResult<Vec<Row>> {
        if !self.workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(LoadError::SheetNotFound {
                sheet: sheet.to_string(),
            });
        }
        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| LoadError::Spreadsheet {
                path: self.path.clone(),
                reason: format!("sheet {sheet:?}: {e}"),
            })?;

        // The used range need not start at A1.
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let leading = vec![Cell::Empty; start_col as usize];

        let rows = range
            .rows()
            .enumerate()
            .filter_map(|(offset, data)| {
                let row_idx = start_row as usize + offset;
                if row_idx < self.header_rows {
                    return None;
                }
                let mut cells = leading.clone();
                cells.extend(data.iter().map(data_to_cell));
                Some(Row::new(row_idx + 1, cells))
            })
            .collect();
        Ok(rows)
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(n) => Cell::Int(*n),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}

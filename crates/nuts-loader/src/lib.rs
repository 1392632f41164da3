//! # nuts-loader — Rows In, Regions Out
//!
//! Maps raw tabular rows onto validated [`nuts_core::Region`] records,
//! one classification scheme per sheet.
//!
//! - **Sources** (`source.rs`, `yaml.rs`, `xlsx.rs`): the [`RowSource`]
//!   trait and its adapters. The loader only ever sees rows of scalar
//!   cells.
//! - **Loader** (`loader.rs`): skips incomplete rows, maps cells onto
//!   region fields, and applies the configured [`RowPolicy`] to rows that
//!   fail validation.
//! - **Integrity** (`digest.rs`): SHA-256 pinning of the workbook file.
//!
//! ## Crate Policy
//!
//! - Depends only on `nuts-core` internally.
//! - A load either returns every accepted region or an error; it never
//!   returns a partial table.

pub mod cell;
pub mod config;
pub mod digest;
pub mod error;
pub mod loader;
pub mod source;
#[cfg(feature = "xlsx")]
pub mod xlsx;
pub mod yaml;

pub use cell::{Cell, Row};
pub use config::{LoaderConfig, RowPolicy, SheetSpec};
pub use digest::verify_sha256;
pub use error::{LoadError, LoadResult};
pub use loader::{row_to_region, Loader};
pub use source::{MemorySource, RowSource};
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxSource;
pub use yaml::YamlSource;

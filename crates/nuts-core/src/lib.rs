//! # nuts-core — Foundational Types for NUTS Regions
//!
//! This crate defines the validated record model shared by the loader and
//! the store. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for codes.** `CountryCode` and `RegionCode` have
//!    validating constructors and validating `Deserialize` impls. No bare
//!    strings for identifiers.
//!
//! 2. **Construction is validation.** `Region::new()` runs every format and
//!    consistency check and is the only way to obtain a `Region`. There are
//!    no setters.
//!
//! 3. **One record type, tagged by scheme.** NUTS regions and statistical
//!    regions share `Region`; the `Scheme` tag keeps them apart in equality,
//!    hashing, and grouping.
//!
//! 4. **Derived parent codes.** `parent_code` is computed from `code` and
//!    `level`, never supplied by callers.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `nuts-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod identity;
pub mod level;
pub mod region;
pub mod scheme;

// Re-export primary types for ergonomic imports.
pub use error::{NutsError, QueryError, ValidationError};
pub use field::{Field, Scalar};
pub use identity::{CountryCode, RegionCode};
pub use level::Level;
pub use region::{Region, RegionRecord};
pub use scheme::Scheme;

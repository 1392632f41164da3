//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by every crate in the workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Validation errors name the offending field and carry the raw value
//!   that was rejected.
//! - Consistency errors carry every field that took part in the
//!   cross-field check.
//! - Query errors are raised before any lookup runs. An empty match set
//!   is never an error.

use thiserror::Error;

/// Top-level error type for the region library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NutsError {
    /// A region record failed construction.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A query was structurally invalid.
    #[error("query error: {0}")]
    Query(#[from] QueryError),
}

/// Error raised when a region record violates one of its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field's raw value does not have its required shape.
    #[error("invalid format for {field}: {value:?}")]
    InvalidFormat {
        /// Name of the field that was rejected.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// `code`, `country_code`, and `level` do not agree with each other.
    #[error(
        "inconsistent code {code:?}: expected prefix {country_code:?} and length {}",
        country_code.len() + *level as usize
    )]
    InconsistentCode {
        /// The region's country code.
        country_code: String,
        /// The region code that failed the check.
        code: String,
        /// The declared hierarchy level.
        level: u8,
    },
}

impl ValidationError {
    pub(crate) fn format(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            value: value.into(),
        }
    }
}

/// Error raised when a query is structurally invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query carried no filters at all.
    #[error("query requires at least one filter")]
    EmptyQuery,

    /// A filter referenced a field that regions do not have.
    #[error("unknown field {0:?}; expected one of country_code, code, label, level")]
    UnknownField(String),

    /// A filter value was neither a scalar nor a homogeneous list of scalars.
    #[error("invalid value for filter {field:?}: {reason}")]
    InvalidFilterValue {
        /// The field the filter targeted.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

//! # Queryable Fields and Scalar Values
//!
//! [`Field`] names the region attributes a query may filter on, and
//! [`Scalar`] is the value type those attributes compare against. Text
//! fields hold [`Scalar::Str`], `level` holds [`Scalar::Int`]; the two
//! never compare equal, so a filter of `level = "2"` matches nothing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::QueryError;

/// A region attribute that can appear in a query filter.
///
/// `parent_code` and the scheme tag are not queryable; use
/// `RegionStore::by_scheme` for scheme-scoped views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Two-letter country prefix.
    CountryCode,
    /// Full region code.
    Code,
    /// Display name.
    Label,
    /// Hierarchy depth.
    Level,
}

impl Field {
    /// All queryable fields in declaration order, which is also the
    /// positional order of cells in a source row.
    pub fn all() -> &'static [Field] {
        &[Self::CountryCode, Self::Code, Self::Label, Self::Level]
    }

    /// Returns the snake_case field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountryCode => "country_code",
            Self::Code => "code",
            Self::Label => "label",
            Self::Level => "level",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country_code" => Ok(Self::CountryCode),
            "code" => Ok(Self::Code),
            "label" => Ok(Self::Label),
            "level" => Ok(Self::Level),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

/// A single comparable field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Text value.
    Str(String),
    /// Integer value.
    Int(i64),
}

impl Scalar {
    /// Returns the text value, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Returns the integer value, if this is an integer scalar.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Name of the scalar kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

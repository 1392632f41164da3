//! # Code Newtypes
//!
//! Validated wrappers for the two identifier shapes in the classification:
//! the two-letter country prefix and the full hierarchical region code.
//! Neither can be constructed from a malformed string, so any code held
//! by a [`Region`](crate::Region) is known to be well-formed.
//!
//! ## Format
//!
//! - [`CountryCode`]: `^[A-Z]{2}$`
//! - [`RegionCode`]: `^[A-Z]{2}[A-Z0-9]{1,3}$`. The suffix may carry `Z`
//!   as a placeholder for extra-regio units (e.g. `ATZ`, `ATZZ`).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest valid region code (country prefix plus one character).
pub const MIN_REGION_CODE_LEN: usize = 3;
/// Longest valid region code (country prefix plus three characters).
pub const MAX_REGION_CODE_LEN: usize = 5;

/// Placeholder character marking extra-regio units.
pub const EXTRA_REGIO_MARKER: char = 'Z';

fn is_country_prefix(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_region_code(s: &str) -> bool {
    let bytes = s.as_bytes();
    (MIN_REGION_CODE_LEN..=MAX_REGION_CODE_LEN).contains(&bytes.len())
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

// -- Validating Deserialize ---------------------------------------------------

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Two-letter uppercase country code (e.g. `"AT"`, `"PT"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and wrap a country code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFormat`] unless the value is exactly
    /// two uppercase ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if is_country_prefix(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::format("country_code", value))
        }
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hierarchical region code: a country prefix followed by one to three
/// uppercase alphanumeric characters (e.g. `"AT1"`, `"PT1C"`, `"AT127"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Validate and wrap a region code, reporting failures against `code`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse_field("code", value.into())
    }

    /// Validate a code on behalf of a specific field, so that a malformed
    /// derived parent is reported as `parent_code` rather than `code`.
    pub(crate) fn parse_field(
        field: &'static str,
        value: String,
    ) -> Result<Self, ValidationError> {
        if is_region_code(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::format(field, value))
        }
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter prefix of this code.
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }

    /// The alphanumeric part following the prefix.
    pub fn suffix(&self) -> &str {
        &self.0[2..]
    }

    /// Number of characters in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a validated code has at least three characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

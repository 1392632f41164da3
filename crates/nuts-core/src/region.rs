//! # Region Record
//!
//! [`Region`] is the single record type for every territorial unit,
//! whichever classification it comes from. Construction runs every
//! structural check up front; a `Region` value that exists is valid, and
//! it exposes no way to change its fields afterwards.
//!
//! ## Construction checks, in order
//!
//! 1. `country_code` is two uppercase letters.
//! 2. `code` is a two-letter prefix plus one to three uppercase
//!    alphanumerics.
//! 3. `level` is 1, 2, or 3.
//! 4. `parent_code` is derived (absent at level 1, otherwise `code`
//!    minus its last character) and must itself have the code shape.
//! 5. `code` starts with `country_code` and is exactly
//!    `len(country_code) + level` characters long.
//!
//! Checks 1–4 fail with [`ValidationError::InvalidFormat`], check 5 with
//! [`ValidationError::InconsistentCode`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::field::{Field, Scalar};
use crate::identity::{CountryCode, RegionCode, EXTRA_REGIO_MARKER};
use crate::level::Level;
use crate::scheme::Scheme;

/// One validated territorial unit.
///
/// Equality and hashing cover every stored field, the scheme tag
/// included, so regions can be collected into sets and used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RegionRecord", into = "RegionRecord")]
pub struct Region {
    scheme: Scheme,
    country_code: CountryCode,
    code: RegionCode,
    label: String,
    level: Level,
    parent_code: Option<RegionCode>,
}

impl Region {
    /// Build a region from raw field values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFormat`] when a field has the wrong
    /// shape and [`ValidationError::InconsistentCode`] when `code` does not
    /// agree with `country_code` and `level`.
    pub fn new(
        scheme: Scheme,
        country_code: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
        level: i64,
    ) -> Result<Self, ValidationError> {
        let country_code = CountryCode::new(country_code)?;
        let code = RegionCode::new(code)?;
        let level = Level::try_from(level)?;
        let parent_code = derive_parent(&code, level)?;
        check_consistency(&country_code, &code, level)?;

        Ok(Self {
            scheme,
            country_code,
            code,
            label: label.into(),
            level,
            parent_code,
        })
    }

    /// Classification scheme this region belongs to.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    pub fn code(&self) -> &RegionCode {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Code of the enclosing region one level up; `None` at level 1.
    pub fn parent_code(&self) -> Option<&RegionCode> {
        self.parent_code.as_ref()
    }

    /// Whether this is an extra-regio placeholder unit (a `Z` in the suffix).
    pub fn is_extra_regio(&self) -> bool {
        self.code.suffix().contains(EXTRA_REGIO_MARKER)
    }

    /// The value of a queryable field, as an owned scalar.
    pub fn field_value(&self, field: Field) -> Scalar {
        match field {
            Field::CountryCode => Scalar::Str(self.country_code.as_str().to_string()),
            Field::Code => Scalar::Str(self.code.as_str().to_string()),
            Field::Label => Scalar::Str(self.label.clone()),
            Field::Level => Scalar::Int(i64::from(self.level)),
        }
    }

    /// Whether `field` holds exactly `value`. Never allocates.
    pub fn matches(&self, field: Field, value: &Scalar) -> bool {
        match field {
            Field::CountryCode => value.as_str() == Some(self.country_code.as_str()),
            Field::Code => value.as_str() == Some(self.code.as_str()),
            Field::Label => value.as_str() == Some(self.label.as_str()),
            Field::Level => value.as_int() == Some(i64::from(self.level)),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}, level {})",
            self.code, self.label, self.scheme, self.level
        )
    }
}

fn derive_parent(code: &RegionCode, level: Level) -> Result<Option<RegionCode>, ValidationError> {
    if level.parent().is_none() {
        return Ok(None);
    }
    let raw = code.as_str();
    let parent = raw[..raw.len() - 1].to_string();
    RegionCode::parse_field("parent_code", parent).map(Some)
}

fn check_consistency(
    country_code: &CountryCode,
    code: &RegionCode,
    level: Level,
) -> Result<(), ValidationError> {
    let expected_len = country_code.as_str().len() + level.depth() as usize;
    if code.prefix() == country_code.as_str() && code.len() == expected_len {
        Ok(())
    } else {
        Err(ValidationError::InconsistentCode {
            country_code: country_code.to_string(),
            code: code.to_string(),
            level: level.depth(),
        })
    }
}

/// Flat, unvalidated form of a [`Region`] used for (de)serialization.
///
/// Deserializing a `Region` goes through this record and re-runs
/// [`Region::new`], so stored data cannot bypass validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub scheme: Scheme,
    pub country_code: String,
    pub code: String,
    pub label: String,
    pub level: i64,
}

impl TryFrom<RegionRecord> for Region {
    type Error = ValidationError;

    fn try_from(record: RegionRecord) -> Result<Self, Self::Error> {
        Region::new(
            record.scheme,
            record.country_code,
            record.code,
            record.label,
            record.level,
        )
    }
}

impl From<Region> for RegionRecord {
    fn from(region: Region) -> Self {
        Self {
            scheme: region.scheme,
            country_code: region.country_code.to_string(),
            code: region.code.to_string(),
            label: region.label,
            level: i64::from(region.level),
        }
    }
}

//! # Classification Schemes
//!
//! Regions come from two classifications that share the same record
//! shape: the NUTS regions proper and the alternate statistical regions.
//! The scheme tag travels with every [`Region`](crate::Region) and takes
//! part in its equality, so an `AT1` from one scheme is never the same
//! record as an `AT1` from the other.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// The classification a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Standard NUTS statistical regions.
    Nuts,
    /// Statistical regions outside the NUTS hierarchy proper.
    StatisticalRegion,
}

impl Scheme {
    /// Both schemes in load order.
    pub fn all() -> &'static [Scheme] {
        &[Self::Nuts, Self::StatisticalRegion]
    }

    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nuts => "nuts",
            Self::StatisticalRegion => "statistical_region",
        }
    }

    /// Name of the workbook sheet this scheme is published in.
    pub fn default_sheet(&self) -> &'static str {
        match self {
            Self::Nuts => "NUTS2024",
            Self::StatisticalRegion => "Statistical Regions",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nuts" => Ok(Self::Nuts),
            "statistical_region" => Ok(Self::StatisticalRegion),
            other => Err(ValidationError::format("scheme", other)),
        }
    }
}

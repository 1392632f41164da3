//! # Hierarchy Levels
//!
//! The classification has exactly three levels below the country. A
//! region's level fixes the length of its code: one suffix character per
//! level.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Hierarchical depth of a region (1 = largest division, 3 = most granular).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Level {
    /// Major socio-economic regions.
    One = 1,
    /// Basic regions for regional policy.
    Two = 2,
    /// Small regions for specific diagnoses.
    Three = 3,
}

impl Level {
    /// All levels from coarsest to finest.
    pub fn all() -> &'static [Level] {
        &[Self::One, Self::Two, Self::Three]
    }

    /// Numeric depth of this level.
    pub fn depth(self) -> u8 {
        self as u8
    }

    /// The next coarser level, or `None` at level 1.
    pub fn parent(self) -> Option<Level> {
        match self {
            Self::One => None,
            Self::Two => Some(Self::One),
            Self::Three => Some(Self::Two),
        }
    }
}

impl TryFrom<i64> for Level {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|level| i64::from(*level) == value)
            .ok_or_else(|| ValidationError::format("level", value.to_string()))
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.depth() as i64
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.depth())
    }
}

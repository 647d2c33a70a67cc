use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ProfileError;

/// Big Five personality dimensions (OCEAN), in enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitCategory {
    /// Curiosity, imagination, willingness to try new things
    Openness,
    /// Organization, responsibility, self-discipline
    Conscientiousness,
    /// Sociability, assertiveness, energy level
    Extraversion,
    /// Compassion, cooperation, trust
    Agreeableness,
    /// Emotional sensitivity, anxiety, mood swings
    Neuroticism,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 5] = [
        TraitCategory::Openness,
        TraitCategory::Conscientiousness,
        TraitCategory::Extraversion,
        TraitCategory::Agreeableness,
        TraitCategory::Neuroticism,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraitCategory::Openness => "Openness",
            TraitCategory::Conscientiousness => "Conscientiousness",
            TraitCategory::Extraversion => "Extraversion",
            TraitCategory::Agreeableness => "Agreeableness",
            TraitCategory::Neuroticism => "Neuroticism",
        }
    }

    /// Lower-case name used in dominant-pair keys
    pub fn key(&self) -> &'static str {
        match self {
            TraitCategory::Openness => "openness",
            TraitCategory::Conscientiousness => "conscientiousness",
            TraitCategory::Extraversion => "extraversion",
            TraitCategory::Agreeableness => "agreeableness",
            TraitCategory::Neuroticism => "neuroticism",
        }
    }

    /// Position in enumeration order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TraitCategory {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openness" => Ok(TraitCategory::Openness),
            "conscientiousness" => Ok(TraitCategory::Conscientiousness),
            "extraversion" => Ok(TraitCategory::Extraversion),
            "agreeableness" => Ok(TraitCategory::Agreeableness),
            "neuroticism" => Ok(TraitCategory::Neuroticism),
            _ => Err(ProfileError::InvalidCategory(s.to_string())),
        }
    }
}

/// Percentage score (0-100) for one trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTraitScore")]
pub struct TraitScore {
    #[serde(rename = "trait")]
    pub category: TraitCategory,
    pub value: u8,
}

impl TraitScore {
    pub const MAX: u8 = 100;

    /// Build a score, clamping `value` into 0..=100.
    ///
    /// Deserialized scores are not clamped: values outside the range are
    /// rejected as `InvalidTraitValue` instead.
    pub fn new(category: TraitCategory, value: i64) -> Self {
        Self {
            category,
            value: value.clamp(0, Self::MAX as i64) as u8,
        }
    }
}

/// Stored shape of a score, checked before it becomes a `TraitScore`
#[derive(Deserialize)]
struct RawTraitScore {
    #[serde(rename = "trait")]
    category: TraitCategory,
    value: i64,
}

impl TryFrom<RawTraitScore> for TraitScore {
    type Error = ProfileError;

    fn try_from(raw: RawTraitScore) -> Result<Self, Self::Error> {
        if !(0..=Self::MAX as i64).contains(&raw.value) {
            return Err(ProfileError::InvalidTraitValue {
                category: raw.category.name().to_string(),
                value: raw.value,
            });
        }
        Ok(Self::new(raw.category, raw.value))
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ProfileError;
use super::scoring::PersonalityResult;
use super::traits::{TraitCategory, TraitScore};

pub const DEFAULT_EMOJI: &str = "🧠";

/// Snapshot of one completed quiz. Never mutated; a retake creates a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Creation time in milliseconds since the Unix epoch
    pub id: String,

    /// One score per category, in enumeration order
    #[serde(deserialize_with = "unique_traits")]
    pub traits: Vec<TraitScore>,

    pub summary: String,

    pub personality_type: String,

    pub dominant_traits: [TraitCategory; 2],

    pub emoji: String,

    pub created_at: DateTime<Utc>,
}

impl PersonalityProfile {
    pub fn new(result: PersonalityResult) -> Self {
        Self::from_result(result, Utc::now())
    }

    pub fn from_result(result: PersonalityResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id: created_at.timestamp_millis().to_string(),
            traits: result.traits,
            summary: result.summary,
            personality_type: result.personality_type.label().to_string(),
            dominant_traits: result.dominant_traits,
            emoji: DEFAULT_EMOJI.to_string(),
            created_at,
        }
    }

    pub fn trait_value(&self, category: TraitCategory) -> Option<u8> {
        self.traits
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.value)
    }

    /// Points for the radar chart
    pub fn radar_data(&self) -> &[TraitScore] {
        &self.traits
    }

    /// Whether the quiz was taken more than `after_days` days before `now`.
    /// A cutoff outside chrono's range never asks for a retake.
    pub fn needs_retake(&self, now: DateTime<Utc>, after_days: i64) -> bool {
        Duration::try_days(after_days)
            .and_then(|window| now.checked_sub_signed(window))
            .map_or(false, |cutoff| self.created_at < cutoff)
    }
}

fn unique_traits<'de, D>(deserializer: D) -> Result<Vec<TraitScore>, D::Error>
where
    D: Deserializer<'de>,
{
    let traits = Vec::<TraitScore>::deserialize(deserializer)?;
    let mut seen = [false; 5];
    for score in &traits {
        let slot = &mut seen[score.category.index()];
        if *slot {
            return Err(serde::de::Error::custom(ProfileError::DuplicateTrait(
                score.category.name().to_string(),
            )));
        }
        *slot = true;
    }
    Ok(traits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::answer::QuizAnswer;
    use crate::core::scoring::aggregate;
    use chrono::TimeZone;

    fn sample_result() -> PersonalityResult {
        let answers = vec![
            QuizAnswer::new("1", TraitCategory::Openness, 5).unwrap(),
            QuizAnswer::new("3", TraitCategory::Extraversion, 4).unwrap(),
        ];
        aggregate(&answers)
    }

    #[test]
    fn test_from_result() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let profile = PersonalityProfile::from_result(sample_result(), created_at);

        assert_eq!(profile.id, created_at.timestamp_millis().to_string());
        assert_eq!(profile.personality_type, "Creative Visionary");
        assert_eq!(profile.traits.len(), 5);
        assert_eq!(profile.trait_value(TraitCategory::Openness), Some(100));
        assert_eq!(profile.trait_value(TraitCategory::Agreeableness), Some(0));
        assert_eq!(profile.radar_data(), profile.traits.as_slice());
        assert_eq!(profile.emoji, DEFAULT_EMOJI);
    }

    #[test]
    fn test_missing_trait() {
        let mut profile = PersonalityProfile::new(sample_result());
        profile.traits.retain(|t| t.category != TraitCategory::Neuroticism);
        assert_eq!(profile.trait_value(TraitCategory::Neuroticism), None);
    }

    #[test]
    fn test_needs_retake() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let profile = PersonalityProfile::from_result(sample_result(), created_at);

        assert!(!profile.needs_retake(created_at + Duration::days(30), 90));
        assert!(!profile.needs_retake(created_at + Duration::days(90), 90));
        assert!(profile.needs_retake(created_at + Duration::days(91), 90));
    }

    #[test]
    fn test_needs_retake_with_huge_window() {
        let profile = PersonalityProfile::new(sample_result());
        assert!(!profile.needs_retake(Utc::now(), 1_000_000_000_000_000));
        assert!(!profile.needs_retake(Utc::now(), i64::MAX));
    }

    #[test]
    fn test_load_rejects_duplicate_traits() {
        let profile = PersonalityProfile::new(sample_result());
        let mut json = serde_json::to_value(&profile).unwrap();
        let openness = json["traits"][0].clone();
        json["traits"].as_array_mut().unwrap().push(openness);

        let err = serde_json::from_value::<PersonalityProfile>(json).unwrap_err();
        assert!(err.to_string().contains("Openness appears more than once"));
    }

    #[test]
    fn test_load_rejects_out_of_range_trait() {
        let profile = PersonalityProfile::new(sample_result());
        let mut json = serde_json::to_value(&profile).unwrap();
        json["traits"][0]["value"] = serde_json::json!(150);

        assert!(serde_json::from_value::<PersonalityProfile>(json).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let profile = PersonalityProfile::new(sample_result());
        let json = serde_json::to_string(&profile).unwrap();
        let restored: PersonalityProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
    }
}

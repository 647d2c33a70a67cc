use serde::{Deserialize, Serialize};
use std::fmt;

use super::profile::PersonalityProfile;
use super::traits::TraitCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitChange {
    Up,
    Down,
    Same,
}

impl TraitChange {
    pub fn between(before: u8, after: u8) -> Self {
        if after > before {
            TraitChange::Up
        } else if after < before {
            TraitChange::Down
        } else {
            TraitChange::Same
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TraitChange::Up => "▲",
            TraitChange::Down => "▼",
            TraitChange::Same => "=",
        }
    }
}

impl fmt::Display for TraitChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitChange::Up => write!(f, "up"),
            TraitChange::Down => write!(f, "down"),
            TraitChange::Same => write!(f, "same"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(rename = "trait")]
    pub category: TraitCategory,
    pub value_before: u8,
    pub value_after: u8,
    pub change: TraitChange,
}

impl ComparisonResult {
    pub fn delta(&self) -> i16 {
        self.value_after as i16 - self.value_before as i16
    }
}

/// Trait-by-trait comparison in `before`'s order.
///
/// Categories missing from `after` are skipped, so the result may hold
/// fewer than five entries.
pub fn compare(before: &PersonalityProfile, after: &PersonalityProfile) -> Vec<ComparisonResult> {
    let results: Vec<ComparisonResult> = before
        .traits
        .iter()
        .filter_map(|old| {
            let new = after.traits.iter().find(|t| t.category == old.category)?;
            Some(ComparisonResult {
                category: old.category,
                value_before: old.value,
                value_after: new.value,
                change: TraitChange::between(old.value, new.value),
            })
        })
        .collect();

    if results.len() < before.traits.len() {
        tracing::debug!(
            before = %before.id,
            after = %after.id,
            skipped = before.traits.len() - results.len(),
            "traits missing from later profile"
        );
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::answer::QuizAnswer;
    use crate::core::scoring::aggregate;
    use crate::core::traits::TraitScore;
    use chrono::{TimeZone, Utc};
    use TraitCategory::*;

    fn profile(scores: [(TraitCategory, i64); 5], day: u32) -> PersonalityProfile {
        let answers: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, &(c, s))| QuizAnswer::new(i.to_string(), c, s).unwrap())
            .collect();
        let created_at = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
        PersonalityProfile::from_result(aggregate(&answers), created_at)
    }

    fn baseline(day: u32) -> PersonalityProfile {
        profile(
            [(Openness, 3), (Conscientiousness, 3), (Extraversion, 3), (Agreeableness, 3), (Neuroticism, 4)],
            day,
        )
    }

    #[test]
    fn test_classification() {
        assert_eq!(TraitChange::between(40, 60), TraitChange::Up);
        assert_eq!(TraitChange::between(60, 40), TraitChange::Down);
        assert_eq!(TraitChange::between(50, 50), TraitChange::Same);
    }

    #[test]
    fn test_compare_with_itself() {
        let p = baseline(1);
        let results = compare(&p, &p);

        assert_eq!(results.len(), 5);
        for r in &results {
            assert_eq!(r.change, TraitChange::Same);
            assert_eq!(r.value_before, r.value_after);
            assert_eq!(r.delta(), 0);
        }
    }

    #[test]
    fn test_up_and_down() {
        let before = baseline(1);
        let after = profile(
            [(Openness, 5), (Conscientiousness, 3), (Extraversion, 3), (Agreeableness, 3), (Neuroticism, 2)],
            2,
        );
        let results = compare(&before, &after);

        let changes: Vec<_> = results.iter().map(|r| (r.category, r.change)).collect();
        assert_eq!(
            changes,
            vec![
                (Openness, TraitChange::Up),
                (Conscientiousness, TraitChange::Same),
                (Extraversion, TraitChange::Same),
                (Agreeableness, TraitChange::Same),
                (Neuroticism, TraitChange::Down),
            ]
        );
        assert_eq!(results[0].delta(), 40);
        assert_eq!(results[4].delta(), -40);
    }

    #[test]
    fn test_missing_traits_are_skipped() {
        let before = baseline(1);
        let mut after = baseline(2);
        after.traits.retain(|t| t.category != Extraversion);

        let results = compare(&before, &after);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.category != Extraversion));
    }

    #[test]
    fn test_follows_before_order() {
        let mut before = baseline(1);
        before.traits.reverse();
        let after = baseline(2);

        let order: Vec<_> = compare(&before, &after).iter().map(|r| r.category).collect();
        assert_eq!(order, vec![Neuroticism, Agreeableness, Extraversion, Conscientiousness, Openness]);
    }

    #[test]
    fn test_extra_traits_in_after_are_ignored() {
        let mut before = baseline(1);
        before.traits = vec![TraitScore::new(Openness, 20)];
        let after = baseline(2);

        let results = compare(&before, &after);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change, TraitChange::Up);
    }

    #[test]
    fn test_json_shape() {
        let result = ComparisonResult {
            category: Openness,
            value_before: 40,
            value_after: 60,
            change: TraitChange::Up,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "trait": "Openness", "value_before": 40, "value_after": 60, "change": "up" })
        );
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::answer::{QuizAnswer, RawAnswer, MAX_SCORE};
use super::error::Result;
use super::traits::{TraitCategory, TraitScore};

/// Personality type derived from the dominant trait pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityType {
    #[serde(rename = "Creative Visionary")]
    CreativeVisionary,
    #[serde(rename = "Grounded Nurturer")]
    GroundedNurturer,
    #[serde(rename = "Energetic Optimist")]
    EnergeticOptimist,
    #[serde(rename = "Independent Thinker")]
    IndependentThinker,
    #[serde(rename = "Disciplined Perfectionist")]
    DisciplinedPerfectionist,
    #[serde(rename = "Balanced Explorer")]
    BalancedExplorer,
}

impl PersonalityType {
    pub fn label(&self) -> &'static str {
        match self {
            PersonalityType::CreativeVisionary => "Creative Visionary",
            PersonalityType::GroundedNurturer => "Grounded Nurturer",
            PersonalityType::EnergeticOptimist => "Energetic Optimist",
            PersonalityType::IndependentThinker => "Independent Thinker",
            PersonalityType::DisciplinedPerfectionist => "Disciplined Perfectionist",
            PersonalityType::BalancedExplorer => "Balanced Explorer",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            PersonalityType::CreativeVisionary => {
                "You thrive on imagination and new ideas. The world feels like a canvas for your curiosity."
            }
            PersonalityType::GroundedNurturer => {
                "Empathetic and reliable, you create stability for others while staying true to your values."
            }
            PersonalityType::EnergeticOptimist => {
                "You light up rooms and see opportunity in everything. People gravitate to your enthusiasm."
            }
            PersonalityType::IndependentThinker => {
                "You question assumptions and carve your own path — freedom fuels your creativity."
            }
            PersonalityType::DisciplinedPerfectionist => {
                "You chase excellence with focus and precision. Structure gives you peace."
            }
            PersonalityType::BalancedExplorer => {
                "You’re adaptable, open, and balanced — a mix of curiosity and composure."
            }
        }
    }

    /// Exact lookup on a `first-second` dominant-pair key.
    ///
    /// Keys are order-sensitive: `extraversion-openness` is not
    /// `openness-extraversion` and falls back to Balanced Explorer.
    pub fn from_pair_key(key: &str) -> Self {
        match key {
            "openness-extraversion" => PersonalityType::CreativeVisionary,
            "conscientiousness-agreeableness" => PersonalityType::GroundedNurturer,
            "extraversion-neuroticism" => PersonalityType::EnergeticOptimist,
            "openness-agreeableness" => PersonalityType::IndependentThinker,
            "conscientiousness-neuroticism" => PersonalityType::DisciplinedPerfectionist,
            _ => PersonalityType::BalancedExplorer,
        }
    }

    pub fn from_pair(pair: [TraitCategory; 2], matching: PairMatching) -> Self {
        let found = Self::from_pair_key(&pair_key(pair));
        match (found, matching) {
            (PersonalityType::BalancedExplorer, PairMatching::Unordered) => {
                Self::from_pair_key(&pair_key([pair[1], pair[0]]))
            }
            (found, _) => found,
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a dominant pair is matched against the type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMatching {
    /// Only the descending-score order matches
    #[default]
    Ordered,
    /// Either order of the pair matches
    Unordered,
}

/// Output of one aggregation, before identity and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityResult {
    pub traits: Vec<TraitScore>,
    pub dominant_traits: [TraitCategory; 2],
    pub personality_type: PersonalityType,
    pub summary: String,
}

impl PersonalityResult {
    pub fn trait_value(&self, category: TraitCategory) -> u8 {
        self.traits
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.value)
            .unwrap_or(0)
    }

    pub fn dominant_key(&self) -> String {
        pair_key(self.dominant_traits)
    }
}

/// `first-second` lower-case key for a dominant pair
pub fn pair_key(pair: [TraitCategory; 2]) -> String {
    format!("{}-{}", pair[0].key(), pair[1].key())
}

/// Scale a 1-5 average to a 0-100 percentage, rounding halves away from zero
pub fn percentage(average: f64) -> i64 {
    ((average / MAX_SCORE as f64) * 100.0).round() as i64
}

pub fn aggregate(answers: &[QuizAnswer]) -> PersonalityResult {
    aggregate_with(answers, PairMatching::Ordered)
}

/// Turn quiz answers into trait percentages and a personality type.
///
/// When a question id appears more than once only its last answer counts.
/// Remaining scores are averaged per category; a category with no answers
/// scores 0.
pub fn aggregate_with(answers: &[QuizAnswer], matching: PairMatching) -> PersonalityResult {
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (i, answer) in answers.iter().enumerate() {
        last_index.insert(answer.question_id.as_str(), i);
    }

    let mut sums = [0u32; 5];
    let mut counts = [0u32; 5];
    for (i, answer) in answers.iter().enumerate() {
        if last_index.get(answer.question_id.as_str()) != Some(&i) {
            continue;
        }
        let slot = answer.category.index();
        sums[slot] += answer.score as u32;
        counts[slot] += 1;
    }

    let traits: Vec<TraitScore> = TraitCategory::ALL
        .iter()
        .map(|&category| {
            let slot = category.index();
            let value = if counts[slot] == 0 {
                0
            } else {
                percentage(sums[slot] as f64 / counts[slot] as f64)
            };
            TraitScore::new(category, value)
        })
        .collect();

    let dominant_traits = dominant_pair(&traits);
    let personality_type = PersonalityType::from_pair(dominant_traits, matching);

    tracing::debug!(
        dominant = %pair_key(dominant_traits),
        personality_type = %personality_type,
        answers = answers.len(),
        "aggregated quiz answers"
    );

    PersonalityResult {
        traits,
        dominant_traits,
        personality_type,
        summary: personality_type.summary().to_string(),
    }
}

/// Validate answers from outside the crate, then aggregate them
pub fn aggregate_raw(answers: &[RawAnswer], matching: PairMatching) -> Result<PersonalityResult> {
    let answers = answers
        .iter()
        .map(QuizAnswer::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok(aggregate_with(&answers, matching))
}

/// Two highest-scoring categories, ties kept in enumeration order
fn dominant_pair(traits: &[TraitScore]) -> [TraitCategory; 2] {
    let mut ranked: Vec<&TraitScore> = traits.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    [ranked[0].category, ranked[1].category]
}

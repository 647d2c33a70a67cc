use serde::{Deserialize, Serialize};

use super::error::{ProfileError, Result};
use super::questions::{Question, QuestionBank};
use super::traits::TraitCategory;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// One scored answer to a quiz question (1-5 agreement scale)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: String,
    pub category: TraitCategory,
    pub score: u8,
}

impl QuizAnswer {
    pub fn new(question_id: impl Into<String>, category: TraitCategory, score: i64) -> Result<Self> {
        let question_id = question_id.into();
        if score < MIN_SCORE as i64 || score > MAX_SCORE as i64 {
            return Err(ProfileError::InvalidScore { question_id, score });
        }

        Ok(Self {
            question_id,
            category,
            score: score as u8,
        })
    }

    pub fn for_question(question: &Question, score: i64) -> Result<Self> {
        Self::new(question.id.clone(), question.category, score)
    }
}

/// Unvalidated answer as it arrives from outside the crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswer {
    pub question_id: String,
    pub category: String,
    pub score: i64,
}

impl TryFrom<&RawAnswer> for QuizAnswer {
    type Error = ProfileError;

    fn try_from(raw: &RawAnswer) -> Result<Self> {
        let category: TraitCategory = raw.category.parse()?;
        QuizAnswer::new(raw.question_id.clone(), category, raw.score)
    }
}

/// Answers collected during one quiz session.
///
/// Re-answering a question replaces the earlier answer in place, so the
/// sheet holds at most one answer per question id.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: Vec<QuizAnswer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the bank in order, one score per question
    pub fn from_scores(bank: &QuestionBank, scores: &[i64]) -> Result<Self> {
        let mut sheet = Self::new();
        for (question, &score) in bank.questions().iter().zip(scores) {
            sheet.record(question, score)?;
        }
        Ok(sheet)
    }

    pub fn record(&mut self, question: &Question, score: i64) -> Result<()> {
        let answer = QuizAnswer::for_question(question, score)?;

        match self.answers.iter_mut().find(|a| a.question_id == answer.question_id) {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
        Ok(())
    }

    pub fn score_for(&self, question_id: &str) -> Option<u8> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| a.score)
    }

    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        bank.questions().iter().all(|q| self.score_for(&q.id).is_some())
    }

    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range() {
        assert!(QuizAnswer::new("1", TraitCategory::Openness, 1).is_ok());
        assert!(QuizAnswer::new("1", TraitCategory::Openness, 5).is_ok());
        assert!(matches!(
            QuizAnswer::new("1", TraitCategory::Openness, 0),
            Err(ProfileError::InvalidScore { score: 0, .. })
        ));
        assert!(QuizAnswer::new("1", TraitCategory::Openness, 6).is_err());
    }

    #[test]
    fn test_raw_answer_rejects_unknown_category() {
        let raw = RawAnswer {
            question_id: "1".to_string(),
            category: "Honesty".to_string(),
            score: 3,
        };
        let result = QuizAnswer::try_from(&raw);
        assert!(matches!(result, Err(ProfileError::InvalidCategory(_))));
    }

    #[test]
    fn test_raw_answer_conversion() {
        let raw = RawAnswer {
            question_id: "3".to_string(),
            category: "Extraversion".to_string(),
            score: 4,
        };
        let answer = QuizAnswer::try_from(&raw).unwrap();
        assert_eq!(answer.category, TraitCategory::Extraversion);
        assert_eq!(answer.score, 4);
    }

    #[test]
    fn test_latest_answer_wins() {
        let bank = QuestionBank::default();
        let mut sheet = AnswerSheet::new();

        sheet.record(bank.find("1").unwrap(), 2).unwrap();
        sheet.record(bank.find("2").unwrap(), 3).unwrap();
        sheet.record(bank.find("1").unwrap(), 5).unwrap();

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.score_for("1"), Some(5));
        // Revised answer keeps its original position
        assert_eq!(sheet.answers()[0].question_id, "1");
    }

    #[test]
    fn test_invalid_revision_keeps_previous_answer() {
        let bank = QuestionBank::default();
        let mut sheet = AnswerSheet::new();

        sheet.record(bank.find("1").unwrap(), 4).unwrap();
        assert!(sheet.record(bank.find("1").unwrap(), 9).is_err());
        assert_eq!(sheet.score_for("1"), Some(4));
    }

    #[test]
    fn test_from_scores_and_completion() {
        let bank = QuestionBank::default();

        let partial = AnswerSheet::from_scores(&bank, &[5, 3, 4]).unwrap();
        assert_eq!(partial.len(), 3);
        assert!(!partial.is_complete(&bank));

        let full = AnswerSheet::from_scores(&bank, &[5, 3, 4, 4, 2, 5, 3, 4, 4, 3]).unwrap();
        assert!(full.is_complete(&bank));
        assert_eq!(full.answers()[9].category, TraitCategory::Neuroticism);
    }
}

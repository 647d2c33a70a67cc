use serde::{Deserialize, Serialize};

use super::error::{ProfileError, Result};
use super::traits::TraitCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub category: TraitCategory,
}

impl Question {
    pub fn new(id: &str, text: &str, category: TraitCategory) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
        }
    }
}

/// Ordered question bank presented by the quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn find(&self, id: &str) -> Result<&Question> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| ProfileError::UnknownQuestion(id.to_string()))
    }
}

impl Default for QuestionBank {
    /// The reference bank: ten statements cycling through the five traits
    fn default() -> Self {
        use TraitCategory::*;

        Self::new(vec![
            Question::new("1", "I enjoy exploring new ideas and concepts", Openness),
            Question::new("2", "I keep my workspace organized", Conscientiousness),
            Question::new("3", "I feel energized around large groups of people", Extraversion),
            Question::new("4", "I trust others easily", Agreeableness),
            Question::new("5", "I worry about things often", Neuroticism),
            Question::new("6", "I appreciate art and aesthetic experiences", Openness),
            Question::new("7", "I follow through on commitments", Conscientiousness),
            Question::new("8", "I prefer one-on-one conversations", Extraversion),
            Question::new("9", "I prioritize others' needs over my own", Agreeableness),
            Question::new("10", "I handle stress well", Neuroticism),
        ])
    }
}

/// Labels for the 1-5 agreement scale
pub fn scale_label(score: u8) -> &'static str {
    match score {
        1 => "Strongly Disagree",
        2 => "Disagree",
        3 => "Neutral",
        4 => "Agree",
        5 => "Strongly Agree",
        _ => "Unknown",
    }
}

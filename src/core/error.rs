use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Invalid trait category: {0}")]
    InvalidCategory(String),

    #[error("Invalid score {score} for question {question_id} (expected 1-5)")]
    InvalidScore { question_id: String, score: i64 },

    #[error("Trait value {value} for {category} is outside 0-100")]
    InvalidTraitValue { category: String, value: i64 },

    #[error("Trait {0} appears more than once in profile")]
    DuplicateTrait(String),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile already stored: {0}")]
    DuplicateProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

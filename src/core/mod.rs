pub mod answer;
pub mod compare;
pub mod error;
pub mod profile;
pub mod questions;
pub mod scoring;
pub mod store;
pub mod traits;

pub use answer::{AnswerSheet, QuizAnswer, RawAnswer};
pub use compare::{compare, ComparisonResult, TraitChange};
pub use error::{ProfileError, Result};
pub use profile::PersonalityProfile;
pub use questions::{Question, QuestionBank};
pub use scoring::{aggregate, aggregate_raw, aggregate_with, PairMatching, PersonalityResult, PersonalityType};
pub use store::{InMemoryProfileStore, JsonProfileStore, ProfileRepository};
pub use traits::{TraitCategory, TraitScore};

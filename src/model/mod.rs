pub mod answers;
pub mod profile;
pub mod questions;
pub mod verdicts;
pub mod weights;

pub use answers::{ANSWER_COUNT, AnswerVector, ScoreError};
pub use profile::{GapPolarity, QuizProfile};

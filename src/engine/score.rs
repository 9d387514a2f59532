use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::engine::microcopy::microcopy_for;
use crate::model::verdicts::VerdictBands;
use crate::model::weights::{SCORE_MAX, SCORE_MIN, WeightTable};
use crate::model::{AnswerVector, QuizProfile, ScoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(SCORE_MIN as i64, SCORE_MAX as i64) as u32)
    }

    pub fn from_f64(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        let rounded = raw.round().clamp(SCORE_MIN as f64, SCORE_MAX as f64);
        Some(Self(rounded as u32))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn compute_score(answers: &[bool], weights: &WeightTable) -> Result<Score, ScoreError> {
    let answers = AnswerVector::try_from(answers)?;
    Ok(score_answers(&answers, weights))
}

pub fn score_answers(answers: &AnswerVector, weights: &WeightTable) -> Score {
    let mut total = 0i64;
    for (idx, answer) in answers.iter().enumerate() {
        if answer {
            total += weights.weight(idx) as i64;
        }
    }
    Score::clamped(total)
}

pub fn verdict_for(score: u32, bands: &VerdictBands) -> &'static str {
    bands.verdict_for(score)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub score: Score,
    pub verdict: &'static str,
    pub microcopy: &'static str,
}

pub fn summarize<R: Rng + ?Sized>(
    profile: &QuizProfile,
    answers: &AnswerVector,
    rng: &mut R,
) -> ScoreSummary {
    let score = score_answers(answers, &profile.weights);
    ScoreSummary {
        score,
        verdict: verdict_for(score.value(), &profile.verdicts),
        microcopy: microcopy_for(profile, rng),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/engine/score.rs"]
mod tests;

use serde::Serialize;
use thiserror::Error;

use crate::model::answers::ANSWER_COUNT;
use crate::model::questions::{
    COMPLIANCE_V1_QUESTIONS, FIXED_MICROCOPY, NO_GAPS_MESSAGE, ROTATING_MICROCOPY,
};
use crate::model::verdicts::VerdictBands;
use crate::model::weights::{SCORE_MAX, WeightTable};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("verdict band bounds must ascend: {previous} is followed by {next}")]
    UnorderedBands { previous: u32, next: u32 },
    #[error("verdict band ending at {0} has an empty label")]
    EmptyVerdict(u32),
    #[error("open-ended verdict label is empty")]
    EmptyOpenVerdict,
    #[error("question {0} has an empty label")]
    EmptyQuestion(usize),
    #[error("weights must sum to {expected}, got {actual}")]
    WeightTotal { expected: u32, actual: u32 },
    #[error("microcopy pool is empty")]
    EmptyMicrocopy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolarity {
    GapOnFalse,
    GapOnTrue,
}

impl GapPolarity {
    pub fn is_gap(self, answer: bool) -> bool {
        match self {
            GapPolarity::GapOnFalse => !answer,
            GapPolarity::GapOnTrue => answer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MicrocopyMode {
    Fixed,
    Rotating,
}

#[derive(Debug, Clone)]
pub struct QuizProfile {
    pub name: &'static str,
    pub questions: [&'static str; ANSWER_COUNT],
    pub weights: WeightTable,
    pub verdicts: VerdictBands,
    pub microcopy_mode: MicrocopyMode,
    pub fixed_microcopy: &'static str,
    pub microcopy_pool: &'static [&'static str],
    pub gap_polarity: GapPolarity,
    pub no_gaps_message: &'static str,
}

impl QuizProfile {
    pub fn compliance_v1() -> Self {
        Self {
            name: "compliance_v1",
            questions: COMPLIANCE_V1_QUESTIONS,
            weights: WeightTable::compliance_v1(),
            verdicts: VerdictBands::compliance_v1(),
            microcopy_mode: MicrocopyMode::Fixed,
            fixed_microcopy: FIXED_MICROCOPY,
            microcopy_pool: &ROTATING_MICROCOPY,
            gap_polarity: GapPolarity::GapOnFalse,
            no_gaps_message: NO_GAPS_MESSAGE,
        }
    }

    pub fn with_microcopy(mut self, mode: MicrocopyMode) -> Self {
        self.microcopy_mode = mode;
        self
    }

    pub fn with_gap_polarity(mut self, polarity: GapPolarity) -> Self {
        self.gap_polarity = polarity;
        self
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(idx) = self.questions.iter().position(|q| q.trim().is_empty()) {
            return Err(ProfileError::EmptyQuestion(idx));
        }
        if self.weights.total() != SCORE_MAX {
            return Err(ProfileError::WeightTotal {
                expected: SCORE_MAX,
                actual: self.weights.total(),
            });
        }
        if self.fixed_microcopy.trim().is_empty()
            || self.microcopy_pool.is_empty()
            || self.microcopy_pool.iter().any(|m| m.trim().is_empty())
        {
            return Err(ProfileError::EmptyMicrocopy);
        }
        VerdictBands::new(self.verdicts.bands().to_vec(), self.verdicts.open_label())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;

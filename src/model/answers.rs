use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const ANSWER_COUNT: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("expected {expected} answers, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
    #[error("invalid answer '{0}' (use 1/0, y/n or t/f)")]
    InvalidAnswer(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnswerVector([bool; ANSWER_COUNT]);

impl AnswerVector {
    pub const fn new(answers: [bool; ANSWER_COUNT]) -> Self {
        Self(answers)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn to_bits(&self) -> String {
        self.0.iter().map(|&a| if a { '1' } else { '0' }).collect()
    }
}

impl TryFrom<&[bool]> for AnswerVector {
    type Error = ScoreError;

    fn try_from(value: &[bool]) -> Result<Self, Self::Error> {
        let arr: [bool; ANSWER_COUNT] =
            value.try_into().map_err(|_| ScoreError::InvalidInput {
                expected: ANSWER_COUNT,
                actual: value.len(),
            })?;
        Ok(Self(arr))
    }
}

impl TryFrom<Vec<bool>> for AnswerVector {
    type Error = ScoreError;

    fn try_from(value: Vec<bool>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl FromStr for AnswerVector {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parsed = Vec::with_capacity(ANSWER_COUNT);
        for ch in s.trim().chars().filter(|c| *c != ',') {
            let value = match ch.to_ascii_lowercase() {
                '1' | 'y' | 't' => true,
                '0' | 'n' | 'f' => false,
                other => return Err(ScoreError::InvalidAnswer(other)),
            };
            parsed.push(value);
        }
        Self::try_from(parsed)
    }
}

impl fmt::Display for AnswerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bits())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/answers.rs"]
mod tests;

pub mod card;
pub mod pdf;
pub mod text;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::engine::{Score, microcopy_for, profile_gaps, verdict_for};
use crate::model::{AnswerVector, QuizProfile};

pub const REPORT_TITLE: &str = "Compliance Reality Breakdown";
pub const REPORT_SUBTITLE: &str = "A snapshot of how your compliance behaves under pressure.";
pub const GAPS_HEADING: &str = "Where points were lost";
pub const FIX_FIRST_HEADING: &str = "What operators usually fix first";
pub const FIX_FIRST: [&str; 3] = [
    "Evidence that survives outside audit windows",
    "Clear ownership (who actually has to act)",
    "Controls that fail loudly (not silently)",
];
pub const REPORT_FOOTER: &str = "Generated anonymously. No frameworks. No vendor agenda.";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("pdf rendering failed: {0}")]
    Render(String),
    #[error("empty PDF output")]
    EmptyOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub score: Score,
    pub verdict: &'static str,
    pub microcopy: &'static str,
    pub gaps: Vec<String>,
    pub fix_first: Vec<&'static str>,
    pub footer: &'static str,
}

pub fn build_report<R: Rng + ?Sized>(
    profile: &QuizProfile,
    score: Score,
    answers: &AnswerVector,
    rng: &mut R,
) -> ReportDocument {
    ReportDocument {
        title: REPORT_TITLE,
        subtitle: REPORT_SUBTITLE,
        score,
        verdict: verdict_for(score.value(), &profile.verdicts),
        microcopy: microcopy_for(profile, rng),
        gaps: profile_gaps(profile, answers),
        fix_first: FIX_FIRST.to_vec(),
        footer: REPORT_FOOTER,
    }
}

pub fn report_filename(score: Score) -> String {
    format!("compliance-reality-{score}.pdf")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;

use crate::model::answers::ANSWER_COUNT;
use crate::model::{AnswerVector, GapPolarity, QuizProfile};

pub fn derive_gaps(
    answers: &AnswerVector,
    labels: &[&str; ANSWER_COUNT],
    polarity: GapPolarity,
    fallback: &str,
) -> Vec<String> {
    let gaps = answers
        .iter()
        .zip(labels.iter())
        .filter(|(answer, _)| polarity.is_gap(*answer))
        .map(|(_, label)| (*label).to_string())
        .collect::<Vec<_>>();
    if gaps.is_empty() {
        vec![fallback.to_string()]
    } else {
        gaps
    }
}

pub fn profile_gaps(profile: &QuizProfile, answers: &AnswerVector) -> Vec<String> {
    derive_gaps(
        answers,
        &profile.questions,
        profile.gap_polarity,
        profile.no_gaps_message,
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/engine/gaps.rs"]
mod tests;

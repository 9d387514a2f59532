use crate::model::answers::ANSWER_COUNT;

// Question order must match the weight table; reordering changes what stored scores mean.
pub const COMPLIANCE_V1_QUESTIONS: [&str; ANSWER_COUNT] = [
    "Do you have written security / compliance policies that reflect how your organization actually operates today?",
    "Have those policies been reviewed and updated within the last 12 months?",
    "Can you prove, with evidence, that in-scope employees have acknowledged and followed those policies?",
    "If an auditor asked tomorrow, could you produce complete, accurate evidence for your top 10 controls within 48 hours?",
    "Do your technical controls actually enforce what sales, legal, or leadership claims you do?",
    "If a control failed today, would you detect it automatically — or only discover it during an audit or incident?",
];

pub const FIXED_MICROCOPY: &str = "Most organizations score between 35–55.";

pub const ROTATING_MICROCOPY: [&str; 4] = [
    FIXED_MICROCOPY,
    "Most teams land in the middle band. Very few clear 85.",
    "Scores under 50 are more common than most leadership teams expect.",
    "The median run lands just under half marks.",
];

pub const NO_GAPS_MESSAGE: &str = "No gaps detected (rare).";

pub mod gaps;
pub mod microcopy;
pub mod score;

pub use gaps::profile_gaps;
pub use microcopy::{microcopy_for, microcopy_index, pinned_microcopy};
pub use score::{Score, ScoreSummary, compute_score, score_answers, summarize, verdict_for};

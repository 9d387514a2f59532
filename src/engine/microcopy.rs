use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::QuizProfile;
use crate::model::profile::MicrocopyMode;

pub fn microcopy_for<R: Rng + ?Sized>(profile: &QuizProfile, rng: &mut R) -> &'static str {
    match profile.microcopy_mode {
        MicrocopyMode::Fixed => profile.fixed_microcopy,
        MicrocopyMode::Rotating => profile
            .microcopy_pool
            .choose(rng)
            .copied()
            .unwrap_or(profile.fixed_microcopy),
    }
}

pub fn microcopy_index(profile: &QuizProfile, microcopy: &str) -> Option<usize> {
    match profile.microcopy_mode {
        MicrocopyMode::Fixed => None,
        MicrocopyMode::Rotating => profile.microcopy_pool.iter().position(|m| *m == microcopy),
    }
}

// Lets a download repeat the line the result page showed instead of drawing again.
pub fn pinned_microcopy(profile: &QuizProfile, index: Option<usize>) -> Option<&'static str> {
    match profile.microcopy_mode {
        MicrocopyMode::Fixed => None,
        MicrocopyMode::Rotating => index.and_then(|i| profile.microcopy_pool.get(i).copied()),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/engine/microcopy.rs"]
mod tests;

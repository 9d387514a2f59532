use std::sync::Arc;

use tracing::warn;

use super::{Benchmark, DEFAULT_WINDOW_DAYS, Result, SubmissionStore};
use crate::engine::Score;

#[derive(Clone)]
pub struct Benchmarker {
    store: Option<Arc<dyn SubmissionStore>>,
    window_days: u32,
}

impl Benchmarker {
    pub fn disabled() -> Self {
        Self {
            store: None,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn new(store: Arc<dyn SubmissionStore>, window_days: u32) -> Self {
        Self {
            store: Some(store),
            window_days,
        }
    }

    pub fn persistence_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&Arc<dyn SubmissionStore>> {
        self.store.as_ref()
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub async fn submit(&self, score: Score) -> Benchmark {
        let Some(store) = &self.store else {
            return Benchmark::zero();
        };
        match record_and_aggregate(store.as_ref(), score, self.window_days).await {
            Ok(benchmark) => benchmark,
            Err(err) => {
                warn!(error = %err, score = score.value(), "benchmark unavailable, returning zero aggregate");
                Benchmark::zero()
            }
        }
    }
}

async fn record_and_aggregate(
    store: &dyn SubmissionStore,
    score: Score,
    window_days: u32,
) -> Result<Benchmark> {
    store.record(score).await?;
    store.benchmark(window_days).await
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/benchmark.rs"]
mod tests;

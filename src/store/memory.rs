use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::{Benchmark, Result, SubmissionStore};
use crate::engine::Score;

#[derive(Debug, Clone, Copy)]
struct StoredSubmission {
    score: u32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredSubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_at(&self, score: Score, created_at: DateTime<Utc>) {
        self.rows.lock().await.push(StoredSubmission {
            score: score.value(),
            created_at,
        });
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn record(&self, score: Score) -> Result<()> {
        self.record_at(score, Utc::now()).await;
        Ok(())
    }

    async fn benchmark(&self, window_days: u32) -> Result<Benchmark> {
        let cutoff = Utc::now() - Duration::days(window_days as i64);
        let rows = self.rows.lock().await;

        let mut sum = 0u64;
        let mut n = 0i64;
        for row in rows.iter().filter(|r| r.created_at >= cutoff) {
            sum += row.score as u64;
            n += 1;
        }
        if n == 0 {
            return Ok(Benchmark::zero());
        }

        // Half away from zero, same as postgres round().
        let avg_score = (sum as f64 / n as f64).round() as i64;
        Ok(Benchmark { avg_score, n })
    }

    async fn reset(&self) -> Result<()> {
        self.rows.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/memory.rs"]
mod tests;

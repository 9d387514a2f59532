pub mod benchmark;
pub mod memory;
pub mod postgres;

pub use benchmark::Benchmarker;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Score;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub avg_score: i64,
    pub n: i64,
}

impl Benchmark {
    pub const fn zero() -> Self {
        Self { avg_score: 0, n: 0 }
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn ensure_schema(&self) -> Result<()>;
    async fn record(&self, score: Score) -> Result<()>;
    async fn benchmark(&self, window_days: u32) -> Result<Benchmark>;
    async fn reset(&self) -> Result<()>;
}

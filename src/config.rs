use std::net::SocketAddr;

use thiserror::Error;

use crate::cli::{ServeArgs, StoreKind};
use crate::model::QuizProfile;
use crate::model::profile::{GapPolarity, MicrocopyMode};

pub const DATABASE_URL_FALLBACKS: [&str; 3] =
    ["POSTGRES_URL", "POSTGRES_PRISMA_URL", "POSTGRES_URL_NON_POOLING"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("benchmark window must be at least one day")]
    EmptyWindow,
    #[error("database pool size must be at least 1")]
    EmptyPool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub database_url: Option<String>,
    pub store: StoreKind,
    pub persistence_enabled: bool,
    pub admin_token: Option<String>,
    pub microcopy: MicrocopyMode,
    pub gap_polarity: GapPolarity,
    pub seed: Option<u64>,
    pub benchmark_window_days: u32,
    pub db_pool_size: usize,
}

impl AppConfig {
    pub fn resolve(args: ServeArgs) -> Result<Self, ConfigError> {
        Self::resolve_with(args, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(args: ServeArgs, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if args.benchmark_window_days == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if args.db_pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }

        let database_url = non_empty(args.database_url).or_else(|| {
            DATABASE_URL_FALLBACKS
                .iter()
                .find_map(|name| non_empty(lookup(name)))
        });
        let persistence_enabled = match args.store {
            StoreKind::Memory => true,
            StoreKind::Postgres => database_url.is_some(),
        };

        Ok(Self {
            bind: args.bind,
            database_url,
            store: args.store,
            persistence_enabled,
            admin_token: non_empty(args.admin_token),
            microcopy: args.profile.microcopy,
            gap_polarity: args.profile.gap_polarity,
            seed: args.profile.seed,
            benchmark_window_days: args.benchmark_window_days,
            db_pool_size: args.db_pool_size,
        })
    }

    pub fn profile(&self) -> QuizProfile {
        QuizProfile::compliance_v1()
            .with_microcopy(self.microcopy)
            .with_gap_polarity(self.gap_polarity)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;

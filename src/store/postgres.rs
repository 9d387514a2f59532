use std::str::FromStr;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime};
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use rustls::{Certificate, ClientConfig, ServerName};
use tokio_postgres::NoTls;
use tokio_postgres::config::SslMode;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::{debug, info};

use super::{Benchmark, Result, StoreError, SubmissionStore};
use crate::engine::Score;

const CREATE_TABLE_SQL: &str = r#"
    create table if not exists submissions (
        id bigserial primary key,
        score int not null,
        created_at timestamptz not null default now()
    );
"#;

const BENCHMARK_SQL: &str = r#"
    select
        coalesce(round(avg(score))::int, 0) as avg_score,
        count(*)::int as n
    from submissions
    where created_at >= now() - ($1::int * interval '1 day')
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Disabled,
    Encrypted,
}

impl TlsMode {
    // sslmode=prefer (the default) and require both negotiate TLS; only disable skips it.
    pub fn from_url(database_url: &str) -> Result<Self> {
        let config = tokio_postgres::Config::from_str(database_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid database url: {e}")))?;
        Ok(match config.get_ssl_mode() {
            SslMode::Disable => TlsMode::Disabled,
            _ => TlsMode::Encrypted,
        })
    }
}

// Same trust model as libpq sslmode=require: the channel is encrypted, the certificate is not checked.
struct AcceptAnyServerCert;

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

fn tls_connector() -> MakeRustlsConnect {
    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
        .with_no_client_auth();
    MakeRustlsConnect::new(config)
}

pub struct PostgresStore {
    pool: Pool,
    tls: TlsMode,
}

impl PostgresStore {
    pub fn connect(database_url: &str, max_size: usize) -> Result<Self> {
        let tls = TlsMode::from_url(database_url)?;

        let mut cfg = Config::new();
        cfg.url = Some(database_url.to_string());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig::new(max_size.max(1)));

        let pool = match tls {
            TlsMode::Disabled => cfg.create_pool(Some(Runtime::Tokio1), NoTls),
            TlsMode::Encrypted => cfg.create_pool(Some(Runtime::Tokio1), tls_connector()),
        }
        .map_err(|e| StoreError::Unavailable(format!("pool creation failed: {e}")))?;

        info!(max_size, tls = ?tls, "postgres pool created");
        Ok(Self { pool, tls })
    }

    pub fn tls_mode(&self) -> TlsMode {
        self.tls
    }

    async fn client(&self) -> Result<Object> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl SubmissionStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<()> {
        let client = self.client().await?;
        client
            .batch_execute(CREATE_TABLE_SQL)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        debug!("submissions table ensured");
        Ok(())
    }

    async fn record(&self, score: Score) -> Result<()> {
        let client = self.client().await?;
        let value = score.value() as i32;
        client
            .execute("insert into submissions (score) values ($1)", &[&value])
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    async fn benchmark(&self, window_days: u32) -> Result<Benchmark> {
        let client = self.client().await?;
        let days = i32::try_from(window_days).unwrap_or(i32::MAX);
        let row = client
            .query_one(BENCHMARK_SQL, &[&days])
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let avg_score: i32 = row
            .try_get("avg_score")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let n: i32 = row
            .try_get("n")
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Benchmark {
            avg_score: avg_score as i64,
            n: n as i64,
        })
    }

    async fn reset(&self) -> Result<()> {
        let client = self.client().await?;
        client
            .batch_execute("truncate table submissions;")
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        info!("submissions table truncated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/postgres.rs"]
mod tests;

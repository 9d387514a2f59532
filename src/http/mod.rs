pub mod handlers;
pub mod pages;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::model::QuizProfile;
use crate::store::Benchmarker;

pub const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub profile: Arc<QuizProfile>,
    pub benchmarker: Benchmarker,
    admin_token: Option<Arc<str>>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(
        profile: QuizProfile,
        benchmarker: Benchmarker,
        admin_token: Option<String>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            profile: Arc::new(profile),
            benchmarker,
            admin_token: admin_token.map(Arc::from),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn admin_token_matches(&self, provided: Option<&str>) -> bool {
        match (self.admin_token.as_deref(), provided) {
            (Some(expected), Some(provided)) => expected == provided,
            _ => false,
        }
    }

    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::landing_handler))
        .route(
            "/score",
            get(pages::quiz_handler).post(pages::result_handler),
        )
        .route("/card.svg", get(pages::card_handler))
        .route("/report.pdf", get(pages::report_pdf_handler))
        .route("/api/submit", post(handlers::submit_handler))
        .route("/api/pdf", post(handlers::pdf_handler))
        .route("/api/admin-reset", post(handlers::admin_reset_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

pub async fn serve(bind: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(
        addr = %listener.local_addr()?,
        persistence_enabled = state.benchmarker.persistence_enabled(),
        "listening"
    );
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable, waiting for ctrl-c only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
#[path = "../../tests/src_inline/http/mod.rs"]
mod tests;

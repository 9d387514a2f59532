mod cli;
mod config;
mod engine;
mod http;
mod logging;
mod model;
mod report;
mod store;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

use crate::cli::{Cli, Command, ProfileArgs, ReportArgs, ReportFormat, ScoreArgs, ServeArgs, StoreKind};
use crate::config::AppConfig;
use crate::engine::summarize;
use crate::http::AppState;
use crate::model::QuizProfile;
use crate::report::build_report;
use crate::report::pdf::render_pdf;
use crate::report::text::{render_report_text, render_summary_text};
use crate::store::{Benchmarker, MemoryStore, PostgresStore, SubmissionStore};

fn main() {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| format!("failed to start runtime: {e}"))?;
            runtime.block_on(serve(args))
        }
        Command::Score(args) => score(&args),
        Command::Report(args) => report(&args),
    }
}

async fn serve(args: ServeArgs) -> Result<(), String> {
    let config = AppConfig::resolve(args).map_err(|e| e.to_string())?;
    let profile = config.profile();
    profile.validate().map_err(|e| e.to_string())?;

    info!(
        profile = profile.name,
        bind = %config.bind,
        store = ?config.store,
        persistence_enabled = config.persistence_enabled,
        admin_reset = config.admin_token.is_some(),
        microcopy = ?config.microcopy,
        gap_polarity = ?config.gap_polarity,
        window_days = config.benchmark_window_days,
        "configuration resolved"
    );

    let benchmarker = build_benchmarker(&config).await?;
    let state = AppState::new(
        profile,
        benchmarker,
        config.admin_token.clone(),
        config.seed,
    );
    http::serve(config.bind, state)
        .await
        .map_err(|e| format!("server error: {e}"))
}

async fn build_benchmarker(config: &AppConfig) -> Result<Benchmarker, String> {
    if !config.persistence_enabled {
        info!("persistence disabled, benchmark responses will be zero");
        return Ok(Benchmarker::disabled());
    }

    let store: Arc<dyn SubmissionStore> = match config.store {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| "postgres store selected without a database url".to_string())?;
            Arc::new(PostgresStore::connect(url, config.db_pool_size).map_err(|e| e.to_string())?)
        }
    };

    // Unreachable databases are tolerated; submissions fall back to the zero aggregate.
    if let Err(err) = store.ensure_schema().await {
        warn!(error = %err, "could not ensure submissions table at startup");
    }

    Ok(Benchmarker::new(store, config.benchmark_window_days))
}

fn profile_from_args(args: &ProfileArgs) -> Result<QuizProfile, String> {
    let profile = QuizProfile::compliance_v1()
        .with_microcopy(args.microcopy)
        .with_gap_polarity(args.gap_polarity);
    profile.validate().map_err(|e| e.to_string())?;
    Ok(profile)
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn score(args: &ScoreArgs) -> Result<(), String> {
    let profile = profile_from_args(&args.profile)?;
    let mut rng = rng_from_seed(args.profile.seed);
    let summary = summarize(&profile, &args.answers, &mut rng);

    if args.json {
        let out = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print!("{}", render_summary_text(&summary));
    }
    Ok(())
}

fn report(args: &ReportArgs) -> Result<(), String> {
    let profile = profile_from_args(&args.profile)?;
    let mut rng = rng_from_seed(args.profile.seed);
    let score = engine::score_answers(&args.answers, &profile.weights);
    let doc = build_report(&profile, score, &args.answers, &mut rng);

    let bytes = match args.format {
        ReportFormat::Pdf => render_pdf(&doc).map_err(|e| e.to_string())?,
        ReportFormat::Text => render_report_text(&doc).into_bytes(),
    };
    write_output(&args.out, &bytes)?;
    info!(
        path = %args.out.display(),
        score = score.value(),
        format = ?args.format,
        "report written"
    );
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    std::fs::write(path, bytes).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::AnswerVector;
use crate::model::profile::{GapPolarity, MicrocopyMode};
use crate::store::DEFAULT_WINDOW_DAYS;

#[derive(Debug, Parser)]
#[command(
    name = "compliance-score",
    version,
    about = "Six-question compliance reality check: score, verdict, benchmark and report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Score a set of answers and print the verdict.
    Score(ScoreArgs),
    /// Write the one-page report for a set of answers.
    Report(ReportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[arg(long, env = "COMPLIANCE_SCORE_MICROCOPY", value_enum, default_value_t = MicrocopyMode::Fixed)]
    pub microcopy: MicrocopyMode,

    #[arg(long, env = "COMPLIANCE_SCORE_GAP_POLARITY", value_enum, default_value_t = GapPolarity::GapOnFalse)]
    pub gap_polarity: GapPolarity,

    /// Seed for rotating microcopy; entropy when absent.
    #[arg(long, env = "COMPLIANCE_SCORE_SEED")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "COMPLIANCE_SCORE_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "COMPLIANCE_SCORE_STORE", value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    #[arg(long, env = "ADMIN_RESET_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,

    #[arg(long, env = "COMPLIANCE_SCORE_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
    pub benchmark_window_days: u32,

    #[arg(long, env = "COMPLIANCE_SCORE_DB_POOL_SIZE", default_value_t = 2)]
    pub db_pool_size: usize,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ScoreArgs {
    /// Six answers, e.g. 101001 or y,n,y,n,n,y.
    #[arg(long)]
    pub answers: AnswerVector,

    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Pdf,
    Text,
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    #[arg(long)]
    pub answers: AnswerVector,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = ReportFormat::Pdf)]
    pub format: ReportFormat,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

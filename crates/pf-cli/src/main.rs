use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod enrich;
mod report;
mod score;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "pf-cli")]
#[command(about = "PartnerForge command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load config/targets.yaml and upsert every seed target.
    Seed,
    /// Fetch vendor signals for targets and persist scores, one target at a time.
    Enrich {
        /// Only enrich this domain.
        #[arg(long)]
        domain: Option<String>,
        /// Print what would be enriched without calling vendors or writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Recompute scores and status buckets from stored signals; no vendor calls.
    Score {
        /// Only rescore this domain.
        #[arg(long)]
        domain: Option<String>,
    },
    /// Print the scored target table.
    Report {
        /// Filter to one status bucket (hot, warm, cool, cold).
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = pf_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let pool = pf_db::connect_pool(
        &config.database_url,
        pf_db::PoolConfig::from_app_config(&config),
    )
    .await?;
    let applied = pf_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    match cli.command {
        Commands::Seed => seed::run_seed(&pool, &config).await,
        Commands::Enrich { domain, dry_run } => {
            enrich::run_enrich(&pool, &config, domain.as_deref(), dry_run).await
        }
        Commands::Score { domain } => score::run_score(&pool, domain.as_deref()).await,
        Commands::Report { status, limit } => {
            report::run_report(&pool, status.as_deref(), limit).await
        }
    }
}

/// Mark a run failed on a best-effort basis; the primary error is what the
/// caller propagates.
pub(crate) async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: String) {
    if let Err(e) = pf_db::fail_enrichment_run(pool, run_id, &message).await {
        tracing::error!(run_id, error = %e, "failed to mark enrichment run as failed");
    }
}

mod collect;
mod report;
mod status;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bankrev-cli")]
#[command(about = "Bank mobile-app review analytics pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect, clean, analyze, and store reviews for the configured banks
    Collect {
        /// Restrict collection to a specific bank (by code)
        #[arg(long)]
        bank: Option<String>,

        /// Target number of reviews to fetch per bank
        #[arg(long, default_value_t = 400)]
        count: usize,

        /// Preview what would be collected without fetching or writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Render aggregate charts and the markdown report
    Report {
        /// Restrict the report to a specific bank (by code)
        #[arg(long)]
        bank: Option<String>,

        /// Output directory for charts and report.md (defaults to config)
        #[arg(long)]
        out_dir: Option<std::path::PathBuf>,
    },
    /// Show recent collection runs
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = bankrev_core::load_app_config()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let pool = bankrev_db::connect_pool(
        &config.database_url,
        bankrev_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    bankrev_db::ping(&pool).await?;

    let applied = bankrev_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    match cli.command {
        Commands::Collect {
            bank,
            count,
            dry_run,
        } => collect::run_collect(&pool, &config, bank.as_deref(), count, dry_run).await,
        Commands::Report { bank, out_dir } => {
            report::run_report(&pool, &config, bank.as_deref(), out_dir).await
        }
        Commands::Status => status::run_status(&pool).await,
    }
}

/// Mark a run as failed, logging (not propagating) any secondary error so the
/// original failure stays the one the caller reports.
pub(crate) async fn fail_run_best_effort(
    pool: &sqlx::PgPool,
    run_id: i64,
    run_type: &str,
    message: String,
) {
    if let Err(e) = bankrev_db::fail_collection_run(pool, run_id, &message).await {
        tracing::error!(
            run_id,
            run_type,
            error = %e,
            "failed to mark collection run as failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_collect_defaults() {
        let cli = Cli::try_parse_from(["bankrev-cli", "collect"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect {
                bank: None,
                count: 400,
                dry_run: false,
            }
        ));
    }

    #[test]
    fn parses_collect_with_bank_and_count() {
        let cli =
            Cli::try_parse_from(["bankrev-cli", "collect", "--bank", "CBE", "--count", "50"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect {
                bank: Some(ref b),
                count: 50,
                dry_run: false,
            } if b == "CBE"
        ));
    }

    #[test]
    fn parses_collect_dry_run() {
        let cli = Cli::try_parse_from(["bankrev-cli", "collect", "--dry-run"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect { dry_run: true, .. }
        ));
    }

    #[test]
    fn parses_report_with_out_dir() {
        let cli =
            Cli::try_parse_from(["bankrev-cli", "report", "--out-dir", "/tmp/charts"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report {
                bank: None,
                out_dir: Some(ref p),
            } if p.to_str() == Some("/tmp/charts")
        ));
    }

    #[test]
    fn parses_report_with_bank() {
        let cli = Cli::try_parse_from(["bankrev-cli", "report", "--bank", "dashen"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report {
                bank: Some(ref b),
                out_dir: None,
            } if b == "dashen"
        ));
    }

    #[test]
    fn parses_status() {
        let cli = Cli::try_parse_from(["bankrev-cli", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["bankrev-cli", "serve"]).is_err());
    }
}

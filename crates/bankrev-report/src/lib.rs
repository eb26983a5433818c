//! Reporting for bankrev.
//!
//! Assembles per-bank aggregate statistics from the store (always recomputed,
//! never persisted), renders PNG chart artifacts, and writes the markdown
//! summary report. Strictly read-only against the database.

pub mod charts;
pub mod error;
pub mod markdown;
pub mod stats;

pub use charts::{render_charts, ChartPaths};
pub use error::ReportError;
pub use markdown::render_markdown;
pub use stats::{format_average_rating, load_bank_stats, BankStats};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Number of theme tags shown per bank in the report.
const TOP_THEMES_PER_BANK: i64 = 5;

/// Number of theme tags plotted in the overall theme chart.
const TOP_THEMES_CHART: i64 = 10;

/// Generate the full report: aggregate stats, chart PNGs, and `report.md`
/// under `out_dir`. Returns the path of the written markdown file.
///
/// # Errors
///
/// Returns [`ReportError`] if a store query, chart render, or file write
/// fails.
pub async fn generate_report(
    pool: &PgPool,
    banks: &[bankrev_db::BankRow],
    out_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(out_dir)?;

    let stats = load_bank_stats(pool, banks, TOP_THEMES_PER_BANK).await?;
    let overall_themes = bankrev_db::theme_counts_overall(pool, TOP_THEMES_CHART).await?;

    let chart_paths = render_charts(&stats, &overall_themes, out_dir)?;

    let markdown = render_markdown(&stats, &chart_paths, generated_at);
    let report_path = out_dir.join("report.md");
    std::fs::write(&report_path, markdown)?;

    tracing::info!(
        banks = stats.len(),
        report = %report_path.display(),
        "report generated"
    );

    Ok(report_path)
}

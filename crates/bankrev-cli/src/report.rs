//! The `report` command: read-only aggregate queries, chart artifacts, and
//! the markdown summary.

use std::path::PathBuf;

use bankrev_core::{AppConfig, BankCode};
use chrono::Utc;

/// Render the report for all stored banks, or one bank by code.
///
/// # Errors
///
/// Returns an error if the bank code is unknown, the store queries fail, or
/// the artifacts cannot be written.
pub(crate) async fn run_report(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    bank_filter: Option<&str>,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let banks = if let Some(raw_code) = bank_filter {
        let code: BankCode = raw_code.parse()?;
        let row = bankrev_db::get_bank_by_code(pool, code.as_str())
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("bank '{code}' has no stored reviews; run `collect` first")
            })?;
        vec![row]
    } else {
        bankrev_db::list_banks(pool).await?
    };

    if banks.is_empty() {
        println!("no banks stored yet; run `collect` first");
        return Ok(());
    }

    let out_dir = out_dir.unwrap_or_else(|| config.report_dir.clone());
    let report_path = bankrev_report::generate_report(pool, &banks, &out_dir, Utc::now()).await?;

    println!("report written to {}", report_path.display());
    Ok(())
}

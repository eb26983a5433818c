//! The `status` command: recent collection runs.

/// Show the most recent collection runs and their outcomes.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_status(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let runs = bankrev_db::list_collection_runs(pool, 20).await?;

    if runs.is_empty() {
        println!("no collection runs found; run `collect` first");
        return Ok(());
    }

    println!("{:<6}{:<12}{:<18}{:<10}RECORDS", "ID", "STATUS", "STARTED", "TYPE");
    for run in &runs {
        let started = run
            .started_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6}{:<12}{:<18}{:<10}{}",
            run.id, run.status, started, run.run_type, run.records_processed
        );
        if let Some(err) = &run.error_message {
            println!("      error: {err}");
        }
    }

    Ok(())
}

//! The `collect` command: the sequential per-bank pipeline
//! fetch → normalize → preprocess → annotate → upsert.
//!
//! Banks are processed one at a time. A bank whose collection fails is
//! logged and skipped so the others still complete; a run where every bank
//! fails is an error. Store failures abort the whole run.

use bankrev_analysis::{Analyzer, Preprocessor, SentimentModel, ThemeTable};
use bankrev_core::{AppConfig, BankCode, BankEntry};
use bankrev_scraper::PlayReviewsClient;

use crate::fail_run_best_effort;

/// Run collection for all (or one) configured bank(s).
///
/// Tracks the invocation as a `collection_runs` row. When `dry_run` is
/// `true`, prints the bank list and returns without touching the network or
/// the database.
///
/// # Errors
///
/// Returns an error if the roster/theme config is invalid, the run row
/// cannot be created, every bank fails, or the store rejects an upsert.
#[allow(clippy::too_many_lines)]
pub(crate) async fn run_collect(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    bank_filter: Option<&str>,
    target_count: usize,
    dry_run: bool,
) -> anyhow::Result<()> {
    let roster = bankrev_core::load_banks(&config.banks_path)?;

    let banks: Vec<BankEntry> = if let Some(raw_code) = bank_filter {
        let code: BankCode = raw_code.parse()?;
        let entry = roster
            .banks
            .iter()
            .find(|b| b.code == code)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("bank '{code}' is not in the roster file"))?;
        vec![entry]
    } else {
        roster.banks
    };

    if dry_run {
        let codes: Vec<&str> = banks.iter().map(|b| b.code.as_str()).collect();
        println!(
            "dry-run: would collect up to {target_count} reviews for {} banks: [{}]",
            banks.len(),
            codes.join(", ")
        );
        return Ok(());
    }

    // Process-wide dependencies: built once, passed by reference below.
    let themes_file = bankrev_core::load_themes(&config.themes_path)?;
    let theme_table = ThemeTable::from_config(&themes_file);
    let model = SentimentModel::load();
    let analyzer = Analyzer::new(&model, &theme_table);
    let preprocessor = Preprocessor::new()?;
    let client = PlayReviewsClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )?;

    let run = bankrev_db::create_collection_run(pool, "reviews", "cli").await?;
    if let Err(e) = bankrev_db::start_collection_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, "reviews", format!("{e:#}")).await;
        return Err(e.into());
    }

    let mut total_records: i32 = 0;
    let mut failed_banks: usize = 0;
    let bank_count = banks.len();

    for bank in &banks {
        let result = collect_bank(
            pool,
            config,
            &client,
            &preprocessor,
            &analyzer,
            bank,
            target_count,
        )
        .await;

        match result {
            Ok(stored) => {
                tracing::info!(bank = %bank.code, stored, "bank collection complete");
                total_records = total_records.saturating_add(stored);
            }
            Err(e) => {
                // A store failure poisons the run; anything else (network,
                // listing gone) costs only this bank.
                if e.downcast_ref::<bankrev_db::DbError>().is_some() {
                    let message = format!("store failure for bank {}: {e:#}", bank.code);
                    fail_run_best_effort(pool, run.id, "reviews", message).await;
                    return Err(e);
                }
                tracing::warn!(
                    bank = %bank.code,
                    error = %format!("{e:#}"),
                    "bank collection failed — skipping"
                );
                failed_banks += 1;
            }
        }
    }

    if failed_banks > 0 {
        tracing::warn!(
            failed_banks,
            total_banks = bank_count,
            "some banks failed during collection"
        );
    }

    if failed_banks == bank_count {
        let message = format!("all {failed_banks} banks failed collection");
        fail_run_best_effort(pool, run.id, "reviews", message.clone()).await;
        anyhow::bail!("{message}");
    }

    if let Err(err) = bankrev_db::complete_collection_run(pool, run.id, total_records).await {
        let message = format!("{err:#}");
        fail_run_best_effort(pool, run.id, "reviews", message).await;
        return Err(err.into());
    }

    println!(
        "collection complete: {} banks processed, {} reviews stored",
        bank_count - failed_banks,
        total_records
    );
    Ok(())
}

/// Collect one bank end-to-end and return the number of stored reviews.
async fn collect_bank(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    client: &PlayReviewsClient,
    preprocessor: &Preprocessor,
    analyzer: &Analyzer<'_>,
    bank: &BankEntry,
    target_count: usize,
) -> anyhow::Result<i32> {
    let bank_row = bankrev_db::upsert_bank(pool, bank.code.as_str(), &bank.name, &bank.app_id).await?;

    let raws = client
        .fetch_reviews(
            &config.store_base_url,
            &bank.app_id,
            target_count,
            config.scraper_page_size,
            config.scraper_inter_request_delay_ms,
        )
        .await?;
    let fetched = raws.len();

    let mut reviews = Vec::with_capacity(fetched);
    let mut skipped_malformed = 0usize;
    for raw in raws {
        match bankrev_scraper::normalize_review(raw, bank.code) {
            Ok(review) => reviews.push(review),
            Err(e) => {
                skipped_malformed += 1;
                tracing::debug!(bank = %bank.code, error = %e, "skipping malformed record");
            }
        }
    }

    let outcome = preprocessor.process(reviews);
    tracing::info!(
        bank = %bank.code,
        fetched,
        skipped_malformed,
        dropped_empty = outcome.dropped_empty,
        dropped_duplicates = outcome.dropped_duplicates,
        kept = outcome.processed.len(),
        "preprocessing summary"
    );

    let pairs = analyzer.annotate_all(outcome.processed);

    let mut stored: i32 = 0;
    for (processed, annotation) in &pairs {
        let review_id = bankrev_db::upsert_review(pool, bank_row.id, processed).await?;
        bankrev_db::upsert_annotation(pool, review_id, annotation).await?;
        stored = stored.saturating_add(1);
    }

    Ok(stored)
}

//! Per-bank aggregate statistics, recomputed on demand from the store.

use rust_decimal::Decimal;
use sqlx::PgPool;

use bankrev_db::BankRow;

use crate::error::ReportError;

/// Aggregate rollup for one bank: sentiment distribution, average rating,
/// and theme frequency. Derived from stored annotations on every report
/// run; never a persisted source of truth.
#[derive(Debug, Clone)]
pub struct BankStats {
    pub code: String,
    pub name: String,
    pub review_count: i64,
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
    pub unclassified: i64,
    /// `None` when the bank has no stored reviews.
    pub average_rating: Option<Decimal>,
    /// Most frequent themes, descending, capped by the caller's limit.
    pub top_themes: Vec<(String, i64)>,
}

impl BankStats {
    /// Total annotated reviews across all labels.
    #[must_use]
    pub fn annotated_total(&self) -> i64 {
        self.positive + self.neutral + self.negative + self.unclassified
    }

    /// Share of the annotated total for one label count, in percent.
    /// Zero when nothing is annotated.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, count: i64) -> f64 {
        let total = self.annotated_total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }
}

/// Formats an average rating at two decimal places, or `n/a` when the bank
/// has no reviews. `[5, 5, 1]` formats as `3.67`.
#[must_use]
pub fn format_average_rating(avg: Option<Decimal>) -> String {
    match avg {
        Some(value) => value.round_dp(2).to_string(),
        None => "n/a".to_string(),
    }
}

/// Assembles [`BankStats`] for each bank from the store's aggregate queries.
///
/// # Errors
///
/// Returns [`ReportError::Db`] if any aggregate query fails.
pub async fn load_bank_stats(
    pool: &PgPool,
    banks: &[BankRow],
    top_themes: i64,
) -> Result<Vec<BankStats>, ReportError> {
    let mut stats = Vec::with_capacity(banks.len());

    for bank in banks {
        let review_count = bankrev_db::review_count_by_bank(pool, bank.id).await?;
        let average_rating = bankrev_db::average_rating_by_bank(pool, bank.id).await?;
        let sentiment_counts = bankrev_db::sentiment_counts_by_bank(pool, bank.id).await?;
        let theme_counts = bankrev_db::theme_counts_by_bank(pool, bank.id, top_themes).await?;

        let mut positive = 0;
        let mut neutral = 0;
        let mut negative = 0;
        let mut unclassified = 0;
        for row in sentiment_counts {
            match row.sentiment.as_str() {
                "positive" => positive = row.count,
                "neutral" => neutral = row.count,
                "negative" => negative = row.count,
                "unclassified" => unclassified = row.count,
                other => {
                    tracing::warn!(bank = %bank.code, label = other, "unknown sentiment label in store");
                }
            }
        }

        stats.push(BankStats {
            code: bank.code.clone(),
            name: bank.name.clone(),
            review_count,
            positive,
            neutral,
            negative,
            unclassified,
            average_rating,
            top_themes: theme_counts.into_iter().map(|t| (t.theme, t.count)).collect(),
        });
    }

    Ok(stats)
}

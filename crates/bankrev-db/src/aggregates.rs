//! Read-only aggregate queries for the reporter.
//!
//! Aggregates are always recomputed from the stored reviews and annotations;
//! nothing here is persisted as a source of truth.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// One sentiment label and its review count for a bank.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentCountRow {
    pub sentiment: String,
    pub count: i64,
}

/// One theme and its occurrence count for a bank.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ThemeCountRow {
    pub theme: String,
    pub count: i64,
}

/// Sentiment label counts for one bank's annotated reviews.
///
/// Labels with zero reviews are absent from the result; callers treat
/// missing labels as zero.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn sentiment_counts_by_bank(
    pool: &PgPool,
    bank_id: i64,
) -> Result<Vec<SentimentCountRow>, DbError> {
    let rows = sqlx::query_as::<_, SentimentCountRow>(
        "SELECT a.sentiment, COUNT(*) AS count \
         FROM annotations a \
         JOIN reviews r ON r.id = a.review_id \
         WHERE r.bank_id = $1 \
         GROUP BY a.sentiment",
    )
    .bind(bank_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Average star rating over one bank's stored reviews, or `None` when the
/// bank has no reviews. Postgres `AVG` over `SMALLINT` yields `NUMERIC`,
/// bound here as a [`Decimal`] so no precision is lost before formatting.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn average_rating_by_bank(
    pool: &PgPool,
    bank_id: i64,
) -> Result<Option<Decimal>, DbError> {
    let avg: Option<Decimal> =
        sqlx::query_scalar("SELECT AVG(rating) FROM reviews WHERE bank_id = $1")
            .bind(bank_id)
            .fetch_one(pool)
            .await?;

    Ok(avg)
}

/// Number of stored reviews for one bank.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn review_count_by_bank(pool: &PgPool, bank_id: i64) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE bank_id = $1")
        .bind(bank_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Top theme tags across all banks, most frequent first (ties broken by
/// name).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn theme_counts_overall(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ThemeCountRow>, DbError> {
    let rows = sqlx::query_as::<_, ThemeCountRow>(
        "SELECT t.theme, COUNT(*) AS count \
         FROM annotations a \
         CROSS JOIN LATERAL unnest(a.themes) AS t(theme) \
         GROUP BY t.theme \
         ORDER BY count DESC, t.theme \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Top theme tags for one bank, most frequent first (ties broken by name).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn theme_counts_by_bank(
    pool: &PgPool,
    bank_id: i64,
    limit: i64,
) -> Result<Vec<ThemeCountRow>, DbError> {
    let rows = sqlx::query_as::<_, ThemeCountRow>(
        "SELECT t.theme, COUNT(*) AS count \
         FROM annotations a \
         JOIN reviews r ON r.id = a.review_id \
         CROSS JOIN LATERAL unnest(a.themes) AS t(theme) \
         WHERE r.bank_id = $1 \
         GROUP BY t.theme \
         ORDER BY count DESC, t.theme \
         LIMIT $2",
    )
    .bind(bank_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

//! Database operations for the `reviews` and `annotations` tables.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::*;
use sqlx::PgPool;

use bankrev_core::{Annotation, ProcessedReview};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `reviews` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub bank_id: i64,
    pub source_review_id: String,
    pub source_platform: String,
    pub content: String,
    pub clean_content: String,
    pub rating: i16,
    pub reviewed_at: NaiveDate,
    pub dedup_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `annotations` table.
///
/// `confidence` is a [`Decimal`] bound to the `NUMERIC(4,3)` column; values
/// are in `[0.000, 1.000]`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnnotationRow {
    pub id: i64,
    pub review_id: i64,
    pub sentiment: String,
    pub confidence: Decimal,
    pub themes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// reviews operations
// ---------------------------------------------------------------------------

/// Upserts a review row.
///
/// Conflicts on `(bank_id, source_review_id)` update the derived fields
/// (`clean_content`, `dedup_key`) plus `content`, `rating`, `reviewed_at`,
/// and `updated_at` in place, so re-running collection never duplicates a
/// review.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_review(
    pool: &PgPool,
    bank_id: i64,
    processed: &ProcessedReview,
) -> Result<i64, DbError> {
    let review = &processed.review;

    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reviews \
             (bank_id, source_review_id, source_platform, content, clean_content, \
              rating, reviewed_at, dedup_key) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (bank_id, source_review_id) DO UPDATE SET \
             content       = EXCLUDED.content, \
             clean_content = EXCLUDED.clean_content, \
             rating        = EXCLUDED.rating, \
             reviewed_at   = EXCLUDED.reviewed_at, \
             dedup_key     = EXCLUDED.dedup_key, \
             updated_at    = NOW() \
         RETURNING id",
    )
    .bind(bank_id)
    .bind(&review.source_review_id)
    .bind(&review.source_platform)
    .bind(&review.content)
    .bind(&processed.clean_content)
    .bind(review.rating)
    .bind(review.reviewed_at)
    .bind(&processed.dedup_key)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

// ---------------------------------------------------------------------------
// annotations operations
// ---------------------------------------------------------------------------

/// Upserts the annotation for a review.
///
/// Conflicts on `review_id` replace the stored label, confidence, and theme
/// set wholesale; annotations are never partially mutated, and re-running
/// analysis over the same reviews is idempotent.
///
/// `confidence` is converted to a fixed-scale [`Decimal`] at this boundary;
/// out-of-range float artifacts fall back to zero.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_annotation(
    pool: &PgPool,
    review_id: i64,
    annotation: &Annotation,
) -> Result<i64, DbError> {
    let confidence = Decimal::from_f32(annotation.confidence)
        .unwrap_or(Decimal::ZERO)
        .round_dp(3);

    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO annotations (review_id, sentiment, confidence, themes) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (review_id) DO UPDATE SET \
             sentiment  = EXCLUDED.sentiment, \
             confidence = EXCLUDED.confidence, \
             themes     = EXCLUDED.themes, \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(review_id)
    .bind(annotation.sentiment.as_str())
    .bind(confidence)
    .bind(&annotation.themes)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

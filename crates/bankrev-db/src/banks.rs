//! Database operations for the `banks` roster table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `banks` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BankRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub app_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts a bank roster row, keyed on `code`.
///
/// Conflicts update `name`, `app_id`, and `updated_at` in place so roster
/// edits in `banks.yaml` propagate on the next run. Returns the full row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_bank(
    pool: &PgPool,
    code: &str,
    name: &str,
    app_id: &str,
) -> Result<BankRow, DbError> {
    let row = sqlx::query_as::<_, BankRow>(
        "INSERT INTO banks (code, name, app_id) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (code) DO UPDATE SET \
             name       = EXCLUDED.name, \
             app_id     = EXCLUDED.app_id, \
             updated_at = NOW() \
         RETURNING id, code, name, app_id, created_at, updated_at",
    )
    .bind(code)
    .bind(name)
    .bind(app_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Lists all banks in roster order (insertion order by id).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_banks(pool: &PgPool) -> Result<Vec<BankRow>, DbError> {
    let rows = sqlx::query_as::<_, BankRow>(
        "SELECT id, code, name, app_id, created_at, updated_at \
         FROM banks \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches one bank by its code, or `None` if the roster has no such bank.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_bank_by_code(pool: &PgPool, code: &str) -> Result<Option<BankRow>, DbError> {
    let row = sqlx::query_as::<_, BankRow>(
        "SELECT id, code, name, app_id, created_at, updated_at \
         FROM banks \
         WHERE code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

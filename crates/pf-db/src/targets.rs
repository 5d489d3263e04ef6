//! Database operations for the `targets` table.
//!
//! The domain is the sole identity of a target: every write path goes
//! through an upsert keyed on `domain`, so a company can never be
//! duplicated no matter which ingestion script observed it first.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const TARGET_COLUMNS: &str = "id, public_id, domain, company_name, hq_city, hq_state, hq_country, \
     vertical, employee_count, founded_year, is_public, ticker, technologies, search_provider, \
     monthly_traffic, revenue_estimate, icp_score, signal_score, priority_score, status, \
     hiring_summary, last_enriched_at, created_at, updated_at";

/// A row from the `targets` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TargetRow {
    pub id: i64,
    pub public_id: Uuid,
    pub domain: String,
    pub company_name: String,
    pub hq_city: Option<String>,
    pub hq_state: Option<String>,
    pub hq_country: Option<String>,
    pub vertical: Option<String>,
    pub employee_count: Option<i64>,
    pub founded_year: Option<i32>,
    pub is_public: bool,
    pub ticker: Option<String>,
    /// JSON array of detected technology names.
    pub technologies: serde_json::Value,
    pub search_provider: Option<String>,
    pub monthly_traffic: Option<i64>,
    pub revenue_estimate: Option<i64>,
    pub icp_score: i32,
    pub signal_score: i32,
    pub priority_score: i32,
    pub status: String,
    /// JSON blob of the latest hiring signal aggregate.
    pub hiring_summary: Option<serde_json::Value>,
    pub last_enriched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creates or refreshes a target keyed by domain.
///
/// On conflict the seed fields (name, vertical) are overlaid onto the
/// existing row without touching enrichment data or scores.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_target(
    pool: &PgPool,
    domain: &str,
    company_name: &str,
    vertical: Option<&str>,
) -> Result<TargetRow, DbError> {
    let sql = format!(
        "INSERT INTO targets (domain, company_name, vertical) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (domain) DO UPDATE SET \
             company_name = CASE WHEN EXCLUDED.company_name <> '' \
                                 THEN EXCLUDED.company_name ELSE targets.company_name END, \
             vertical     = COALESCE(EXCLUDED.vertical, targets.vertical), \
             updated_at   = NOW() \
         RETURNING {TARGET_COLUMNS}"
    );
    let row = sqlx::query_as::<_, TargetRow>(&sql)
        .bind(domain)
        .bind(company_name)
        .bind(vertical)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Returns a single target by domain, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_target_by_domain(
    pool: &PgPool,
    domain: &str,
) -> Result<Option<TargetRow>, DbError> {
    let sql = format!("SELECT {TARGET_COLUMNS} FROM targets WHERE domain = $1");
    let row = sqlx::query_as::<_, TargetRow>(&sql)
        .bind(domain)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Returns targets ordered by ICP score (highest first), optionally
/// filtered by status bucket.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_targets(
    pool: &PgPool,
    status: Option<&str>,
    limit: i64,
) -> Result<Vec<TargetRow>, DbError> {
    let sql = format!(
        "SELECT {TARGET_COLUMNS} FROM targets \
         WHERE ($1::TEXT IS NULL OR status = $1) \
         ORDER BY icp_score DESC, domain \
         LIMIT $2"
    );
    let rows = sqlx::query_as::<_, TargetRow>(&sql)
        .bind(status)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Returns other targets sharing a vertical, used as the transient
/// competitor set when computing landscape narratives.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_vertical_peers(
    pool: &PgPool,
    vertical: &str,
    exclude_domain: &str,
) -> Result<Vec<TargetRow>, DbError> {
    let sql = format!(
        "SELECT {TARGET_COLUMNS} FROM targets \
         WHERE vertical = $1 AND domain <> $2 \
         ORDER BY icp_score DESC, domain \
         LIMIT 25"
    );
    let rows = sqlx::query_as::<_, TargetRow>(&sql)
        .bind(vertical)
        .bind(exclude_domain)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Writes the outcome of one enrichment pass for a target and stamps
/// `last_enriched_at`. A vendor failure still lands here with empty
/// signals, so the target reads as processed-but-unscored rather than
/// perpetually pending.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the domain does not exist, or
/// [`DbError::Sqlx`] if the update fails.
#[allow(clippy::too_many_arguments)] // full enrichment write-back; no sensible grouping
pub async fn update_target_enrichment(
    pool: &PgPool,
    domain: &str,
    search_provider: Option<&str>,
    technologies: &serde_json::Value,
    monthly_traffic: Option<i64>,
    hiring_summary: Option<&serde_json::Value>,
    signal_score: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE targets \
         SET search_provider = $2, \
             technologies = $3, \
             monthly_traffic = COALESCE($4, monthly_traffic), \
             hiring_summary = COALESCE($5, hiring_summary), \
             signal_score = $6, \
             last_enriched_at = NOW(), \
             updated_at = NOW() \
         WHERE domain = $1",
    )
    .bind(domain)
    .bind(search_provider)
    .bind(technologies)
    .bind(monthly_traffic)
    .bind(hiring_summary)
    .bind(signal_score)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Updates the derived scores and status bucket for a target.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the domain does not exist, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_target_scores(
    pool: &PgPool,
    domain: &str,
    icp_score: i32,
    signal_score: i32,
    priority_score: i32,
    status: &str,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE targets \
         SET icp_score = $2, signal_score = $3, priority_score = $4, status = $5, \
             updated_at = NOW() \
         WHERE domain = $1",
    )
    .bind(domain)
    .bind(icp_score)
    .bind(signal_score)
    .bind(priority_score)
    .bind(status)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Removes a target found to already be running our own product.
///
/// This is a business exclusion, not cleanup: an existing customer must
/// never sit in the prospect pool. Returns `true` when a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_converted_target(pool: &PgPool, domain: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM targets WHERE domain = $1")
        .bind(domain)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

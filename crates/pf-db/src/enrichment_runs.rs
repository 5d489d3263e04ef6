//! Database operations for `enrichment_runs` and `enrichment_run_targets`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `enrichment_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrichmentRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub run_type: String,
    pub trigger_source: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// The schema defines this as `INTEGER NOT NULL DEFAULT 0`.
    pub targets_processed: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row from the `enrichment_run_targets` table.
///
/// `target_id` is nulled by the FK when the target is removed from the
/// pool; `domain` keeps the outcome attributable either way.
///
/// Note: the schema does not include an `updated_at` column on this table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrichmentRunTargetRow {
    pub id: i64,
    pub enrichment_run_id: i64,
    pub target_id: Option<i64>,
    pub domain: String,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// enrichment_runs operations
// ---------------------------------------------------------------------------

/// Creates a new enrichment run in `queued` status.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert or fetch fails.
pub async fn create_enrichment_run(
    pool: &PgPool,
    run_type: &str,
    trigger_source: &str,
) -> Result<EnrichmentRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, EnrichmentRunRow>(
        "INSERT INTO enrichment_runs (public_id, run_type, trigger_source, status) \
         VALUES ($1, $2, $3, 'queued') \
         RETURNING id, public_id, run_type, trigger_source, status, \
                   started_at, completed_at, targets_processed, error_message, created_at",
    )
    .bind(public_id)
    .bind(run_type)
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `running` and sets `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not `queued`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn start_enrichment_run(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE enrichment_runs \
         SET status = 'running', started_at = NOW() \
         WHERE id = $1 AND status = 'queued'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "queued",
        });
    }

    Ok(())
}

/// Marks a run as `succeeded`, sets `completed_at = NOW()` and `targets_processed`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not `running`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn complete_enrichment_run(
    pool: &PgPool,
    id: i64,
    targets_processed: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE enrichment_runs \
         SET status = 'succeeded', completed_at = NOW(), targets_processed = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(targets_processed)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a run as `failed`, sets `completed_at = NOW()` and `error_message`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not `running`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn fail_enrichment_run(
    pool: &PgPool,
    id: i64,
    error_message: &str,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE enrichment_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Fetches a single run by its internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_enrichment_run(pool: &PgPool, id: i64) -> Result<EnrichmentRunRow, DbError> {
    let row = sqlx::query_as::<_, EnrichmentRunRow>(
        "SELECT id, public_id, run_type, trigger_source, status, \
                started_at, completed_at, targets_processed, error_message, created_at \
         FROM enrichment_runs \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Returns the most recent `limit` runs, ordered by `created_at DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_enrichment_runs(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<EnrichmentRunRow>, DbError> {
    let rows = sqlx::query_as::<_, EnrichmentRunRow>(
        "SELECT id, public_id, run_type, trigger_source, status, \
                started_at, completed_at, targets_processed, error_message, created_at \
         FROM enrichment_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ---------------------------------------------------------------------------
// enrichment_run_targets operations
// ---------------------------------------------------------------------------

/// Inserts or updates the per-target result row for an enrichment run.
///
/// Conflicts on `(enrichment_run_id, domain)` update `target_id`, `status`
/// and `error_message` in place, so a retried target overwrites its earlier
/// outcome instead of duplicating it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_enrichment_run_target(
    pool: &PgPool,
    run_id: i64,
    target_id: i64,
    domain: &str,
    status: &str,
    error_message: Option<&str>,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO enrichment_run_targets \
             (enrichment_run_id, target_id, domain, status, error_message) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (enrichment_run_id, domain) DO UPDATE SET \
             target_id     = EXCLUDED.target_id, \
             status        = EXCLUDED.status, \
             error_message = EXCLUDED.error_message",
    )
    .bind(run_id)
    .bind(target_id)
    .bind(domain)
    .bind(status)
    .bind(error_message)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns all target-level result rows for a given enrichment run.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_enrichment_run_targets(
    pool: &PgPool,
    run_id: i64,
) -> Result<Vec<EnrichmentRunTargetRow>, DbError> {
    let rows = sqlx::query_as::<_, EnrichmentRunTargetRow>(
        "SELECT id, enrichment_run_id, target_id, domain, status, error_message, created_at \
         FROM enrichment_run_targets \
         WHERE enrichment_run_id = $1",
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

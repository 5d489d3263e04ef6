//! Database operations for the `vendor_payloads` table.
//!
//! Raw vendor responses are archived verbatim as JSONB so a scoring
//! change can be replayed against history without re-spending API quota.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `vendor_payloads` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VendorPayloadRow {
    pub id: i64,
    pub target_id: i64,
    /// Which vendor produced the payload: `traffic`, `stack`, or `jobs`.
    pub vendor: String,
    pub payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

/// Archives one raw vendor response for a target.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_vendor_payload(
    pool: &PgPool,
    target_id: i64,
    vendor: &str,
    payload: &serde_json::Value,
) -> Result<VendorPayloadRow, DbError> {
    let row = sqlx::query_as::<_, VendorPayloadRow>(
        "INSERT INTO vendor_payloads (target_id, vendor, payload) \
         VALUES ($1, $2, $3) \
         RETURNING id, target_id, vendor, payload, fetched_at",
    )
    .bind(target_id)
    .bind(vendor)
    .bind(payload)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the most recently fetched payload of one vendor for a target,
/// or `None` if that vendor has never been queried for it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_latest_vendor_payload(
    pool: &PgPool,
    target_id: i64,
    vendor: &str,
) -> Result<Option<VendorPayloadRow>, DbError> {
    let row = sqlx::query_as::<_, VendorPayloadRow>(
        "SELECT id, target_id, vendor, payload, fetched_at \
         FROM vendor_payloads \
         WHERE target_id = $1 AND vendor = $2 \
         ORDER BY fetched_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(target_id)
    .bind(vendor)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

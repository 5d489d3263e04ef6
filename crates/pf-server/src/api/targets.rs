//! Target list and detail endpoints for the dashboard.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use pf_scoring::{
    competitive_landscape, displacement_narrative, market_position, CompetitorSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

/// Similarity assigned to same-vertical peers. The external similarity
/// feed is not wired up; peers are treated as moderately similar.
const PEER_SIMILARITY: u8 = 50;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ListTargetsQuery {
    status: Option<String>,
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct TargetSummaryItem {
    pub id: i64,
    pub domain: String,
    pub company_name: String,
    pub vertical: Option<String>,
    pub search_provider: Option<String>,
    pub icp_score: i32,
    pub signal_score: i32,
    pub priority_score: i32,
    pub status: String,
    pub last_enriched_at: Option<DateTime<Utc>>,
}

impl From<pf_db::TargetRow> for TargetSummaryItem {
    fn from(row: pf_db::TargetRow) -> Self {
        Self {
            id: row.id,
            domain: row.domain,
            company_name: row.company_name,
            vertical: row.vertical,
            search_provider: row.search_provider,
            icp_score: row.icp_score,
            signal_score: row.signal_score,
            priority_score: row.priority_score,
            status: row.status,
            last_enriched_at: row.last_enriched_at,
        }
    }
}

pub(in crate::api) async fn list_targets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ListTargetsQuery>,
) -> Result<Json<ApiResponse<Vec<TargetSummaryItem>>>, ApiError> {
    let limit = normalize_limit(query.limit);
    let rows = pf_db::list_targets(&state.pool, query.status.as_deref(), limit)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().map(TargetSummaryItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct TargetNarratives {
    pub market_position: String,
    pub competitive_landscape: String,
    pub displacement: String,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct TargetDetail {
    pub id: i64,
    pub domain: String,
    pub company_name: String,
    pub vertical: Option<String>,
    pub employee_count: Option<i64>,
    pub is_public: bool,
    pub ticker: Option<String>,
    pub technologies: serde_json::Value,
    pub search_provider: Option<String>,
    pub monthly_traffic: Option<i64>,
    pub icp_score: i32,
    pub signal_score: i32,
    pub priority_score: i32,
    pub status: String,
    pub hiring_summary: Option<serde_json::Value>,
    pub narratives: TargetNarratives,
    pub last_enriched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Target detail with landscape narratives computed on read from
/// same-vertical peers. Nothing narrative-related is persisted.
pub(in crate::api) async fn get_target(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(domain): Path<String>,
) -> Result<Json<ApiResponse<TargetDetail>>, ApiError> {
    let domain = pf_core::normalize_domain(&domain);
    let row = pf_db::get_target_by_domain(&state.pool, &domain)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "target not found"))?;

    let competitors = match row.vertical.as_deref() {
        Some(vertical) => pf_db::list_vertical_peers(&state.pool, vertical, &row.domain)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?
            .into_iter()
            .map(|peer| CompetitorSnapshot {
                domain: peer.domain,
                name: peer.company_name,
                search_provider: peer.search_provider,
                // Own customers are removed from the pool at enrichment
                // time, so surviving peers never count as adopters.
                uses_own_product: false,
                similarity: PEER_SIMILARITY,
            })
            .collect(),
        None => Vec::new(),
    };

    let narratives = TargetNarratives {
        market_position: market_position(&state.rules, &competitors),
        competitive_landscape: competitive_landscape(&competitors),
        displacement: displacement_narrative(
            &state.rules,
            row.search_provider.as_deref(),
            &competitors,
        ),
    };

    let detail = TargetDetail {
        id: row.id,
        domain: row.domain,
        company_name: row.company_name,
        vertical: row.vertical,
        employee_count: row.employee_count,
        is_public: row.is_public,
        ticker: row.ticker,
        technologies: row.technologies,
        search_provider: row.search_provider,
        monthly_traffic: row.monthly_traffic,
        icp_score: row.icp_score,
        signal_score: row.signal_score,
        priority_score: row.priority_score,
        status: row.status,
        hiring_summary: row.hiring_summary,
        narratives,
        last_enriched_at: row.last_enriched_at,
        created_at: row.created_at,
    };

    Ok(Json(ApiResponse {
        data: detail,
        meta: ResponseMeta::new(req_id.0),
    }))
}

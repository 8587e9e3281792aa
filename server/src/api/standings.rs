use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{ScoreRecord, TeamStanding, compute_standings};

use crate::standings_cache::persist_standings;
use crate::store::SCORES_READ_RANGE;

use super::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct StandingsQuery {
    /// Exact-match venue filter.
    pub location: Option<String>,
    /// When true, the computed snapshot is also persisted to the
    /// standings cache sheet before responding.
    pub refresh: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub standings: Vec<TeamStanding>,
    pub computed_at: String,
}

/// Season standings, computed fresh from the full score log on every
/// request. The cache sheet is write-only from here: it is refreshed when
/// asked, never read back.
pub async fn get_standings(
    State(state): State<ApiState>,
    Query(query): Query<StandingsQuery>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let rows = state.store.read_all(SCORES_READ_RANGE).await?;
    let records: Vec<ScoreRecord> = rows
        .iter()
        .filter_map(|row| ScoreRecord::from_row(row))
        .collect();
    debug!(
        "Normalized {} of {} stored rows for standings",
        records.len(),
        rows.len()
    );

    let standings = compute_standings(&records, query.location.as_deref());

    if query.refresh.unwrap_or(false) {
        persist_standings(state.store.as_ref(), &standings).await?;
    }

    Ok(Json(StandingsResponse {
        standings,
        computed_at: Utc::now().to_rfc3339(),
    }))
}

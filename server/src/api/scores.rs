use axum::{Json, extract::State, http::StatusCode};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use common::{MAX_ROUNDS, ScoreRecord, is_valid_venue};

use crate::store::SCORES_APPEND_RANGE;

use super::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub team_id: String,
    pub team_name: String,
    pub location: String,
    /// Season week label, preserved exactly as submitted (string or
    /// integer).
    #[serde(default)]
    pub week: Value,
    pub date: String,
    #[serde(default)]
    pub rounds: Vec<f64>,
    pub bonus_round: Option<f64>,
    pub submitted_by: String,
}

fn validate_submission(req: &SubmitScoreRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if req.team_id.is_empty() {
        errors.push("teamId is required".to_string());
    }
    if req.team_name.is_empty() {
        errors.push("teamName is required".to_string());
    }
    if !is_valid_venue(&req.location) {
        errors.push(format!("Unknown location: {}", req.location));
    }
    if NaiveDate::parse_from_str(&req.date, "%Y-%m-%d").is_err() {
        errors.push("date must be in YYYY-MM-DD format".to_string());
    }
    if req.rounds.len() > MAX_ROUNDS {
        errors.push(format!("At most {MAX_ROUNDS} round scores are allowed"));
    }
    if req.submitted_by.is_empty() {
        errors.push("submittedBy is required".to_string());
    }

    errors
}

fn week_label(week: &Value) -> String {
    match week {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Host score submission. The total is computed server-side from the
/// rounds and bonus; the stored row carries a fresh score id and a
/// submission timestamp, and the full stored record is echoed back.
pub async fn submit_score(
    State(state): State<ApiState>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<ScoreRecord>), ApiError> {
    let errors = validate_submission(&req);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors.join(", ")));
    }

    let bonus_round = req.bonus_round.unwrap_or(0.0);
    let total = req.rounds.iter().sum::<f64>() + bonus_round;

    let record = ScoreRecord {
        score_id: Uuid::new_v4().to_string(),
        date: req.date,
        week: week_label(&req.week),
        location: req.location,
        team_id: req.team_id,
        team_name: req.team_name,
        rounds: req.rounds,
        bonus_round,
        total,
        submitted_by: req.submitted_by,
        submitted_at: Utc::now().to_rfc3339(),
    };

    state.store.append(SCORES_APPEND_RANGE, record.to_row()).await?;

    info!(
        "Recorded score {} for team {} at {} ({} points)",
        record.score_id, record.team_id, record.location, record.total
    );
    Ok((StatusCode::CREATED, Json(record)))
}

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::store::{TEAMS_APPEND_RANGE, TEAMS_READ_RANGE};

use super::{ApiState, error::ApiError};

/// A registered league team. Pass-through rows in the teams sheet:
/// teamId, teamName, captain, createdAt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: String,
    pub team_name: String,
    pub captain: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamRequest {
    pub team_name: String,
    #[serde(default)]
    pub captain: String,
}

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}

fn cell(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl Team {
    fn from_row(row: &[Value]) -> Option<Team> {
        let team_id = cell(row, 0);
        if team_id.is_empty() {
            return None;
        }
        Some(Team {
            team_id,
            team_name: cell(row, 1),
            captain: cell(row, 2),
            created_at: cell(row, 3),
        })
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            json!(self.team_id),
            json!(self.team_name),
            json!(self.captain),
            json!(self.created_at),
        ]
    }
}

/// Team self-registration. Open to anyone; names must be unique within
/// the league (compared case-insensitively against the current table).
pub async fn register_team(
    State(state): State<ApiState>,
    Json(req): Json<RegisterTeamRequest>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let name = req.team_name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("teamName is required".to_string()));
    }
    if name.len() > 64 {
        return Err(ApiError::Validation(
            "teamName must be at most 64 characters".to_string(),
        ));
    }

    let rows = state.store.read_all(TEAMS_READ_RANGE).await?;
    let taken = rows
        .iter()
        .filter_map(|row| Team::from_row(row))
        .any(|team| team.team_name.eq_ignore_ascii_case(name));
    if taken {
        return Err(ApiError::Conflict("Team name already registered".to_string()));
    }

    let team = Team {
        team_id: Uuid::new_v4().to_string(),
        team_name: name.to_string(),
        captain: req.captain,
        created_at: Utc::now().to_rfc3339(),
    };
    state.store.append(TEAMS_APPEND_RANGE, team.to_row()).await?;

    info!("Registered team {} ({})", team.team_name, team.team_id);
    Ok((StatusCode::CREATED, Json(team)))
}

/// Lists registered teams straight off the teams sheet.
pub async fn list_teams(State(state): State<ApiState>) -> Result<Json<TeamsResponse>, ApiError> {
    let rows = state.store.read_all(TEAMS_READ_RANGE).await?;
    let teams = rows.iter().filter_map(|row| Team::from_row(row)).collect();
    Ok(Json(TeamsResponse { teams }))
}

use anyhow::{Context, anyhow};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{ApiState, error::ApiError};

const DEFAULT_COUNT: usize = 5;
const MAX_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub topic: String,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<TriviaQuestion>,
}

// Minimal view of a chat-completion response; everything else in the
// payload is ignored.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Thin wrapper over the external generation API: ship the topic off,
/// parse the JSON array that comes back, nothing else. Host-only.
pub async fn generate_questions(
    State(state): State<ApiState>,
    Json(req): Json<GenerateQuestionsRequest>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let api_key = state.question_api_key.as_ref().ok_or_else(|| {
        ApiError::Unavailable("Question generation is not configured".to_string())
    })?;

    if req.topic.trim().is_empty() {
        return Err(ApiError::Validation("topic is required".to_string()));
    }
    let count = req.count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT);

    let prompt = format!(
        "Write {count} pub trivia questions about {}. Respond with only a JSON \
         array of objects with \"question\" and \"answer\" string fields.",
        req.topic.trim()
    );
    let body = json!({
        "model": "gpt-4o-mini",
        "messages": [{ "role": "user", "content": prompt }],
        "temperature": 0.8,
    });

    let response = state
        .http
        .post(&state.question_api_url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .context("Failed to reach question generation API")?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Store(anyhow!(
            "Question generation API returned status {status}"
        )));
    }

    let completion: CompletionResponse = response
        .json()
        .await
        .context("Failed to parse question generation response")?;
    let content = completion
        .choices
        .first()
        .map(|choice| choice.message.content.as_str())
        .ok_or_else(|| anyhow!("Question generation response contained no choices"))?;

    let questions: Vec<TriviaQuestion> = serde_json::from_str(strip_code_fence(content))
        .context("Question generation response was not a JSON question array")?;

    info!(
        "Generated {} questions about {}",
        questions.len(),
        req.topic.trim()
    );
    Ok(Json(QuestionsResponse { questions }))
}

// Models often wrap JSON answers in a markdown code fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|inner| inner.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

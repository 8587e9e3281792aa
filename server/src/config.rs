use std::env;

use anyhow::{Context, Result};

/// Runtime configuration, read from the environment exactly once at
/// startup and passed into every component that needs it. No other module
/// touches process-wide environment state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the API server binds to.
    pub bind_addr: String,
    /// Spreadsheet holding the Scores, Teams and Standings sheets.
    pub spreadsheet_id: String,
    /// Bearer token for the spreadsheet values API.
    pub sheets_token: String,
    /// Shared secret the host presents when submitting scores or
    /// generating questions.
    pub host_secret: String,
    /// Chat-completion endpoint used for question generation.
    pub question_api_url: String,
    /// API key for the question generation endpoint. When unset, the
    /// questions endpoint reports itself unavailable.
    pub question_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(AppConfig {
            bind_addr: env::var("TRIVIA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            spreadsheet_id: env::var("TRIVIA_SPREADSHEET_ID")
                .context("TRIVIA_SPREADSHEET_ID must be set in environment or .env file")?,
            sheets_token: env::var("TRIVIA_SHEETS_TOKEN")
                .context("TRIVIA_SHEETS_TOKEN must be set in environment or .env file")?,
            host_secret: env::var("TRIVIA_HOST_SECRET")
                .context("TRIVIA_HOST_SECRET must be set in environment or .env file")?,
            question_api_url: env::var("TRIVIA_QUESTION_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            question_api_key: env::var("TRIVIA_QUESTION_API_KEY").ok(),
        })
    }
}

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::AppConfig;

use super::SheetStore;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Thin client for the Google Sheets v4 values API. One instance is shared
/// by all requests; it holds no state beyond the connection pool.
pub struct GoogleSheetsStore {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsStore {
    pub fn new(config: &AppConfig) -> Self {
        GoogleSheetsStore {
            client: reqwest::Client::new(),
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            token: config.sheets_token.clone(),
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            self.base_url, self.spreadsheet_id, range, suffix
        )
    }

    async fn check(&self, response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("sheets {what} failed with status {status}: {body}");
        }
        Ok(response)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn read_all(&self, range: &str) -> Result<Vec<Vec<Value>>> {
        let url = self.values_url(range, "");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to read range {range}"))?;
        let response = self.check(response, "read").await?;

        let body: ValueRange = response
            .json()
            .await
            .with_context(|| format!("Failed to parse values for range {range}"))?;
        debug!("Read {} rows from {}", body.values.len(), range);
        Ok(body.values)
    }

    async fn append(&self, range: &str, row: Vec<Value>) -> Result<()> {
        let url = self.values_url(range, ":append?valueInputOption=USER_ENTERED");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .with_context(|| format!("Failed to append to range {range}"))?;
        self.check(response, "append").await?;
        Ok(())
    }

    async fn overwrite(&self, range: &str, rows: Vec<Vec<Value>>) -> Result<()> {
        let url = self.values_url(range, "?valueInputOption=USER_ENTERED");
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .with_context(|| format!("Failed to overwrite range {range}"))?;
        self.check(response, "overwrite").await?;
        Ok(())
    }

    async fn clear(&self, range: &str) -> Result<()> {
        let url = self.values_url(range, ":clear");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to clear range {range}"))?;
        self.check(response, "clear").await?;
        Ok(())
    }
}

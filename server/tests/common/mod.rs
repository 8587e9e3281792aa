#![allow(dead_code)] // not every test file uses every helper

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};

use server::api::{ApiState, build_router};
use server::store::SheetStore;

pub const TEST_HOST_SECRET: &str = "test-host-secret";

/// In-memory stand-in for the spreadsheet store. Keeps one row list per
/// sheet (headers are not modeled; only data rows exist here) and can be
/// told to fail its next clear call.
#[derive(Default)]
pub struct MemoryStore {
    sheets: Mutex<HashMap<String, Vec<Vec<Value>>>>,
    fail_next_clear: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::default())
    }

    /// Seeds data rows into a sheet, replacing whatever was there.
    pub fn seed(&self, sheet: &str, rows: Vec<Vec<Value>>) {
        self.sheets.lock().unwrap().insert(sheet.to_string(), rows);
    }

    pub fn rows(&self, sheet: &str) -> Vec<Vec<Value>> {
        self.sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_next_clear(&self) {
        *self.fail_next_clear.lock().unwrap() = true;
    }
}

fn sheet_name(range: &str) -> String {
    range.split('!').next().unwrap_or(range).to_string()
}

#[async_trait]
impl SheetStore for MemoryStore {
    async fn read_all(&self, range: &str) -> Result<Vec<Vec<Value>>> {
        Ok(self.rows(&sheet_name(range)))
    }

    async fn append(&self, range: &str, row: Vec<Value>) -> Result<()> {
        self.sheets
            .lock()
            .unwrap()
            .entry(sheet_name(range))
            .or_default()
            .push(row);
        Ok(())
    }

    async fn overwrite(&self, range: &str, rows: Vec<Vec<Value>>) -> Result<()> {
        self.sheets.lock().unwrap().insert(sheet_name(range), rows);
        Ok(())
    }

    async fn clear(&self, range: &str) -> Result<()> {
        if std::mem::take(&mut *self.fail_next_clear.lock().unwrap()) {
            bail!("injected clear failure");
        }
        self.sheets.lock().unwrap().remove(&sheet_name(range));
        Ok(())
    }
}

/// Binds the API server on an ephemeral port and returns its base URL.
pub async fn spawn_server(store: Arc<MemoryStore>) -> String {
    let state = ApiState {
        store,
        http: reqwest::Client::new(),
        question_api_url: "http://127.0.0.1:1/unused".to_string(),
        question_api_key: None,
    };
    let app = build_router(state, Arc::new(TEST_HOST_SECRET.to_string()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    format!("http://{addr}")
}

/// A stored score row in the fixed 16-column layout: one played round
/// worth `total` points, no bonus. Tests needing sparser or fuller rows
/// build them by hand.
pub fn score_row(
    score_id: &str,
    team_id: &str,
    team_name: &str,
    total: f64,
    date: &str,
) -> Vec<Value> {
    vec![
        json!(score_id),
        json!(date),
        json!("1"),
        json!("Harbor Taproom"),
        json!(team_id),
        json!(team_name),
        json!(total.to_string()),
        json!(""),
        json!(""),
        json!(""),
        json!(""),
        json!(""),
        json!("0"),
        json!(total.to_string()),
        json!("host"),
        json!("2024-01-01T20:00:00Z"),
    ]
}

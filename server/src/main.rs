use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use server::api::run_api_server;
use server::config::AppConfig;
use server::store::GoogleSheetsStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let store = Arc::new(GoogleSheetsStore::new(&config));

    info!(
        "Starting trivia league server against spreadsheet {}",
        config.spreadsheet_id
    );
    run_api_server(&config, store).await
}

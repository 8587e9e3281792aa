pub mod error;
pub mod middleware;
pub mod questions;
pub mod scores;
pub mod server;
pub mod standings;
pub mod teams;

use std::sync::Arc;

use crate::store::SheetStore;

pub use server::{build_router, run_api_server};

/// Shared handler state. One instance per server; holds no mutable state,
/// so concurrent requests never coordinate through it.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn SheetStore>,
    pub http: reqwest::Client,
    pub question_api_url: String,
    pub question_api_key: Option<String>,
}

pub mod api;
pub mod config;
pub mod standings_cache;
pub mod store;

use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Citalia";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the clinic backend when `CITALIA_API_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Base URL of the clinic backend, overridable per environment.
pub fn api_base_url() -> String {
    env::var("CITALIA_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Session token for the backend, when the embedding shell exports one.
pub fn api_token() -> Option<String> {
    env::var("CITALIA_API_TOKEN").ok().filter(|t| !t.is_empty())
}

/// Default tracing directive when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "citalia=info"
}

//! HTTP client for the encyclopedia
//!
//! Creates the reqwest client every fetch goes through.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Document service configuration
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Scheme and host prepended to article paths
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of fetches allowed in flight at once
    pub slots: usize,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            timeout_secs: 30,
            slots: 2,
        }
    }
}

impl WikiConfig {
    /// Absolute URL of an article path such as `/wiki/Spatha`
    pub fn page_url(&self, path: &str) -> Result<String, WikiError> {
        if !path.starts_with('/') {
            return Err(WikiError::InvalidUrl(path.to_string()));
        }
        Ok(format!("{}{}", self.base_url.trim_end_matches('/'), path))
    }
}

/// Errors from the document service
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No such page: {0}")]
    NotFound(String),
}

/// User agents for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:137.0) Gecko/20100101 Firefox/137.0",
];

/// Get a random user agent
pub fn random_user_agent() -> &'static str {
    use rand::Rng;
    let idx = rand::thread_rng().gen_range(0..USER_AGENTS.len());
    USER_AGENTS[idx]
}

/// Create the HTTP client used for page fetches
pub fn create_wiki_client(config: &WikiConfig) -> Result<Client, WikiError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(random_user_agent())
        .build()
        .map_err(|e| WikiError::ClientBuild(e.to_string()))
}

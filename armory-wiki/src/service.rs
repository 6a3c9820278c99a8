//! Document service
//!
//! The crawl only ever talks to a [`DocumentService`]. The HTTP backend caps
//! concurrent fetches with a [`SlotGate`]; the in-memory backend serves
//! pre-parsed pages and counts how often it was asked.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::{create_wiki_client, SlotGate, WikiConfig, WikiError, WikiPage};

/// Source of parsed encyclopedia pages
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Fetch and parse the page at an article path such as `/wiki/Spatha`
    async fn fetch(&self, path: &str) -> Result<WikiPage, WikiError>;
}

/// Thread-safe shared document service
pub type SharedDocuments = Arc<dyn DocumentService>;

/// Document service backed by HTTP requests
pub struct HttpDocuments {
    config: WikiConfig,
    client: Client,
    gate: SlotGate,
}

impl HttpDocuments {
    pub fn new(config: WikiConfig) -> Result<Self, WikiError> {
        let client = create_wiki_client(&config)?;
        let gate = SlotGate::new(config.slots);
        Ok(Self {
            config,
            client,
            gate,
        })
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }
}

#[async_trait]
impl DocumentService for HttpDocuments {
    async fn fetch(&self, path: &str) -> Result<WikiPage, WikiError> {
        let url = self.config.page_url(path)?;

        let html = {
            let _slot = self.gate.acquire().await;
            debug!("Fetching: {}", url);

            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(WikiError::Status {
                    url,
                    status: response.status().as_u16(),
                });
            }
            response.text().await?
        };

        Ok(WikiPage::parse(path, &html))
    }
}

/// Document service serving pages from memory
#[derive(Debug, Default)]
pub struct MemoryDocuments {
    pages: HashMap<String, WikiPage>,
    fetches: AtomicUsize,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parsed page under its path
    pub fn with_page(mut self, page: WikiPage) -> Self {
        self.pages.insert(page.url.clone(), page);
        self
    }

    /// Register raw HTML under `path`
    pub fn with_html(self, path: &str, html: &str) -> Self {
        self.with_page(WikiPage::parse(path, html))
    }

    /// Number of fetches served or refused so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentService for MemoryDocuments {
    async fn fetch(&self, path: &str) -> Result<WikiPage, WikiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| WikiError::NotFound(path.to_string()))
    }
}

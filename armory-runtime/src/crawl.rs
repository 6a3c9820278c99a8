//! Crawl orchestrator
//!
//! Two layers of discovery from one seed article:
//! - Layer 1: links of the seed page
//! - Layer 2: links of every layer 1 page, minus layer 1 itself
//!
//! Both layers are classified with bounded parallelism; discards go into the
//! shared memo. Confirmed links are downloaded into raw articles. Each stage
//! writes a checkpoint that later runs pick up instead of the network.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use armory_core::{DiscardMemo, DropStats, Link, LinkState, RawArticle};
use armory_wiki::{SharedDocuments, WikiError};

use crate::{load_articles, load_links, save_articles, save_links, Details, LinkProbe};

/// Errors that end a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] WikiError),

    #[error("Malformed checkpoint {path}: {reason}")]
    Checkpoint { path: PathBuf, reason: String },

    #[error("Checkpoint I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crawl configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Article the discovery starts from
    pub seed: String,
    /// Links probed at once during discovery, classification and download
    pub concurrency: usize,
    /// Confirmed links checkpoint
    pub links_path: PathBuf,
    /// Downloaded articles checkpoint
    pub details_path: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: "/wiki/List_of_premodern_combat_weapons".to_string(),
            concurrency: 2,
            links_path: PathBuf::from("Links.txt"),
            details_path: PathBuf::from("Details.json"),
        }
    }
}

/// What a crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub articles: Vec<RawArticle>,
    /// Confirmed links the articles were downloaded from
    pub confirmed_links: usize,
    /// Confirmed links that yielded no article
    pub dropped: DropStats,
    /// Links discarded by classification in this run (0 when it was skipped)
    pub discarded: usize,
    /// Whether the articles came from the details checkpoint
    pub resumed: bool,
}

/// The crawl orchestrator
pub struct Crawler {
    docs: SharedDocuments,
    memo: Arc<DiscardMemo>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(docs: SharedDocuments, memo: Arc<DiscardMemo>, config: CrawlConfig) -> Self {
        Self { docs, memo, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn memo(&self) -> &DiscardMemo {
        &self.memo
    }

    fn concurrency(&self) -> usize {
        self.config.concurrency.max(1)
    }

    /// Links of the seed page
    pub async fn first_layer(&self) -> Result<Vec<Link>, CrawlError> {
        let mut probe = LinkProbe::new(Link::new(self.config.seed.as_str()));
        let links = probe.discover(self.docs.as_ref()).await?;
        info!("First layer links: {}", links.len());
        Ok(links)
    }

    /// Links of every first layer page, deduplicated and disjoint from `first`.
    ///
    /// The first layer comes back as probes that still hold their pages, so
    /// classifying them costs no further fetch.
    pub async fn second_layer(
        &self,
        first: Vec<Link>,
    ) -> Result<(Vec<LinkProbe>, Vec<Link>), CrawlError> {
        let docs = self.docs.as_ref();

        let explored: Vec<(LinkProbe, Vec<Link>)> = stream::iter(first)
            .map(|link| async move {
                let mut probe = LinkProbe::new(link);
                let found = probe.discover(docs).await?;
                Ok::<_, WikiError>((probe, found))
            })
            .buffered(self.concurrency())
            .try_collect()
            .await?;

        let first_urls: HashSet<String> = explored
            .iter()
            .map(|(probe, _)| probe.link().url.clone())
            .collect();
        let mut seen = HashSet::new();
        let mut probes = Vec::with_capacity(explored.len());
        let mut second = Vec::new();

        for (probe, found) in explored {
            probes.push(probe);
            second.extend(found.into_iter().filter(|link| {
                !first_urls.contains(&link.url) && seen.insert(link.url.clone())
            }));
        }

        info!("Second layer links: {}", second.len());
        Ok((probes, second))
    }

    /// Settle every probe of a layer; returns the certain links and remembers
    /// the discarded ones. Pages are released once their link is settled.
    pub async fn classify_layer(
        &self,
        probes: Vec<LinkProbe>,
        layer: &str,
    ) -> Result<Vec<Link>, CrawlError> {
        let total = probes.len();
        let checked = AtomicUsize::new(0);
        let checked = &checked;
        let memo = self.memo.as_ref();
        let docs = self.docs.as_ref();

        let settled: Vec<Link> = stream::iter(probes)
            .map(|mut probe| async move {
                probe.classify(memo, docs).await?;
                probe.release();

                let n = checked.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("Checking {} layer links: {}/{}", layer, n, total);
                Ok::<_, WikiError>(probe.into_link())
            })
            .buffered(self.concurrency())
            .try_collect()
            .await?;

        debug_assert!(settled.iter().all(|l| l.state().is_settled()));

        let (certain, discarded): (Vec<Link>, Vec<Link>) = settled
            .into_iter()
            .partition(|l| l.state() == LinkState::Certain);

        for link in &discarded {
            self.memo.remember(&link.url);
        }
        if !discarded.is_empty() {
            info!("{} {} layer links were discarded", discarded.len(), layer);
        }

        Ok(certain)
    }

    /// Confirmed links, from the links checkpoint or from a fresh two-layer
    /// discovery (which then writes the checkpoint)
    pub async fn confirm_links(&self) -> Result<Vec<Link>, CrawlError> {
        if self.config.links_path.exists() {
            return load_links(&self.config.links_path);
        }

        let first = self.first_layer().await?;
        let (first, second) = self.second_layer(first).await?;
        let second = second.into_iter().map(LinkProbe::new).collect();

        let mut links = self.classify_layer(first, "first").await?;
        links.extend(self.classify_layer(second, "second").await?);
        info!("Certain links: {}", links.len());

        save_links(&self.config.links_path, &links)?;
        Ok(links)
    }

    /// Download the article behind every confirmed link, in link order
    pub async fn download_articles(
        &self,
        links: &[Link],
    ) -> Result<(Vec<RawArticle>, DropStats), CrawlError> {
        let total = links.len();
        let docs = self.docs.as_ref();

        let details: Vec<Details> = stream::iter(links.iter().cloned().enumerate())
            .map(|(i, link)| async move {
                debug!("Downloading details of links: {}/{}", i + 1, total);
                let mut probe = LinkProbe::new(link);
                let details = probe.download_details(docs).await?;
                probe.release();
                Ok::<_, WikiError>(details)
            })
            .buffered(self.concurrency())
            .try_collect()
            .await?;

        let mut articles = Vec::with_capacity(details.len());
        let mut dropped = DropStats::default();
        for detail in details {
            match detail {
                Details::Article(article) => articles.push(article),
                Details::Dropped(reason) => dropped.record(reason),
            }
        }

        Ok((articles, dropped))
    }

    /// Raw articles for the whole run.
    ///
    /// The details checkpoint short-circuits everything; otherwise links are
    /// confirmed (or loaded), downloaded and checkpointed.
    pub async fn retrieve_articles(&self) -> Result<CrawlOutcome, CrawlError> {
        if self.config.details_path.exists() {
            let articles = load_articles(&self.config.details_path)?;
            return Ok(CrawlOutcome {
                confirmed_links: articles.len(),
                articles,
                dropped: DropStats::default(),
                discarded: 0,
                resumed: true,
            });
        }

        let classified = !self.config.links_path.exists();
        let links = self.confirm_links().await?;
        let (articles, dropped) = self.download_articles(&links).await?;
        save_articles(&self.config.details_path, &articles)?;
        info!("Weapons details: {}", articles.len());

        Ok(CrawlOutcome {
            articles,
            confirmed_links: links.len(),
            dropped,
            discarded: if classified { self.memo.len() } else { 0 },
            resumed: false,
        })
    }
}

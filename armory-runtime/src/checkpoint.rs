//! Resumability checkpoints
//!
//! Confirmed links are stored one path per line; downloaded articles as a
//! JSON array. A checkpoint that exists but cannot be read back ends the run.

use std::fs;
use std::path::Path;
use tracing::info;

use armory_core::{Link, RawArticle, WIKI_PREFIX};

use crate::CrawlError;

fn read(path: &Path) -> Result<String, CrawlError> {
    fs::read_to_string(path).map_err(|source| CrawlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), CrawlError> {
    fs::write(path, contents).map_err(|source| CrawlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load confirmed links; every entry comes back `Certain`
pub fn load_links(path: &Path) -> Result<Vec<Link>, CrawlError> {
    let contents = read(path)?;
    let mut links = Vec::new();

    for (number, line) in contents.lines().enumerate() {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        if !url.starts_with(WIKI_PREFIX) {
            return Err(CrawlError::Checkpoint {
                path: path.to_path_buf(),
                reason: format!("line {} is not an article path: {}", number + 1, url),
            });
        }
        links.push(Link::certain(url));
    }

    info!("Loaded {} confirmed links from {}", links.len(), path.display());
    Ok(links)
}

pub fn save_links(path: &Path, links: &[Link]) -> Result<(), CrawlError> {
    let mut contents = String::new();
    for link in links {
        contents.push_str(&link.url);
        contents.push('\n');
    }
    write(path, &contents)
}

pub fn load_articles(path: &Path) -> Result<Vec<RawArticle>, CrawlError> {
    let contents = read(path)?;
    let articles: Vec<RawArticle> =
        serde_json::from_str(&contents).map_err(|e| CrawlError::Checkpoint {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    info!("Loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}

pub fn save_articles(path: &Path, articles: &[RawArticle]) -> Result<(), CrawlError> {
    let json = serde_json::to_string_pretty(articles).map_err(|e| CrawlError::Checkpoint {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    write(path, &json)
}

//! Link probe
//!
//! Wraps one [`Link`] together with its page. The page is fetched the first
//! time a step needs it and kept until [`LinkProbe::release`], so every fetch
//! is visible at the call site.

use std::collections::HashSet;
use tracing::debug;

use armory_core::{
    category_verdict, url_verdict, DiscardMemo, DropReason, Link, LinkState, RawArticle,
};
use armory_wiki::{DocumentService, WikiError, WikiPage};

/// Namespaces never followed during discovery (lower-cased)
const SKIPPED_NAMESPACES: &[&str] = &["/wiki/file:", "/wiki/template:", "/wiki/special:"];

/// Outcome of downloading a confirmed link's details
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    Article(RawArticle),
    Dropped(DropReason),
}

/// A link plus its lazily fetched page
#[derive(Debug)]
pub struct LinkProbe {
    link: Link,
    page: Option<WikiPage>,
}

impl LinkProbe {
    pub fn new(link: Link) -> Self {
        Self { link, page: None }
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Whether a page is currently held
    pub fn is_loaded(&self) -> bool {
        self.page.is_some()
    }

    async fn page(&mut self, docs: &dyn DocumentService) -> Result<&WikiPage, WikiError> {
        let page = match self.page.take() {
            Some(page) => page,
            None => docs.fetch(&self.link.url).await?,
        };
        Ok(self.page.insert(page))
    }

    /// Settle the link's state. URL rules are tried first and cost nothing;
    /// only a URL they cannot decide is fetched for its categories.
    pub async fn classify(
        &mut self,
        memo: &DiscardMemo,
        docs: &dyn DocumentService,
    ) -> Result<LinkState, WikiError> {
        if self.link.state().is_settled() {
            return Ok(self.link.state());
        }

        let state = match url_verdict(&self.link.url, memo) {
            Some(state) => state,
            None => {
                let page = self.page(docs).await?;
                category_verdict(page.categories.as_deref())
            }
        };

        Ok(self.link.settle(state))
    }

    /// Article links found in the page's main content, deduplicated, in
    /// document order
    pub async fn discover(&mut self, docs: &dyn DocumentService) -> Result<Vec<Link>, WikiError> {
        let page = self.page(docs).await?;

        let Some(hrefs) = page.links.as_ref() else {
            debug!("No main content in {}", page.url);
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let links = hrefs
            .iter()
            .filter(|href| {
                let lower = href.to_lowercase();
                !SKIPPED_NAMESPACES.iter().any(|ns| lower.starts_with(ns))
            })
            .filter(|href| seen.insert(href.as_str()))
            .map(|href| Link::new(href.as_str()))
            .collect();

        Ok(links)
    }

    /// Text and categories of the article behind a confirmed link
    pub async fn download_details(
        &mut self,
        docs: &dyn DocumentService,
    ) -> Result<Details, WikiError> {
        let url = self.link.url.clone();
        let page = self.page(docs).await?;

        let text = match page.article_text() {
            Some(text) if !text.trim().is_empty() => text,
            Some(_) => return Ok(Details::Dropped(DropReason::EmptyArticle)),
            None => return Ok(Details::Dropped(DropReason::MissingContent)),
        };

        let Some(categories) = page.categories.clone() else {
            return Ok(Details::Dropped(DropReason::MissingContent));
        };

        Ok(Details::Article(RawArticle {
            name: article_name(&url),
            url,
            text,
            categories,
        }))
    }

    /// Drop the held page
    pub fn release(&mut self) {
        self.page = None;
    }

    pub fn into_link(self) -> Link {
        self.link
    }
}

/// Display name from an article path: `/wiki/Dao_(sword)` -> `Dao (sword)`
pub fn article_name(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    decoded.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_wiki::MemoryDocuments;

    fn page(url: &str, links: &[&str], paragraphs: Option<&[&str]>, categories: Option<&[&str]>) -> WikiPage {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        WikiPage {
            url: url.to_string(),
            links: Some(owned(links)),
            paragraphs: paragraphs.map(owned),
            categories: categories.map(owned),
        }
    }

    #[tokio::test]
    async fn test_category_namespace_needs_no_fetch() {
        let docs = MemoryDocuments::new();
        let memo = DiscardMemo::new();
        let mut probe = LinkProbe::new(Link::new("/wiki/Category:Weapons"));

        let state = probe.classify(&memo, &docs).await.unwrap();
        assert_eq!(state, LinkState::Discard);
        assert_eq!(docs.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_weapon_url_with_list_needs_no_fetch() {
        let docs = MemoryDocuments::new();
        let memo = DiscardMemo::new();
        let mut probe = LinkProbe::new(Link::new("/wiki/List_of_medieval_weapons"));

        assert_eq!(probe.classify(&memo, &docs).await.unwrap(), LinkState::Discard);
        assert_eq!(docs.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_memo_never_fetches() {
        let docs = MemoryDocuments::new().with_page(page(
            "/wiki/Falchion",
            &[],
            None,
            Some(&["Medieval weapons"]),
        ));
        let memo = DiscardMemo::new();
        memo.remember("/wiki/Falchion");

        for _ in 0..3 {
            let mut probe = LinkProbe::new(Link::new("/wiki/Falchion"));
            assert_eq!(probe.classify(&memo, &docs).await.unwrap(), LinkState::Discard);
        }
        assert_eq!(docs.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_category_verdict_costs_one_fetch_and_is_idempotent() {
        let docs = MemoryDocuments::new().with_page(page(
            "/wiki/Falchion",
            &[],
            None,
            Some(&["Swords", "Medieval weapons"]),
        ));
        let memo = DiscardMemo::new();

        let mut probe = LinkProbe::new(Link::new("/wiki/Falchion"));
        assert_eq!(probe.classify(&memo, &docs).await.unwrap(), LinkState::Certain);
        assert!(probe.is_loaded());
        assert_eq!(docs.fetch_count(), 1);

        // settled state is returned without another fetch
        assert_eq!(probe.classify(&memo, &docs).await.unwrap(), LinkState::Certain);
        assert_eq!(docs.fetch_count(), 1);

        probe.release();
        assert!(!probe.is_loaded());

        let mut again = LinkProbe::new(Link::new("/wiki/Falchion"));
        assert_eq!(again.classify(&memo, &docs).await.unwrap(), LinkState::Certain);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let docs = MemoryDocuments::new();
        let memo = DiscardMemo::new();
        let mut probe = LinkProbe::new(Link::new("/wiki/Falchion"));

        let result = probe.classify(&memo, &docs).await;
        assert!(matches!(result, Err(WikiError::NotFound(_))));
        assert_eq!(probe.link().state(), LinkState::Unchecked);
    }

    #[tokio::test]
    async fn test_discover_filters_and_dedups() {
        let docs = MemoryDocuments::new().with_page(page(
            "/wiki/Seed",
            &[
                "/wiki/Falchion",
                "/wiki/File:Falchion.jpg",
                "/wiki/Template:Swords",
                "/wiki/Special:Random",
                "/wiki/Falchion",
                "/wiki/Jian",
            ],
            None,
            None,
        ));

        let mut probe = LinkProbe::new(Link::new("/wiki/Seed"));
        let links = probe.discover(&docs).await.unwrap();
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["/wiki/Falchion", "/wiki/Jian"]);
        assert!(links.iter().all(|l| l.state() == LinkState::Unchecked));
    }

    #[tokio::test]
    async fn test_download_details() {
        let docs = MemoryDocuments::new()
            .with_page(page(
                "/wiki/Dao_(sword)",
                &[],
                Some(&["A Chinese sword.", "Single edged."]),
                Some(&["Chinese swords"]),
            ))
            .with_page(page("/wiki/Empty", &[], Some(&["  ", "\n"]), Some(&["Swords"])))
            .with_page(page("/wiki/Uncategorized", &[], Some(&["Text."]), None));

        let mut probe = LinkProbe::new(Link::certain("/wiki/Dao_(sword)"));
        let details = probe.download_details(&docs).await.unwrap();
        assert_eq!(
            details,
            Details::Article(RawArticle {
                name: "Dao (sword)".to_string(),
                url: "/wiki/Dao_(sword)".to_string(),
                text: "A Chinese sword. Single edged.".to_string(),
                categories: vec!["Chinese swords".to_string()],
            })
        );

        let mut probe = LinkProbe::new(Link::certain("/wiki/Empty"));
        assert_eq!(
            probe.download_details(&docs).await.unwrap(),
            Details::Dropped(DropReason::EmptyArticle)
        );

        let mut probe = LinkProbe::new(Link::certain("/wiki/Uncategorized"));
        assert_eq!(
            probe.download_details(&docs).await.unwrap(),
            Details::Dropped(DropReason::MissingContent)
        );
    }

    #[test]
    fn test_article_name() {
        assert_eq!(article_name("/wiki/Mere_(weapon)"), "Mere (weapon)");
        assert_eq!(article_name("/wiki/Ng%C4%81ti"), "Ngāti");
    }
}

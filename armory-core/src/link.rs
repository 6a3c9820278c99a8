//! Candidate links and their classification state
//!
//! A link starts `Unchecked` and settles exactly once into `Certain` or
//! `Discard`. The decision table is split in two halves: rules that only need
//! the URL (free) and the rule that needs the page categories (one fetch).

use dashmap::DashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::WEAPON_MARKER;

/// Classification state of a candidate link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Unchecked,
    Certain,
    Discard,
}

impl LinkState {
    pub fn is_settled(self) -> bool {
        self != LinkState::Unchecked
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkState::Unchecked => "Unchecked",
            LinkState::Certain => "Certain",
            LinkState::Discard => "Discard",
        };
        f.write_str(name)
    }
}

/// A candidate article, identified by its path (e.g. `/wiki/Falchion`)
#[derive(Debug, Clone, Eq)]
pub struct Link {
    pub url: String,
    state: LinkState,
}

impl Link {
    /// Create a fresh, unchecked link
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: LinkState::Unchecked,
        }
    }

    /// Create a link that is already confirmed (e.g. loaded from a checkpoint)
    pub fn certain(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: LinkState::Certain,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Settle the link. Only an unchecked link can change state; a settled
    /// link keeps its state and that state is returned.
    pub fn settle(&mut self, state: LinkState) -> LinkState {
        if self.state == LinkState::Unchecked {
            self.state = state;
        }
        self.state
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.state, self.url)
    }
}

/// URLs that were rejected once during this process.
///
/// Shared by every classification worker; a URL in here is never fetched again.
#[derive(Debug, Default)]
pub struct DiscardMemo {
    urls: DashSet<String>,
}

impl DiscardMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Returns true if the URL was not yet remembered
    pub fn remember(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Stop terms for link URLs and categories (matched case-sensitively).
///
/// They cover ambiguous senses of "weapon": people, companies, practices,
/// lists, armour, disambiguation pages, sport and modern military hardware.
pub const URL_STOP_TERMS: &[&str] = &[
    "People", "people", "Compan", "compan", "Practices", "practices", "List", "list",
    "Preparation", "preparation", "Armour", "armour", "Disambiguation", "defence", "sport",
    "Steelmaking", "Robots", "formations", "Muskets", "guns", "Guns", "Magic", "magic",
    "Political", "Naval", "insignia", "Rifle", "rifle", "Missile", "missile", "Rocket",
    "rocket", "Aircraft", "aircraft", "Nuclear", "nuclear", "Bomb", "bomb",
];

/// Namespaces that never hold an article (lower-cased)
const NON_ARTICLE_PREFIXES: &[&str] = &[
    "/wiki/talk:",
    "/wiki/category:",
    "/wiki/category_talk:",
    "/wiki/template_talk:",
];

fn contains_stop_term(text: &str) -> bool {
    URL_STOP_TERMS.iter().any(|term| text.contains(term))
}

/// Decide a link from its URL alone.
///
/// Returns `None` when the URL says nothing and the page categories must be
/// inspected. Rule order: discard memo, non-article namespace, weapon marker.
pub fn url_verdict(url: &str, memo: &DiscardMemo) -> Option<LinkState> {
    if memo.contains(url) {
        return Some(LinkState::Discard);
    }

    let lower = url.to_lowercase();
    if NON_ARTICLE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Some(LinkState::Discard);
    }

    if lower.contains(WEAPON_MARKER) {
        if contains_stop_term(url) {
            return Some(LinkState::Discard);
        }
        return Some(LinkState::Certain);
    }

    None
}

/// Decide a link from its page categories (`None` = page had no category box)
pub fn category_verdict(categories: Option<&[String]>) -> LinkState {
    let Some(categories) = categories else {
        return LinkState::Discard;
    };

    if !categories
        .iter()
        .any(|c| c.to_lowercase().contains(WEAPON_MARKER))
    {
        return LinkState::Discard;
    }

    if categories.iter().any(|c| contains_stop_term(c)) {
        return LinkState::Discard;
    }

    LinkState::Certain
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_namespace_discarded_from_url() {
        let memo = DiscardMemo::new();
        assert_eq!(
            url_verdict("/wiki/Category:Weapons", &memo),
            Some(LinkState::Discard)
        );
        assert_eq!(
            url_verdict("/wiki/Talk:Sword", &memo),
            Some(LinkState::Discard)
        );
        assert_eq!(
            url_verdict("/wiki/template_talk:Swords", &memo),
            Some(LinkState::Discard)
        );
    }

    #[test]
    fn test_weapon_url_with_stop_term() {
        let memo = DiscardMemo::new();
        assert_eq!(
            url_verdict("/wiki/List_of_premodern_combat_weapons", &memo),
            Some(LinkState::Discard)
        );
        assert_eq!(
            url_verdict("/wiki/Nuclear_weapon", &memo),
            Some(LinkState::Discard)
        );
    }

    #[test]
    fn test_weapon_url_certain() {
        let memo = DiscardMemo::new();
        assert_eq!(
            url_verdict("/wiki/Mere_(weapon)", &memo),
            Some(LinkState::Certain)
        );
        assert_eq!(
            url_verdict("/wiki/Pole_WEAPON", &memo),
            Some(LinkState::Certain)
        );
    }

    #[test]
    fn test_stop_terms_are_case_sensitive() {
        let memo = DiscardMemo::new();
        // "LIST" is not a stop term, only "List" and "list" are
        assert_eq!(
            url_verdict("/wiki/LIST_weapon", &memo),
            Some(LinkState::Certain)
        );
    }

    #[test]
    fn test_plain_url_needs_categories() {
        let memo = DiscardMemo::new();
        assert_eq!(url_verdict("/wiki/Falchion", &memo), None);
    }

    #[test]
    fn test_memo_short_circuits() {
        let memo = DiscardMemo::new();
        assert!(memo.remember("/wiki/Falchion"));
        assert!(!memo.remember("/wiki/Falchion"));
        assert_eq!(
            url_verdict("/wiki/Falchion", &memo),
            Some(LinkState::Discard)
        );
        // memo wins even over the weapon marker
        memo.remember("/wiki/Mere_(weapon)");
        assert_eq!(
            url_verdict("/wiki/Mere_(weapon)", &memo),
            Some(LinkState::Discard)
        );
    }

    #[test]
    fn test_category_verdicts() {
        assert_eq!(category_verdict(None), LinkState::Discard);
        assert_eq!(
            category_verdict(Some(&cats(&["Swords", "Medieval history"]))),
            LinkState::Discard
        );
        assert_eq!(
            category_verdict(Some(&cats(&["Swords", "Medieval Weapons"]))),
            LinkState::Certain
        );
        assert_eq!(
            category_verdict(Some(&cats(&["Weapons", "Naval warfare"]))),
            LinkState::Discard
        );
    }

    #[test]
    fn test_settle_is_monotonic() {
        let mut link = Link::new("/wiki/Falchion");
        assert_eq!(link.settle(LinkState::Discard), LinkState::Discard);
        assert_eq!(link.settle(LinkState::Certain), LinkState::Discard);

        let mut link = Link::certain("/wiki/Spatha");
        assert_eq!(link.settle(LinkState::Discard), LinkState::Certain);
    }

    #[test]
    fn test_link_identity_is_url() {
        let mut a = Link::new("/wiki/Jian");
        a.settle(LinkState::Certain);
        let b = Link::new("/wiki/Jian");
        assert_eq!(a, b);

        let set: HashSet<Link> = [a, b, Link::new("/wiki/jian")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}

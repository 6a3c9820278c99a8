//! Accounting for items that fall out of the pipeline
//!
//! None of these are errors: each one only shrinks the output set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a link or article produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Main content or category box missing from the page
    MissingContent,
    /// Article text empty or whitespace only
    EmptyArticle,
    /// Article mentions a term outside the game's scope
    OutOfScope,
    /// No attack vocabulary term occurs in the article
    ZeroAttackSignal,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DropReason::MissingContent => "missing content",
            DropReason::EmptyArticle => "empty article",
            DropReason::OutOfScope => "out of scope",
            DropReason::ZeroAttackSignal => "zero attack signal",
        };
        f.write_str(name)
    }
}

/// Per-reason drop counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStats {
    pub missing_content: usize,
    pub empty_article: usize,
    pub out_of_scope: usize,
    pub zero_attack_signal: usize,
}

impl DropStats {
    pub fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingContent => self.missing_content += 1,
            DropReason::EmptyArticle => self.empty_article += 1,
            DropReason::OutOfScope => self.out_of_scope += 1,
            DropReason::ZeroAttackSignal => self.zero_attack_signal += 1,
        }
    }

    /// Add another stage's counters to these
    pub fn merge(&mut self, other: &DropStats) {
        self.missing_content += other.missing_content;
        self.empty_article += other.empty_article;
        self.out_of_scope += other.out_of_scope;
        self.zero_attack_signal += other.zero_attack_signal;
    }

    pub fn total(&self) -> usize {
        self.missing_content + self.empty_article + self.out_of_scope + self.zero_attack_signal
    }
}

//! Attack and defense vocabularies
//!
//! Built once at startup and shared read-only by every extraction worker.

use std::collections::HashSet;

/// Terms whose frequency expresses attack and defense strength
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    attack_terms: HashSet<String>,
    defense_terms: HashSet<String>,
}

impl Vocabulary {
    pub fn new(attack_terms: HashSet<String>, defense_terms: HashSet<String>) -> Self {
        Self {
            attack_terms,
            defense_terms,
        }
    }

    pub fn attack_terms(&self) -> &HashSet<String> {
        &self.attack_terms
    }

    pub fn defense_terms(&self) -> &HashSet<String> {
        &self.defense_terms
    }

    /// Sum of attack term occurrences in `text`
    pub fn attack_score(&self, text: &str) -> u32 {
        score(&self.attack_terms, text)
    }

    /// Sum of defense term occurrences in `text`
    pub fn defense_score(&self, text: &str) -> u32 {
        score(&self.defense_terms, text)
    }
}

/// Non-overlapping occurrences of `term` in `text`
pub fn count_occurrences(text: &str, term: &str) -> u32 {
    if term.is_empty() {
        return 0;
    }
    text.matches(term).count() as u32
}

fn score(terms: &HashSet<String>, text: &str) -> u32 {
    terms.iter().map(|term| count_occurrences(text, term)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scores_sum_every_term() {
        let vocab = Vocabulary::new(set(&["powerful", "vicious"]), set(&["sturdy"]));
        let text = "a powerful and vicious blade, very powerful";
        assert_eq!(vocab.attack_score(text), 3);
        assert_eq!(vocab.defense_score(text), 0);
    }

    #[test]
    fn test_overlapping_terms_both_count() {
        let vocab = Vocabulary::new(set(&["power", "powerful"]), HashSet::new());
        assert_eq!(vocab.attack_score("powerful"), 2);
    }

    #[test]
    fn test_empty_term_never_counts() {
        assert_eq!(count_occurrences("abc", ""), 0);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
    }
}

//! In-memory synonym graph loaded from TOML
//!
//! ```toml
//! [[sense]]
//! word = "powerful"
//! pos = "adjective"
//! words = ["powerful", "potent", "strong"]
//!
//! [[sense]]
//! word = "powerful"
//! pos = "adjective"
//! words = ["powerless"]
//! antonym = true
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::{LexiconError, PartOfSpeech, Relation, SenseGroup, SynonymService};

#[derive(Debug, Deserialize)]
struct ThesaurusFile {
    #[serde(default)]
    sense: Vec<SenseEntry>,
}

#[derive(Debug, Deserialize)]
struct SenseEntry {
    word: String,
    pos: PartOfSpeech,
    words: Vec<String>,
    #[serde(default)]
    antonym: bool,
}

/// Synonym graph held entirely in memory
#[derive(Debug, Default)]
pub struct Thesaurus {
    senses: HashMap<String, Vec<(PartOfSpeech, SenseGroup)>>,
}

impl Thesaurus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a thesaurus from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, LexiconError> {
        let file: ThesaurusFile = toml::from_str(content)?;
        let mut thesaurus = Self::new();
        for entry in file.sense {
            thesaurus = thesaurus.with_sense(&entry.word, entry.pos, &entry.words, entry.antonym);
        }
        Ok(thesaurus)
    }

    /// Load a thesaurus file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Add one sense of `word`
    pub fn with_sense(mut self, word: &str, pos: PartOfSpeech, words: &[impl AsRef<str>], antonym: bool) -> Self {
        let relations = if antonym {
            vec![Relation::Antonym]
        } else {
            vec![Relation::SimilarTo]
        };
        let group = SenseGroup::new(
            words.iter().map(|w| w.as_ref().to_string()).collect(),
            relations,
        );
        self.senses
            .entry(word.to_lowercase())
            .or_default()
            .push((pos, group));
        self
    }

    pub fn len(&self) -> usize {
        self.senses.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}

impl SynonymService for Thesaurus {
    fn sense_groups(
        &self,
        word: &str,
        parts: &[PartOfSpeech],
    ) -> Result<Vec<SenseGroup>, LexiconError> {
        Ok(self
            .senses
            .get(&word.to_lowercase())
            .map(|senses| {
                senses
                    .iter()
                    .filter(|(pos, _)| parts.contains(pos))
                    .map(|(_, group)| group.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[sense]]
        word = "powerful"
        pos = "adjective"
        words = ["powerful", "potent"]

        [[sense]]
        word = "powerful"
        pos = "adjective"
        words = ["powerless"]
        antonym = true

        [[sense]]
        word = "powerful"
        pos = "verb"
        words = ["overpower"]
    "#;

    #[test]
    fn test_from_toml() {
        let thesaurus = Thesaurus::from_toml_str(SAMPLE).unwrap();
        assert_eq!(thesaurus.len(), 3);

        let groups = thesaurus
            .sense_groups("Powerful", &PartOfSpeech::EXPANSION)
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert!(!groups[0].is_antonymous());
        assert!(groups[1].is_antonymous());
    }

    #[test]
    fn test_unknown_word_has_no_senses() {
        let thesaurus = Thesaurus::from_toml_str(SAMPLE).unwrap();
        let groups = thesaurus
            .sense_groups("sturdy", &PartOfSpeech::EXPANSION)
            .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        let result = Thesaurus::from_toml_str("[[sense]]\nword = 3");
        assert!(matches!(result, Err(LexiconError::Toml(_))));
    }
}

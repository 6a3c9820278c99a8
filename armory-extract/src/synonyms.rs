//! Synonym service interface
//!
//! A lexical database answers "which words share a sense with this word",
//! grouped by sense, with the relations each sense carries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from lexical backends
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {file} line {line}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid thesaurus: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No dictionary files found in {0}")]
    EmptyDictionary(PathBuf),
}

/// Word class of a sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Word classes consulted during vocabulary expansion
    pub const EXPANSION: [PartOfSpeech; 3] = [
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Noun,
    ];
}

/// Relation attached to a sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Antonym,
    SimilarTo,
    Hypernym,
    Hyponym,
    AlsoSee,
    Attribute,
    Derivation,
    Pertainym,
    Other,
}

/// Words sharing one sense, plus the relations that sense carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseGroup {
    pub words: Vec<String>,
    pub relations: Vec<Relation>,
}

impl SenseGroup {
    pub fn new(words: Vec<String>, relations: Vec<Relation>) -> Self {
        Self { words, relations }
    }

    /// Whether this sense is tied to its word by opposition
    pub fn is_antonymous(&self) -> bool {
        self.relations.contains(&Relation::Antonym)
    }
}

/// A lexical database
///
/// Backends are consumed by [`crate::build_vocabulary`], so whatever they
/// hold is released as soon as the vocabulary exists.
pub trait SynonymService {
    /// All senses of `word` within the given word classes
    fn sense_groups(
        &self,
        word: &str,
        parts: &[PartOfSpeech],
    ) -> Result<Vec<SenseGroup>, LexiconError>;
}

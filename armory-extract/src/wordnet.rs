//! WordNet dictionary backend
//!
//! Reads the Princeton WordNet database files (`index.<pos>` and
//! `data.<pos>`) from one directory. Index lines map a lemma to synset
//! offsets; an offset is the byte position of the synset line in the data
//! file.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::{LexiconError, PartOfSpeech, Relation, SenseGroup, SynonymService};

/// One word class: lemma index plus the raw data file
#[derive(Debug)]
struct PartFiles {
    index: HashMap<String, Vec<usize>>,
    data: String,
}

/// WordNet database loaded from disk
#[derive(Debug)]
pub struct WordNet {
    parts: HashMap<PartOfSpeech, PartFiles>,
}

fn file_suffix(pos: PartOfSpeech) -> &'static str {
    match pos {
        PartOfSpeech::Noun => "noun",
        PartOfSpeech::Verb => "verb",
        PartOfSpeech::Adjective => "adj",
        PartOfSpeech::Adverb => "adv",
    }
}

fn relation_for(symbol: &str) -> Relation {
    match symbol {
        "!" => Relation::Antonym,
        "&" => Relation::SimilarTo,
        "@" | "@i" => Relation::Hypernym,
        "~" | "~i" => Relation::Hyponym,
        "^" => Relation::AlsoSee,
        "=" => Relation::Attribute,
        "+" => Relation::Derivation,
        "\\" => Relation::Pertainym,
        _ => Relation::Other,
    }
}

/// Lemma form used by the index (`hard hitting` -> `hard_hitting`)
fn lemma_key(word: &str) -> String {
    word.trim().to_lowercase().replace(' ', "_")
}

/// Word as it appears in prose: underscores to spaces, adjective marker removed
fn display_word(raw: &str) -> String {
    let word = match raw.find('(') {
        Some(pos) if raw.ends_with(')') => &raw[..pos],
        _ => raw,
    };
    word.replace('_', " ")
}

impl WordNet {
    /// Open the dictionary directory. Word classes whose files are absent are
    /// skipped; at least one must be present.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, LexiconError> {
        let dir = dir.as_ref();
        let mut parts = HashMap::new();

        for pos in [
            PartOfSpeech::Noun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Adverb,
        ] {
            let suffix = file_suffix(pos);
            let index_path = dir.join(format!("index.{}", suffix));
            let data_path = dir.join(format!("data.{}", suffix));
            if !index_path.exists() || !data_path.exists() {
                continue;
            }

            let read = |path: &Path| {
                std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            };

            let index = parse_index(&read(&index_path)?, &format!("index.{}", suffix))?;
            let data = read(&data_path)?;
            debug!("Loaded WordNet {}: {} lemmas", suffix, index.len());
            parts.insert(pos, PartFiles { index, data });
        }

        if parts.is_empty() {
            return Err(LexiconError::EmptyDictionary(dir.to_path_buf()));
        }

        Ok(Self { parts })
    }

    fn synset(&self, pos: PartOfSpeech, offset: usize) -> Result<SenseGroup, LexiconError> {
        let file = format!("data.{}", file_suffix(pos));
        let malformed = |reason: String| LexiconError::Parse {
            file: file.clone(),
            line: offset,
            reason,
        };

        let part = &self.parts[&pos];
        let rest = part
            .data
            .get(offset..)
            .ok_or_else(|| malformed("offset past end of file".to_string()))?;
        let line = rest.lines().next().unwrap_or_default();

        parse_data_line(line, offset).map_err(malformed)
    }
}

impl SynonymService for WordNet {
    fn sense_groups(
        &self,
        word: &str,
        parts: &[PartOfSpeech],
    ) -> Result<Vec<SenseGroup>, LexiconError> {
        let key = lemma_key(word);
        let mut groups = Vec::new();

        for pos in parts {
            let Some(part) = self.parts.get(pos) else {
                continue;
            };
            let Some(offsets) = part.index.get(&key) else {
                continue;
            };
            for &offset in offsets {
                groups.push(self.synset(*pos, offset)?);
            }
        }

        Ok(groups)
    }
}

/// Parse an index file into lemma -> synset offsets
fn parse_index(content: &str, file: &str) -> Result<HashMap<String, Vec<usize>>, LexiconError> {
    let mut index = HashMap::new();

    for (number, line) in content.lines().enumerate() {
        // license header lines start with spaces
        if line.starts_with(' ') || line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: &str| LexiconError::Parse {
            file: file.to_string(),
            line: number + 1,
            reason: reason.to_string(),
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 {
            return Err(malformed("too few fields"));
        }

        let synset_cnt: usize = tokens[2]
            .parse()
            .map_err(|_| malformed("bad synset count"))?;
        if synset_cnt > tokens.len() {
            return Err(malformed("synset count exceeds fields"));
        }

        let offsets = tokens[tokens.len() - synset_cnt..]
            .iter()
            .map(|t| t.parse::<usize>().map_err(|_| malformed("bad synset offset")))
            .collect::<Result<Vec<_>, _>>()?;

        index.insert(tokens[0].to_string(), offsets);
    }

    Ok(index)
}

/// Parse one data line:
/// `offset lex_filenum ss_type w_cnt (word lex_id)* p_cnt (symbol offset pos src_tgt)* | gloss`
fn parse_data_line(line: &str, offset: usize) -> Result<SenseGroup, String> {
    let body = line.split(" | ").next().unwrap_or(line);
    let tokens: Vec<&str> = body.split_whitespace().collect();

    let recorded: usize = tokens
        .first()
        .and_then(|t| t.parse().ok())
        .ok_or("missing synset offset")?;
    if recorded != offset {
        return Err(format!("expected synset {} but found {}", offset, recorded));
    }

    let w_cnt = tokens
        .get(3)
        .and_then(|t| usize::from_str_radix(t, 16).ok())
        .ok_or("bad word count")?;

    let words_end = 4 + w_cnt * 2;
    let words = tokens
        .get(4..words_end)
        .ok_or("word list truncated")?
        .chunks(2)
        .map(|pair| display_word(pair[0]))
        .collect();

    let p_cnt: usize = tokens
        .get(words_end)
        .and_then(|t| t.parse().ok())
        .ok_or("bad pointer count")?;

    let relations = tokens
        .get(words_end + 1..words_end + 1 + p_cnt * 4)
        .ok_or("pointer list truncated")?
        .chunks(4)
        .map(|ptr| relation_for(ptr[0]))
        .collect();

    Ok(SenseGroup::new(words, relations))
}

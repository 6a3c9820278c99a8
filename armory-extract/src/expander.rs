//! Lexical term expansion
//!
//! Attack and defense cannot be listed by hand, so each vocabulary starts
//! from a few seed words and grows through the synonym graph for a fixed
//! number of hops. Deeper expansion drifts into unrelated senses.

use std::collections::HashSet;
use tracing::{debug, info};

use armory_core::Vocabulary;

use crate::{LexiconError, PartOfSpeech, SynonymService};

/// Seeds of the attack vocabulary
pub const ATTACK_SEEDS: &[&str] = &["powerful", "vicious"];

/// Seeds of the defense vocabulary
pub const DEFENSE_SEEDS: &[&str] = &["sturdy", "defensive", "protective", "fortified"];

/// Number of hops taken from the seeds
pub const EXPANSION_DEPTH: usize = 3;

/// Grow `seeds` through `service` for `depth` hops.
///
/// Senses flagged as antonyms are excluded outright. Terms are lower-cased,
/// since scoring scans lower-cased text. A word joins the next frontier only
/// the first time it enters the vocabulary.
pub fn expand_terms(
    service: &dyn SynonymService,
    seeds: &[&str],
    depth: usize,
) -> Result<HashSet<String>, LexiconError> {
    let mut frontier: Vec<String> = seeds.iter().map(|s| s.to_lowercase()).collect();
    let mut vocabulary: HashSet<String> = frontier.iter().cloned().collect();

    for hop in 0..depth {
        let mut next = Vec::new();

        for word in &frontier {
            for group in service.sense_groups(word, &PartOfSpeech::EXPANSION)? {
                if group.is_antonymous() {
                    continue;
                }
                for related in group.words {
                    let related = related.to_lowercase();
                    if !vocabulary.contains(&related) {
                        vocabulary.insert(related.clone());
                        next.push(related);
                    }
                }
            }
        }

        debug!("Expansion hop {}: {} new terms", hop + 1, next.len());
        frontier = next;
    }

    Ok(vocabulary)
}

/// Build both vocabularies, then release the synonym service
pub fn build_vocabulary<S: SynonymService>(service: S) -> Result<Vocabulary, LexiconError> {
    let attack = expand_terms(&service, ATTACK_SEEDS, EXPANSION_DEPTH)?;
    let defense = expand_terms(&service, DEFENSE_SEEDS, EXPANSION_DEPTH)?;
    drop(service);

    info!(
        "Vocabulary ready: {} attack terms, {} defense terms",
        attack.len(),
        defense.len()
    );
    Ok(Vocabulary::new(attack, defense))
}

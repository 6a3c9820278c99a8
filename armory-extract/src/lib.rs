//! Armory Extract
//!
//! Turns raw articles into game weapons:
//! - **Synonyms**: lexical database interface with WordNet and TOML backends
//! - **Expander**: grows attack/defense vocabularies from seed words
//! - **Classifier**: weighted term frequency weapon typing
//! - **Attributes**: attack, defense, length, wield type and price
//! - **Forge**: order-preserving pipeline over a batch of articles

pub mod synonyms;
pub mod thesaurus;
pub mod wordnet;
pub mod expander;
pub mod classifier;
pub mod rng;
pub mod attributes;
pub mod forge;

pub use synonyms::*;
pub use thesaurus::*;
pub use wordnet::*;
pub use expander::*;
pub use classifier::*;
pub use rng::*;
pub use attributes::*;
pub use forge::*;

//! Weapon forge
//!
//! Runs classification then attribute extraction over a batch of articles.
//! Output order follows input order; dropped articles are only counted.

use std::sync::Arc;
use tracing::{debug, info};

use armory_core::{DropReason, DropStats, GameWeapon, RawArticle, Vocabulary};

use crate::{classify, AttributeExtractor, SharedRng};

/// Result of forging a batch of articles
#[derive(Debug, Clone, Default)]
pub struct ForgeReport {
    pub weapons: Vec<GameWeapon>,
    pub dropped: DropStats,
}

impl ForgeReport {
    /// Number of articles that produced no weapon
    pub fn dropped_count(&self) -> usize {
        self.dropped.total()
    }
}

/// Classifier plus attribute extractor
#[derive(Debug, Clone)]
pub struct WeaponForge {
    extractor: AttributeExtractor,
}

impl WeaponForge {
    pub fn new(vocabulary: Arc<Vocabulary>, rng: Arc<SharedRng>) -> Self {
        Self {
            extractor: AttributeExtractor::new(vocabulary, rng),
        }
    }

    /// Forge a single article
    pub fn forge_one(&self, article: &RawArticle) -> Result<GameWeapon, DropReason> {
        let weapon_type = classify(article).ok_or(DropReason::OutOfScope)?;
        self.extractor.extract(article, weapon_type)
    }

    /// Forge every article, keeping input order
    pub fn forge(&self, articles: &[RawArticle]) -> ForgeReport {
        let mut report = ForgeReport {
            weapons: Vec::with_capacity(articles.len()),
            dropped: DropStats::default(),
        };

        for (i, article) in articles.iter().enumerate() {
            debug!("Extracting numeric values: {}/{}", i + 1, articles.len());
            match self.forge_one(article) {
                Ok(weapon) => report.weapons.push(weapon),
                Err(reason) => {
                    debug!("Dropped {}: {}", article.name, reason);
                    report.dropped.record(reason);
                }
            }
        }

        info!(
            "Forged {} weapons from {} articles ({} dropped)",
            report.weapons.len(),
            articles.len(),
            report.dropped_count()
        );
        report
    }
}

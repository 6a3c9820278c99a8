//! Numeric attribute extraction
//!
//! Attack and defense are vocabulary term frequencies over the lower-cased
//! text. Length comes from measurements in the text, checked against the
//! weapon type's reference length. Wield type and price follow from those.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use armory_core::{DropReason, GameWeapon, RawArticle, Vocabulary, WeaponType, WieldType};

use crate::SharedRng;

static METRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*\.?\d+) m(et(re|er))?").unwrap());

static CENTIMETRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*\.?\d+) c(enti)?m(et(re|er))?").unwrap());

static FEET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d*\.?\d+) f(ee|oo)?t").unwrap());

static ONE_HAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(one|1)-?hand").unwrap());

static TWO_HAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(two|2)-?hand").unwrap());

const FEET_TO_METRES: f64 = 0.3048;

fn quantities<'t>(
    pattern: &'static Regex,
    text: &'t str,
    to_metres: fn(f64) -> f64,
) -> impl Iterator<Item = f64> + 't {
    pattern.captures_iter(text).filter_map(move |cap| {
        cap.get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(to_metres)
    })
}

/// Every length mentioned in metres, centimetres or feet, converted to metres
pub fn find_lengths(text: &str) -> Vec<f64> {
    quantities(&METRES, text, |m| m)
        .chain(quantities(&CENTIMETRES, text, |cm| cm / 100.0))
        .chain(quantities(&FEET, text, |ft| ft * FEET_TO_METRES))
        .collect()
}

/// Settle on a length given the measurements found and the reference length.
///
/// No measurement, or a mean far below the reference: random in `[avg/2, avg]`.
/// A mean far above the reference: random in `[avg, 1.5 avg]`.
/// Otherwise the mean itself.
pub fn resolve_length(lengths: &[f64], average: f64, rng: &SharedRng) -> f64 {
    let low = average * 0.5;
    let high = average * 1.5;

    if lengths.is_empty() {
        return rng.between(low, average);
    }

    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean < low {
        rng.between(low, average)
    } else if mean > high {
        rng.between(average, high)
    } else {
        mean
    }
}

/// Default wield type, overridden by one-hand/two-hand mentions unless fixed
pub fn resolve_wield(weapon_type: WeaponType, lower_text: &str) -> WieldType {
    let default = weapon_type.default_wield();
    if weapon_type.is_wield_fixed() {
        return default;
    }

    let one = ONE_HAND.find_iter(lower_text).count();
    let two = TWO_HAND.find_iter(lower_text).count();
    if one > two {
        WieldType::OneHanded
    } else if two > one {
        WieldType::TwoHanded
    } else {
        default
    }
}

/// Price derived from the other attributes
pub fn price(attack: u32, defense: u32, length: f64) -> u64 {
    let length_hundreds = (length / 100.0).floor().max(0.0) as u64;
    u64::from(attack) * 100 + u64::from(defense) * 100 + length_hundreds * 100
}

/// Extracts game attributes from classified articles
#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    vocabulary: Arc<Vocabulary>,
    rng: Arc<SharedRng>,
}

impl AttributeExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>, rng: Arc<SharedRng>) -> Self {
        Self { vocabulary, rng }
    }

    /// Build the weapon, or report why the article yields none
    pub fn extract(
        &self,
        article: &RawArticle,
        weapon_type: WeaponType,
    ) -> Result<GameWeapon, DropReason> {
        let lower = article.text.to_lowercase();

        let attack = self.vocabulary.attack_score(&lower);
        if attack == 0 {
            return Err(DropReason::ZeroAttackSignal);
        }
        let defense = self.vocabulary.defense_score(&lower);

        let lengths = find_lengths(&article.text);
        let length = resolve_length(&lengths, weapon_type.average_length(), &self.rng);
        let wield_type = resolve_wield(weapon_type, &lower);

        Ok(GameWeapon {
            name: article.name.clone(),
            weapon_type,
            length,
            attack,
            defense,
            wield_type,
            price: price(attack, defense, length),
        })
    }
}

//! Weapon type classification
//!
//! Weighted term frequency: every classification term is counted in the
//! article text, and counts of terms that also show up in the first two
//! sentences or the categories are multiplied by [`INTRO_WEIGHT`]. The type
//! with the strictly highest total wins; equal totals keep the type declared
//! first in [`CLASSIFICATION_TERMS`].

use regex::Regex;
use std::sync::LazyLock;

use armory_core::{count_occurrences, RawArticle, WeaponType};

/// Terms marking an article as weapon-adjacent but outside the game's scope
pub const ARTICLE_STOP_TERMS: &[&str] = &[
    "naval", "Naval", "navy", "Navy", "firearm", "Firearm", "gunpowder", "Gunpowder",
    "mechanical", "Mechanical", "shield", "Shield", "fortification", "Fortification",
];

/// Classification terms per weapon type, in tie-break order
pub const CLASSIFICATION_TERMS: &[(WeaponType, &[&str])] = &[
    (WeaponType::Sword, &["sword", "Sword", "cut", "cutting"]),
    (
        WeaponType::Dagger,
        &["dagger", "Dagger", "knives", "Knives", "knife", "Knife"],
    ),
    (WeaponType::Axe, &["axe", "Axe", "ax", "Ax"]),
    (
        WeaponType::PoleWeapon,
        &["pole", "Pole", "staff", "Staff", "spear", "Spear"],
    ),
    (WeaponType::Bow, &["bow", "Bow"]),
    (
        WeaponType::Ranged,
        &[
            "throw", "Throw", "projectile", "Projectile", "dart", "Dart", "missile", "Missile",
            "javelin", "Javelin", "throwing", "Throwing",
        ],
    ),
    (
        WeaponType::Club,
        &["club", "Club", "blunt", "Blunt", "flail", "Flail", "chain", "Chain"],
    ),
    (WeaponType::Siege, &["siege", "Siege", "artillery", "Artillery"]),
];

/// Multiplier for terms found in the intro or categories
pub const INTRO_WEIGHT: u32 = 5;

// A period, an optional citation marker like [3], then a space
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(\[\d+\])? ").unwrap());

/// Whether the article mentions any out-of-scope term
pub fn is_out_of_scope(text: &str) -> bool {
    ARTICLE_STOP_TERMS.iter().any(|term| text.contains(term))
}

/// First two sentences of the text followed by the categories.
///
/// With fewer than two sentence boundaries the whole text is used.
pub fn intro_window(article: &RawArticle) -> String {
    let text = article.text.as_str();
    let intro = match SENTENCE_END.find_iter(text).nth(1) {
        Some(second) => &text[..second.start()],
        None => text,
    };
    format!("{} {}", intro, article.categories_line())
}

/// Weighted score of every weapon type, in table order
pub fn type_scores(article: &RawArticle) -> Vec<(WeaponType, u32)> {
    let window = intro_window(article);

    CLASSIFICATION_TERMS
        .iter()
        .map(|(weapon_type, terms)| {
            let score = terms
                .iter()
                .map(|term| {
                    let weight = if window.contains(term) { INTRO_WEIGHT } else { 1 };
                    count_occurrences(&article.text, term) * weight
                })
                .sum();
            (*weapon_type, score)
        })
        .collect()
}

/// Classify an article; `None` means it is out of scope and must be skipped.
///
/// An article where no classification term occurs is `Unknown`.
pub fn classify(article: &RawArticle) -> Option<WeaponType> {
    if is_out_of_scope(&article.text) {
        return None;
    }

    let mut best = WeaponType::Unknown;
    let mut highest = 0;
    for (weapon_type, score) in type_scores(article) {
        if score > highest {
            best = weapon_type;
            highest = score;
        }
    }

    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(text: &str, categories: &[&str]) -> RawArticle {
        RawArticle {
            name: "Test".to_string(),
            url: "/wiki/Test".to_string(),
            text: text.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_sword_from_intro_terms() {
        let a = article(
            "sword cutting sword cutting sword cutting sword cutting sword cutting. \
             It is old. It was made of iron.",
            &[],
        );
        assert_eq!(classify(&a), Some(WeaponType::Sword));
    }

    #[test]
    fn test_equal_scores_keep_first_declared() {
        let a = article("A sword or a knife.", &[]);
        let scores = type_scores(&a);
        assert_eq!(scores[0], (WeaponType::Sword, 5));
        assert_eq!(scores[1], (WeaponType::Dagger, 5));
        assert_eq!(classify(&a), Some(WeaponType::Sword));

        let a = article("A knife or a sword.", &[]);
        assert_eq!(classify(&a), Some(WeaponType::Sword));
    }

    #[test]
    fn test_category_weighting() {
        // axe/ax count 4 at weight 1; bow counts once but is in the categories
        let a = article(
            "First sentence here. Second sentence here. Then an axe and an axe and a bow.",
            &["Composite bows"],
        );
        assert_eq!(classify(&a), Some(WeaponType::Bow));

        let a = article(
            "First sentence here. Second sentence here. Then an axe and an axe and a bow.",
            &[],
        );
        assert_eq!(classify(&a), Some(WeaponType::Axe));
    }

    #[test]
    fn test_no_terms_is_unknown() {
        let a = article("A thing of no category. Really.", &[]);
        assert_eq!(classify(&a), Some(WeaponType::Unknown));
    }

    #[test]
    fn test_out_of_scope_rejected() {
        let a = article("A sword carried by Navy officers.", &[]);
        assert_eq!(classify(&a), None);
        let a = article("A sword with a shield.", &[]);
        assert_eq!(classify(&a), None);
    }

    #[test]
    fn test_intro_window() {
        let a = article("One. Two.[3] Three. Four.", &["Cat", "Dog"]);
        assert_eq!(intro_window(&a), "One. Two Cat,Dog");

        let a = article("Only one sentence.", &["Cat"]);
        assert_eq!(intro_window(&a), "Only one sentence. Cat");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = article("The spear and the pole. A staff. A dart.", &["Spears"]);
        let first = classify(&a);
        for _ in 0..10 {
            assert_eq!(classify(&a), first);
        }
        assert_eq!(first, Some(WeaponType::PoleWeapon));
    }
}

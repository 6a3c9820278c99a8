//! Weapon types, wield styles and finished game weapons

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a weapon is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WieldType {
    OneHanded,
    TwoHanded,
}

impl fmt::Display for WieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WieldType::OneHanded => f.write_str("OneHanded"),
            WieldType::TwoHanded => f.write_str("TwoHanded"),
        }
    }
}

/// Closed set of weapon categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Sword,
    Dagger,
    Axe,
    Club,
    Bow,
    PoleWeapon,
    Ranged,
    Siege,
    Unknown,
}

impl WeaponType {
    /// Every variant, `Unknown` last
    pub const ALL: [WeaponType; 9] = [
        WeaponType::Sword,
        WeaponType::Dagger,
        WeaponType::Axe,
        WeaponType::Club,
        WeaponType::Bow,
        WeaponType::PoleWeapon,
        WeaponType::Ranged,
        WeaponType::Siege,
        WeaponType::Unknown,
    ];

    /// Reference length in meters, used when the article gives no usable value.
    ///
    /// `Unknown` borrows the sword-sized reference.
    pub const fn average_length(self) -> f64 {
        match self {
            WeaponType::Sword => 1.0,
            WeaponType::Dagger => 0.5,
            WeaponType::Axe => 1.0,
            WeaponType::Club => 1.0,
            WeaponType::Bow => 20.0,
            WeaponType::PoleWeapon => 3.0,
            WeaponType::Ranged => 10.0,
            WeaponType::Siege => 50.0,
            WeaponType::Unknown => 1.0,
        }
    }

    pub const fn default_wield(self) -> WieldType {
        match self {
            WeaponType::Bow | WeaponType::PoleWeapon => WieldType::TwoHanded,
            _ => WieldType::OneHanded,
        }
    }

    /// Whether text evidence may never override the default wield style
    pub const fn is_wield_fixed(self) -> bool {
        matches!(
            self,
            WeaponType::Dagger | WeaponType::Bow | WeaponType::PoleWeapon
        )
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeaponType::Sword => "Sword",
            WeaponType::Dagger => "Dagger",
            WeaponType::Axe => "Axe",
            WeaponType::Club => "Club",
            WeaponType::Bow => "Bow",
            WeaponType::PoleWeapon => "PoleWeapon",
            WeaponType::Ranged => "Ranged",
            WeaponType::Siege => "Siege",
            WeaponType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A fully extracted weapon, ready for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameWeapon {
    pub name: String,
    pub weapon_type: WeaponType,
    /// Length in meters
    pub length: f64,
    pub attack: u32,
    pub defense: u32,
    pub wield_type: WieldType,
    pub price: u64,
}

impl fmt::Display for GameWeapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}, {}, L({:.2}), A({}), D({})",
            self.weapon_type, self.name, self.wield_type, self.length, self.attack, self.defense
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_wield_types() {
        let fixed: Vec<_> = WeaponType::ALL
            .iter()
            .filter(|t| t.is_wield_fixed())
            .collect();
        assert_eq!(
            fixed,
            vec![&WeaponType::Dagger, &WeaponType::Bow, &WeaponType::PoleWeapon]
        );
    }

    #[test]
    fn test_default_wield() {
        assert_eq!(WeaponType::Sword.default_wield(), WieldType::OneHanded);
        assert_eq!(WeaponType::Bow.default_wield(), WieldType::TwoHanded);
        assert_eq!(WeaponType::PoleWeapon.default_wield(), WieldType::TwoHanded);
        assert_eq!(WeaponType::Siege.default_wield(), WieldType::OneHanded);
    }

    #[test]
    fn test_average_lengths() {
        assert_eq!(WeaponType::Dagger.average_length(), 0.5);
        assert_eq!(WeaponType::Siege.average_length(), 50.0);
        assert!(WeaponType::ALL.iter().all(|t| t.average_length() > 0.0));
    }

    #[test]
    fn test_display() {
        let weapon = GameWeapon {
            name: "Jian".to_string(),
            weapon_type: WeaponType::Sword,
            length: 0.75,
            attack: 3,
            defense: 1,
            wield_type: WieldType::OneHanded,
            price: 400,
        };
        assert_eq!(weapon.to_string(), "[Sword] Jian, OneHanded, L(0.75), A(3), D(1)");
    }
}

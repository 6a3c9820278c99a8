//! Armory Core - domain model for encyclopedia weapon extraction
//!
//! This crate provides the foundational primitives:
//! - Candidate links, their classification state and the discard memo
//! - Raw article records downloaded for confirmed links
//! - Weapon types, wield styles and finished game weapons
//! - The attack/defense vocabulary shared by extraction
//! - Drop accounting for articles that never become weapons

pub mod link;
pub mod article;
pub mod weapon;
pub mod vocabulary;
pub mod drops;

pub use link::*;
pub use article::*;
pub use weapon::*;
pub use vocabulary::*;
pub use drops::*;

/// Path prefix shared by every article link
pub const WIKI_PREFIX: &str = "/wiki/";

/// Marker that identifies a weapon page by URL or category
pub const WEAPON_MARKER: &str = "weapon";

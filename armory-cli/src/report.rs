//! Weapon report
//!
//! One block per weapon, numbered from one in forge order.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use armory_core::GameWeapon;

/// `weapons_<timestamp>.txt` in the working directory
pub fn default_report_path() -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("weapons_{}.txt", timestamp))
}

pub fn render_report(weapons: &[GameWeapon]) -> String {
    let mut out = String::new();
    for (i, weapon) in weapons.iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(out, "[{}] {}", i + 1, weapon.name);
        let _ = writeln!(out, "\tType: {}", weapon.weapon_type);
        let _ = writeln!(out, "\tLength: {:.2}", weapon.length);
        let _ = writeln!(out, "\tAttack: {}", weapon.attack);
        let _ = writeln!(out, "\tDefense: {}", weapon.defense);
        let _ = writeln!(out, "\tWield type: {}", weapon.wield_type);
        let _ = writeln!(out, "\tPrice: {}", weapon.price);
    }
    out
}

pub fn write_report(path: &Path, weapons: &[GameWeapon]) -> Result<()> {
    fs::write(path, render_report(weapons))
        .with_context(|| format!("Failed to write report {}", path.display()))
}

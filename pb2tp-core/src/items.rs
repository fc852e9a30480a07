//! Armor stats and rune tables.
//!
//! Pathbuilder exports armor by name and category only, so the sheet's item
//! bonus and Dexterity cap come from this table, falling back to a
//! per-category default for anything it does not know.

use std::fmt;

/// Armor proficiency category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmorCategory {
    Unarmored,
    Light,
    Medium,
    Heavy,
}

impl ArmorCategory {
    /// Parse the export's `prof` field. Anything unrecognized is unarmored.
    pub fn from_prof(prof: &str) -> Self {
        match prof.trim().to_ascii_lowercase().as_str() {
            "light" => ArmorCategory::Light,
            "medium" => ArmorCategory::Medium,
            "heavy" => ArmorCategory::Heavy,
            _ => ArmorCategory::Unarmored,
        }
    }

    /// Stats assumed for armor missing from the table.
    pub fn fallback(&self) -> (i64, i64) {
        match self {
            ArmorCategory::Heavy => (5, 1),
            ArmorCategory::Medium => (3, 2),
            ArmorCategory::Light => (1, 4),
            ArmorCategory::Unarmored => (0, 5),
        }
    }

    /// Name of the sheet checkbox selecting this category.
    pub fn checkbox_name(&self) -> &'static str {
        match self {
            ArmorCategory::Unarmored => "Not-Armor",
            ArmorCategory::Light => "Light-Armor",
            ArmorCategory::Medium => "Medium-Armor",
            ArmorCategory::Heavy => "Heavy-Armor",
        }
    }

    /// Name of the matching proficiency block.
    pub fn proficiency_name(&self) -> &'static str {
        match self {
            ArmorCategory::Unarmored => "Unarmored",
            ArmorCategory::Light => "Light Armor",
            ArmorCategory::Medium => "Medium Armor",
            ArmorCategory::Heavy => "Heavy Armor",
        }
    }

    /// Key of the matching entry in the export's proficiency map.
    pub fn proficiency_key(&self) -> &'static str {
        match self {
            ArmorCategory::Unarmored => "unarmored",
            ArmorCategory::Light => "light",
            ArmorCategory::Medium => "medium",
            ArmorCategory::Heavy => "heavy",
        }
    }

    pub fn all() -> [ArmorCategory; 4] {
        [
            ArmorCategory::Unarmored,
            ArmorCategory::Light,
            ArmorCategory::Medium,
            ArmorCategory::Heavy,
        ]
    }
}

impl fmt::Display for ArmorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.proficiency_key())
    }
}

/// Baseline stats of a known armor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorStats {
    pub name: &'static str,
    pub category: ArmorCategory,
    pub item_bonus: i64,
    pub dex_cap: i64,
}

impl ArmorStats {
    const fn new(name: &'static str, category: ArmorCategory, item_bonus: i64, dex_cap: i64) -> Self {
        Self {
            name,
            category,
            item_bonus,
            dex_cap,
        }
    }
}

lazy_static::lazy_static! {
    /// Core armors.
    pub static ref ARMORS: Vec<ArmorStats> = vec![
        // Unarmored
        ArmorStats::new("Explorer's Clothing", ArmorCategory::Unarmored, 0, 5),
        // Light
        ArmorStats::new("Padded Armor", ArmorCategory::Light, 1, 3),
        ArmorStats::new("Leather Armor", ArmorCategory::Light, 1, 4),
        ArmorStats::new("Studded Leather Armor", ArmorCategory::Light, 2, 3),
        ArmorStats::new("Chain Shirt", ArmorCategory::Light, 2, 3),
        ArmorStats::new("Leather Lamellar", ArmorCategory::Light, 1, 4),
        // Medium
        ArmorStats::new("Hide Armor", ArmorCategory::Medium, 3, 2),
        ArmorStats::new("Scale Mail", ArmorCategory::Medium, 3, 2),
        ArmorStats::new("Chain Mail", ArmorCategory::Medium, 4, 1),
        ArmorStats::new("Breastplate", ArmorCategory::Medium, 4, 1),
        ArmorStats::new("Armored Coat", ArmorCategory::Medium, 4, 1),
        // Heavy
        ArmorStats::new("Splint Mail", ArmorCategory::Heavy, 5, 1),
        ArmorStats::new("Half Plate", ArmorCategory::Heavy, 5, 1),
        ArmorStats::new("Full Plate", ArmorCategory::Heavy, 6, 0),
        ArmorStats::new("Bastion Plate", ArmorCategory::Heavy, 6, 0),
    ];
}

/// Look up a known armor by name, ignoring case and an optional trailing " Armor".
pub fn get_armor(name: &str) -> Option<&'static ArmorStats> {
    let name_lower = name.trim().to_lowercase();
    if name_lower.is_empty() {
        return None;
    }
    let short = name_lower.trim_end_matches(" armor");
    ARMORS.iter().find(|a| {
        let known = a.name.to_lowercase();
        known == name_lower || known.trim_end_matches(" armor") == short
    })
}

/// Item bonus and Dexterity cap for an armor, with category fallback.
pub fn armor_stats(name: &str, category: ArmorCategory) -> (i64, i64) {
    match get_armor(name) {
        Some(stats) => (stats.item_bonus, stats.dex_cap),
        None => {
            if !name.trim().is_empty() {
                tracing::warn!(armor = name, %category, "unknown armor, using category defaults");
            }
            category.fallback()
        }
    }
}

/// Tier (0-3) of a striking rune code.
pub fn striking_tier(code: &str) -> i64 {
    match code.trim() {
        "striking" => 1,
        "greaterStriking" => 2,
        "majorStriking" => 3,
        _ => 0,
    }
}

/// Display name of a striking rune code, empty when none.
pub fn striking_name(code: &str) -> &'static str {
    match striking_tier(code) {
        1 => "Striking",
        2 => "Greater Striking",
        3 => "Major Striking",
        _ => "",
    }
}

/// Tier (0-3) of a resilient rune code.
pub fn resilient_tier(code: &str) -> i64 {
    match code.trim() {
        "resilient" => 1,
        "greaterResilient" => 2,
        "majorResilient" => 3,
        _ => 0,
    }
}

/// Capitalize the first character of a rune code (`flaming` -> `Flaming`).
pub fn rune_display(rune: &str) -> String {
    let mut chars = rune.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_mail_any_case() {
        for name in ["Chain Mail", "chain mail", "CHAIN MAIL", "  Chain mail "] {
            let stats = get_armor(name).unwrap();
            assert_eq!((stats.item_bonus, stats.dex_cap), (4, 1));
        }
        assert_eq!(armor_stats("chain mail", ArmorCategory::Heavy), (4, 1));
    }

    #[test]
    fn test_armor_suffix_optional() {
        assert_eq!(get_armor("Leather").unwrap().name, "Leather Armor");
        assert_eq!(get_armor("hide armor").unwrap().name, "Hide Armor");
    }

    #[test]
    fn test_fallback_by_category() {
        assert_eq!(armor_stats("Mystery Mail", ArmorCategory::Medium), (3, 2));
        assert_eq!(armor_stats("Mystery Plate", ArmorCategory::Heavy), (5, 1));
        assert_eq!(armor_stats("Mystery Vest", ArmorCategory::Light), (1, 4));
        assert_eq!(armor_stats("", ArmorCategory::Unarmored), (0, 5));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(ArmorCategory::from_prof("Medium"), ArmorCategory::Medium);
        assert_eq!(ArmorCategory::from_prof("shield"), ArmorCategory::Unarmored);
        assert_eq!(ArmorCategory::from_prof(""), ArmorCategory::Unarmored);
    }

    #[test]
    fn test_rune_tables() {
        assert_eq!(striking_tier("greaterStriking"), 2);
        assert_eq!(striking_tier(""), 0);
        assert_eq!(striking_name("majorStriking"), "Major Striking");
        assert_eq!(striking_name("bogus"), "");
        assert_eq!(resilient_tier("resilient"), 1);
        assert_eq!(rune_display("flaming"), "Flaming");
        assert_eq!(rune_display(""), "");
    }
}

//! Proficiency tiers, bonus arithmetic and renderer formula synthesis.
//!
//! Pathbuilder stores proficiency as an even rank: 0 untrained, 2 trained,
//! 4 expert, 6 master, 8 legendary. The sheet shows four pips per block and
//! recomputes bonuses from them with the formulas built here.

use pathbuilder::Ability;

pub const TRAINED: i64 = 2;
pub const EXPERT: i64 = 4;
pub const MASTER: i64 = 6;
pub const LEGENDARY: i64 = 8;

/// The four pip states of a proficiency block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProficiencyTiers {
    pub trained: bool,
    pub expert: bool,
    pub master: bool,
    pub legendary: bool,
}

impl ProficiencyTiers {
    pub fn from_rank(rank: i64) -> Self {
        Self {
            trained: rank >= TRAINED,
            expert: rank >= EXPERT,
            master: rank >= MASTER,
            legendary: rank >= LEGENDARY,
        }
    }

    /// Pip states paired with their name suffixes, lowest tier first.
    pub fn pips(&self) -> [(&'static str, bool); 4] {
        [
            ("trained", self.trained),
            ("expert", self.expert),
            ("master", self.master),
            ("legendary", self.legendary),
        ]
    }
}

/// `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i64) -> i64 {
    score.saturating_sub(10).div_euclid(2)
}

/// Total bonus for a proficiency-based check.
///
/// Untrained checks add only the ability modifier and item bonus; level is
/// added once trained.
pub fn proficiency_bonus(rank: i64, level: i64, ability_mod: i64, item_bonus: i64) -> i64 {
    if rank >= TRAINED {
        level
            .saturating_add(rank)
            .saturating_add(ability_mod)
            .saturating_add(item_bonus)
    } else {
        ability_mod.saturating_add(item_bonus)
    }
}

/// Lower-case, whitespace-to-underscore form of a property name, as formulas reference it.
pub fn formula_ref(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Identifier-safe slug: lower-case ASCII alphanumerics joined by single underscores.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Name of the pip checkbox for `tier` of block `key`.
pub fn pip_name(key: &str, tier: &str) -> String {
    format!("{key}-{tier}")
}

/// Formula reference for an ability modifier (`strength`).
pub fn ability_ref(ability: Ability) -> String {
    formula_ref(ability.name())
}

/// Four-tier proficiency formula for block `key`.
///
/// `ability + level*(key-trained ? 1 : 0) + (key-trained ? 2 : 0) + (key-expert ? 2 : 0)
/// + (key-master ? 2 : 0) + (key-legendary ? 2 : 0)`; the ability term is left out
/// for equipment proficiencies.
pub fn proficiency_formula(key: &str, ability: Option<Ability>) -> String {
    let tiers = format!(
        "level*({t} ? 1 : 0) + ({t} ? 2 : 0) + ({e} ? 2 : 0) + ({m} ? 2 : 0) + ({l} ? 2 : 0)",
        t = pip_name(key, "trained"),
        e = pip_name(key, "expert"),
        m = pip_name(key, "master"),
        l = pip_name(key, "legendary"),
    );
    match ability {
        Some(ability) => format!("{} + {tiers}", ability_ref(ability)),
        None => tiers,
    }
}

/// Ability modifier formula for the score property `score_name`.
pub fn modifier_formula(score_name: &str) -> String {
    format!("floor (({score_name} - 10) / 2)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_thresholds() {
        for rank in -2..=10 {
            let tiers = ProficiencyTiers::from_rank(rank);
            assert_eq!(tiers.trained, rank >= 2);
            assert_eq!(tiers.expert, rank >= 4);
            assert_eq!(tiers.master, rank >= 6);
            assert_eq!(tiers.legendary, rank >= 8);
            // Higher tiers imply the lower ones.
            assert!(!tiers.legendary || tiers.master);
            assert!(!tiers.master || tiers.expert);
            assert!(!tiers.expert || tiers.trained);
        }
    }

    #[test]
    fn test_ability_modifier_floors_negatives() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(-3), -7);
        for score in -20..40 {
            assert_eq!(ability_modifier(score), ((score - 10) as f64 / 2.0).floor() as i64);
        }
    }

    #[test]
    fn test_untrained_bonus_ignores_level() {
        assert_eq!(proficiency_bonus(0, 1, 3, 1), 4);
        assert_eq!(proficiency_bonus(0, 20, 3, 1), 4);
    }

    #[test]
    fn test_trained_bonus_adds_level_and_rank() {
        assert_eq!(proficiency_bonus(2, 5, 3, 0), 10);
        assert_eq!(proficiency_bonus(4, 5, 3, 1), 13);
        assert_eq!(proficiency_bonus(8, 20, 5, 3), 36);
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        assert_eq!(ability_modifier(i64::MIN), (i64::MIN).div_euclid(2));
        assert_eq!(proficiency_bonus(2, i64::MAX, 1, 0), i64::MAX);
        assert_eq!(proficiency_bonus(0, 1, i64::MIN, -1), i64::MIN);
    }

    #[test]
    fn test_formula_ref_and_slug() {
        assert_eq!(formula_ref("Class HP"), "class_hp");
        assert_eq!(formula_ref("HP  per Level"), "hp_per_level");
        assert_eq!(slugify("Lore: Warfare & Tactics"), "lore_warfare_tactics");
        assert_eq!(slugify("  Sailing "), "sailing");
    }

    #[test]
    fn test_proficiency_formula_shape() {
        assert_eq!(
            proficiency_formula("athletics", Some(Ability::Strength)),
            "strength + level*(athletics-trained ? 1 : 0) + (athletics-trained ? 2 : 0) + \
             (athletics-expert ? 2 : 0) + (athletics-master ? 2 : 0) + (athletics-legendary ? 2 : 0)"
        );
        assert!(proficiency_formula("simple_weapons", None).starts_with("level*(simple_weapons-trained"));
    }

    #[test]
    fn test_modifier_formula() {
        assert_eq!(modifier_formula("strength-score"), "floor ((strength-score - 10) / 2)");
    }
}

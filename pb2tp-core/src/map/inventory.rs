//! Inventory tab: weapon and armor proficiencies, weapons with their rune
//! trackers, worn armor and shield, backpack and coins.
//!
//! The weapon attack messages and the armor class computed here are shared
//! with the Actions, Character and Background tabs.

use crate::ids::Tab;
use crate::items::{
    armor_stats, resilient_tier, rune_display, striking_name, striking_tier, ArmorCategory,
};
use crate::property::PropertyNode;
use crate::proficiency::{formula_ref, proficiency_formula, ProficiencyTiers, TRAINED};
use crate::writer::{bullet_list, SheetWriter, SkillBlock};
use pathbuilder::{Ability, Armor, Build, Weapon};
use regex::Regex;

lazy_static::lazy_static! {
    static ref EXTRA_DAMAGE: Regex = Regex::new(r"(?i)^(\d+d\d+)\s+(.+)$").expect("valid extra damage pattern");
}

/// Weapon proficiency blocks: display name and proficiency key.
const WEAPON_BLOCKS: [(&str, &str, i64); 4] = [
    ("Unarmed Attacks", "unarmed", -1),
    ("Simple Weapons", "simple", 0),
    ("Martial Weapons", "martial", 1),
    ("Advanced Weapons", "advanced", 2),
];

const AC_BONUS_FORMULA: &str = "item_bonus + (dexterity > dexterity_cap ? dexterity_cap : dexterity) \
+ not-armor*unarmored + light-armor*light_armor + medium-armor*medium_armor \
+ heavy-armor*heavy_armor + armor_potency_rune";

/// Name of the weapon proficiency block for a weapon's `prof` field.
pub fn weapon_category(prof: &str) -> &'static str {
    match prof.trim().to_ascii_lowercase().as_str() {
        "simple" => "Simple Weapons",
        "martial" => "Martial Weapons",
        "advanced" => "Advanced Weapons",
        _ => "Unarmed Attacks",
    }
}

/// Bonus shown on an equipment proficiency block: level plus rank once trained.
fn equipment_bonus(rank: i64, level: i64) -> i64 {
    if rank >= TRAINED {
        level + rank
    } else {
        0
    }
}

/// One weapon attack, numbered from 1 in the order the weapons are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub index: usize,
    /// Name with potency, striking and property runes prefixed.
    pub full_name: String,
    /// Proficiency block the attack uses.
    pub category: &'static str,
    pub die: String,
    pub potency: i64,
    pub striking: i64,
    pub property_runes: Vec<String>,
    pub ability: Ability,
    pub extra_damage: Vec<String>,
}

impl Attack {
    fn from_weapon(index: usize, weapon: &Weapon) -> Self {
        let base = [&weapon.name, &weapon.display]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Weapon {index}"));

        let potency = weapon.pot.clamp(0, 3);
        let mut parts = Vec::new();
        if potency > 0 {
            parts.push(format!("+{potency}"));
        }
        let striking = striking_name(&weapon.striking);
        if !striking.is_empty() {
            parts.push(striking.to_string());
        }
        parts.extend(weapon.runes.iter().map(|r| rune_display(r)));
        parts.push(base);

        let die = weapon.die.trim();
        Self {
            index,
            full_name: parts.join(" "),
            category: weapon_category(&weapon.prof),
            die: if die.is_empty() { "d8".to_string() } else { die.to_string() },
            potency,
            striking: striking_tier(&weapon.striking),
            property_runes: weapon.runes.clone(),
            ability: Ability::Strength,
            extra_damage: weapon.extra_damage.clone(),
        }
    }

    /// Unarmed strike used when the build lists no weapons.
    fn fist(build: &Build) -> Self {
        let ability = if build.modifier(Ability::Dexterity) > build.modifier(Ability::Strength) {
            Ability::Dexterity
        } else {
            Ability::Strength
        };
        Self {
            index: 1,
            full_name: "Fist".to_string(),
            category: "Unarmed Attacks",
            die: "d4".to_string(),
            potency: 0,
            striking: 0,
            property_runes: Vec::new(),
            ability,
            extra_damage: Vec::new(),
        }
    }

    pub fn potency_tracker(&self) -> String {
        format!("Potency Rune {}", self.index)
    }

    pub fn striking_tracker(&self) -> String {
        format!("Striking Rune {}", self.index)
    }

    /// The saved roll message for this attack.
    pub fn message(&self) -> String {
        let ability = formula_ref(self.ability.name());
        let mut damage = format!(
            "{{@:{}+1:{}+{}+class_dmg_bonus+other_dmg_bonus}}",
            formula_ref(&self.striking_tracker()),
            self.die,
            ability
        );
        for extra in &self.extra_damage {
            match EXTRA_DAMAGE.captures(extra.trim()) {
                Some(caps) => damage.push_str(&format!(" + {{{}}}{}", &caps[1], &caps[2])),
                None => tracing::debug!(extra = %extra, "skipping unparseable extra damage"),
            }
        }
        format!(
            "{}: To hit {{1d20+{}+{}+{}}}, Damage: {}",
            self.full_name,
            ability,
            formula_ref(self.category),
            formula_ref(&self.potency_tracker()),
            damage
        )
    }
}

/// Attacks for every weapon, or a single `Fist` when there are none.
pub fn attacks(build: &Build) -> Vec<Attack> {
    if build.weapons.is_empty() {
        return vec![Attack::fist(build)];
    }
    build
        .weapons
        .iter()
        .enumerate()
        .map(|(i, weapon)| Attack::from_weapon(i + 1, weapon))
        .collect()
}

/// Index of the worn armor: the first non-shield marked worn, else the first
/// non-shield not marked unworn.
fn worn_armor_index(build: &Build) -> Option<usize> {
    let candidates = || build.armor.iter().enumerate().filter(|(_, a)| !a.is_shield());
    candidates()
        .find(|(_, a)| a.worn == Some(true))
        .or_else(|| candidates().find(|(_, a)| a.worn.is_none()))
        .map(|(i, _)| i)
}

fn shield_index(build: &Build) -> Option<usize> {
    build
        .armor
        .iter()
        .position(|a| a.is_shield() && a.worn != Some(false))
}

pub fn worn_armor(build: &Build) -> Option<&Armor> {
    worn_armor_index(build).map(|i| &build.armor[i])
}

pub fn equipped_shield(build: &Build) -> Option<&Armor> {
    shield_index(build).map(|i| &build.armor[i])
}

/// Resolved numbers of the worn armor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorProfile {
    pub name: String,
    pub category: ArmorCategory,
    pub item_bonus: i64,
    pub dex_cap: i64,
    pub potency: i64,
    pub resilient: i64,
    /// Property runes other than resilient.
    pub runes: Vec<String>,
}

impl ArmorProfile {
    pub fn from_build(build: &Build) -> Self {
        let Some(armor) = worn_armor(build) else {
            let (item_bonus, dex_cap) = ArmorCategory::Unarmored.fallback();
            return Self {
                name: String::new(),
                category: ArmorCategory::Unarmored,
                item_bonus,
                dex_cap,
                potency: 0,
                resilient: 0,
                runes: Vec::new(),
            };
        };
        let category = ArmorCategory::from_prof(&armor.prof);
        let (item_bonus, dex_cap) = armor_stats(&armor.name, category);
        let resilient = armor
            .runes
            .iter()
            .map(|r| resilient_tier(r))
            .chain(std::iter::once(resilient_tier(&armor.res)))
            .max()
            .unwrap_or(0);
        Self {
            name: armor.name.clone(),
            category,
            item_bonus,
            dex_cap,
            potency: armor.pot.clamp(0, 3),
            resilient,
            runes: armor
                .runes
                .iter()
                .filter(|r| resilient_tier(r) == 0)
                .cloned()
                .collect(),
        }
    }

    /// The armor's contribution to AC on top of 10.
    pub fn ac_bonus(&self, build: &Build) -> i64 {
        let dex = build.modifier(Ability::Dexterity).min(self.dex_cap);
        let rank = build.proficiencies.rank(self.category.proficiency_key());
        self.item_bonus + dex + equipment_bonus(rank, build.level) + self.potency
    }
}

/// Armor class without a raised shield. Pathbuilder's own total wins when present.
pub fn armor_class(build: &Build) -> i64 {
    if build.ac_total.ac_total > 0 {
        build.ac_total.ac_total
    } else {
        10 + ArmorProfile::from_build(build).ac_bonus(build)
    }
}

/// Everything carried but not worn, as display lines.
pub fn backpack_items(build: &Build) -> Vec<String> {
    let worn = worn_armor_index(build);
    let shield = shield_index(build);
    let with_qty = |name: String, qty: i64| {
        if qty > 1 {
            format!("{name} ×{qty}")
        } else {
            name
        }
    };

    let armor = build
        .armor
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != worn && Some(*i) != shield)
        .map(|(_, a)| {
            let name = if a.name.trim().is_empty() { a.display.trim() } else { a.name.trim() };
            let name = if a.is_shield() || name.to_lowercase().ends_with("armor") {
                name.to_string()
            } else {
                format!("{name} Armor")
            };
            with_qty(name, a.qty)
        });
    let gear = build
        .equipment
        .iter()
        .filter(|e| !e.name.trim().is_empty())
        .map(|e| with_qty(e.name.trim().to_string(), e.qty));
    armor.chain(gear).collect()
}

pub fn build_inventory(build: &Build) -> Vec<PropertyNode> {
    let mut sheet = SheetWriter::new(Tab::Inventory);
    let tab = sheet.tab_root();
    let row = sheet.row(tab, -16);
    let level = build.level;

    // Weapons
    let weapon_profs = sheet.title(row.left, "Weapon Proficiencies", 0, false);
    for (name, key, rank) in WEAPON_BLOCKS {
        let prof = build.proficiencies.rank(key);
        let key = formula_ref(name);
        sheet.skill(
            weapon_profs,
            SkillBlock {
                name: name.to_string(),
                formula: proficiency_formula(&key, None),
                key,
                value: equipment_bonus(prof, level),
                tiers: ProficiencyTiers::from_rank(prof),
                message: None,
            },
            rank,
        );
    }

    let weapons = sheet.title(row.left, "Weapons", 2, false);
    for (i, attack) in attacks(build).iter().enumerate() {
        let title = sheet.title(weapons, format!("Weapon {}", attack.index), i as i64 - 3, false);
        sheet.message(title, attack.full_name.clone(), attack.message(), 0);
        sheet.text(title, "Property Runes", attack.property_runes.join(", "), 1);
        let runes = sheet.row(title, 2);
        sheet.tracker(runes.left, &attack.potency_tracker(), attack.potency, 3, 0);
        sheet.tracker(runes.right, &attack.striking_tracker(), attack.striking, 3, 0);
    }

    // Armor
    let armor_profs = sheet.title(row.right, "Armor Proficiencies", 3, false);
    for (category, rank) in ArmorCategory::all().into_iter().zip([-1, 0, 2, 3]) {
        let prof = build.proficiencies.rank(category.proficiency_key());
        let key = formula_ref(category.proficiency_name());
        sheet.skill(
            armor_profs,
            SkillBlock {
                name: category.proficiency_name().to_string(),
                formula: proficiency_formula(&key, None),
                key,
                value: equipment_bonus(prof, level),
                tiers: ProficiencyTiers::from_rank(prof),
                message: None,
            },
            rank,
        );
    }

    let profile = ArmorProfile::from_build(build);
    let armor = sheet.title(row.right, "Armor", 4, false);
    sheet.heading(armor, "Armor", -6);
    sheet.text(armor, "Armor Name", profile.name.clone(), -5);
    let kinds = sheet.row(armor, -4);
    for (column, category, rank) in [
        (kinds.left, ArmorCategory::Light, 0),
        (kinds.left, ArmorCategory::Unarmored, 1),
        (kinds.right, ArmorCategory::Heavy, 0),
        (kinds.right, ArmorCategory::Medium, 1),
    ] {
        sheet.checkbox(column, category.checkbox_name(), profile.category == category, rank);
    }
    sheet.computed(armor, "AC Bonus", profile.ac_bonus(build), AC_BONUS_FORMULA, -3);
    sheet.number(armor, "Item Bonus", profile.item_bonus, -2);
    sheet.number(armor, "Dexterity Cap", profile.dex_cap, -1);
    sheet.tracker(armor, "Armor Potency Rune", profile.potency, 3, 0);
    sheet.tracker(armor, "Resilient Rune", profile.resilient, 3, 1);
    let other_runes: Vec<String> = profile.runes.iter().map(|r| rune_display(r)).collect();
    sheet.paragraph(armor, bullet_list(&other_runes, "No other runes"), 2);

    let shield = equipped_shield(build);
    sheet.heading(armor, "Shield", 3);
    sheet.text(
        armor,
        "Shield Name",
        shield.map(|s| s.name.clone()).unwrap_or_default(),
        4,
    );
    sheet.number(
        armor,
        "Shield Circumstance Bonus",
        build.ac_total.shield_bonus.unwrap_or(2),
        6,
    );
    sheet.number(armor, "Shield HP Max", 0, 7);
    sheet.number(armor, "Shield Hardness", 0, 8);

    // Carried
    let backpack = sheet.title(row.right, "Backpack", 5, false);
    sheet.paragraph(backpack, bullet_list(&backpack_items(build), "Empty"), 0);

    let coins = sheet.title(row.right, "Coins", 6, true);
    let money = &build.money;
    for (rank, (name, value)) in (0..).zip([
        ("Platinum", money.pp),
        ("Gold", money.gp),
        ("Silver", money.sp),
        ("Copper", money.cp),
    ]) {
        sheet.number(coins, name, value, rank);
    }

    sheet.finish()
}

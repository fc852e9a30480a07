//! Pathbuilder 2e build model.
//!
//! Mirrors the `build` object of the `json.php` export. Every field is
//! optional in practice, so each one carries a documented default and is read
//! through [`crate::lenient`]; consumers never need to check for absence.

use crate::lenient::{self, as_int, as_text};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Abilities
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Three-letter key used by the export (`"str"`, `"dex"`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    /// Parse either the short key or the full name, case-insensitively.
    pub fn from_key(key: &str) -> Option<Ability> {
        let key = key.trim().to_ascii_lowercase();
        Ability::all()
            .into_iter()
            .find(|a| key == a.key() || key == a.name().to_ascii_lowercase())
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw ability scores. Missing scores read as 10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abilities {
    #[serde(deserialize_with = "lenient::score")]
    pub str: i64,
    #[serde(deserialize_with = "lenient::score")]
    pub dex: i64,
    #[serde(deserialize_with = "lenient::score")]
    pub con: i64,
    #[serde(deserialize_with = "lenient::score")]
    pub int: i64,
    #[serde(deserialize_with = "lenient::score")]
    pub wis: i64,
    #[serde(deserialize_with = "lenient::score")]
    pub cha: i64,
}

impl Abilities {
    pub fn score(&self, ability: Ability) -> i64 {
        match ability {
            Ability::Strength => self.str,
            Ability::Dexterity => self.dex,
            Ability::Constitution => self.con,
            Ability::Intelligence => self.int,
            Ability::Wisdom => self.wis,
            Ability::Charisma => self.cha,
        }
    }
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            str: 10,
            dex: 10,
            con: 10,
            int: 10,
            wis: 10,
            cha: 10,
        }
    }
}

// ============================================================================
// Attributes and totals
// ============================================================================

/// Hit point components and speed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    #[serde(deserialize_with = "lenient::int")]
    pub ancestryhp: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub classhp: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub bonushp: i64,
    #[serde(rename = "bonushpPerLevel", deserialize_with = "lenient::int")]
    pub bonushp_per_level: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub speed: i64,
    #[serde(rename = "speedBonus", deserialize_with = "lenient::int")]
    pub speed_bonus: i64,
}

/// Armor class totals as computed by Pathbuilder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcTotal {
    #[serde(rename = "acTotal", deserialize_with = "lenient::int")]
    pub ac_total: i64,
    #[serde(rename = "acProfBonus", deserialize_with = "lenient::int")]
    pub ac_prof_bonus: i64,
    #[serde(rename = "acAbilityBonus", deserialize_with = "lenient::int")]
    pub ac_ability_bonus: i64,
    #[serde(rename = "acItemBonus", deserialize_with = "lenient::int")]
    pub ac_item_bonus: i64,
    /// Circumstance bonus of the equipped shield, when one is equipped.
    #[serde(rename = "shieldBonus", deserialize_with = "lenient::opt_int")]
    pub shield_bonus: Option<i64>,
}

/// Coins carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Money {
    #[serde(deserialize_with = "lenient::int")]
    pub pp: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub gp: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub sp: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub cp: i64,
}

// ============================================================================
// Proficiencies
// ============================================================================

/// Proficiency ranks keyed by the export's names (`"athletics"`, `"martial"`,
/// `"classDC"`, ...). Ranks are 0, 2, 4, 6 or 8 by convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Proficiencies(pub BTreeMap<String, i64>);

impl<'de> Deserialize<'de> for Proficiencies {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient::int_map(d).map(Proficiencies)
    }
}

impl Proficiencies {
    /// Rank for `key`, 0 when absent.
    pub fn rank(&self, key: &str) -> i64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Highest rank among the four weapon categories.
    pub fn highest_weapon_rank(&self) -> i64 {
        ["simple", "martial", "advanced", "unarmed"]
            .iter()
            .map(|key| self.rank(key))
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// Gear
// ============================================================================

/// A weapon entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weapon {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub display: String,
    /// Proficiency category: `simple`, `martial`, `advanced` or `unarmed`.
    #[serde(deserialize_with = "lenient::text")]
    pub prof: String,
    /// Damage die such as `d8`.
    #[serde(deserialize_with = "lenient::text")]
    pub die: String,
    /// Potency rune (0-3).
    #[serde(deserialize_with = "lenient::int")]
    pub pot: i64,
    /// Striking rune: `""`, `striking`, `greaterStriking` or `majorStriking`.
    #[serde(rename = "str", deserialize_with = "lenient::text")]
    pub striking: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub runes: Vec<String>,
    /// Extra damage entries such as `"1d6 fire"`.
    #[serde(rename = "extraDamage", deserialize_with = "lenient::text_list")]
    pub extra_damage: Vec<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub qty: i64,
}

/// An armor or shield entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Armor {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub display: String,
    /// Armor category: `unarmored`, `light`, `medium`, `heavy` or `shield`.
    #[serde(deserialize_with = "lenient::text")]
    pub prof: String,
    #[serde(deserialize_with = "lenient::int")]
    pub pot: i64,
    /// Resilient rune: `""`, `resilient`, `greaterResilient` or `majorResilient`.
    #[serde(deserialize_with = "lenient::text")]
    pub res: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub runes: Vec<String>,
    /// `None` when the export predates the worn flag.
    #[serde(deserialize_with = "lenient::opt_bool")]
    pub worn: Option<bool>,
    #[serde(deserialize_with = "lenient::int")]
    pub qty: i64,
}

impl Armor {
    pub fn is_shield(&self) -> bool {
        self.prof.eq_ignore_ascii_case("shield") || self.name.to_lowercase().contains("shield")
    }
}

/// A generic equipment entry, exported either as `[name, qty, ...]` or as a bare name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquipmentItem {
    pub name: String,
    pub qty: i64,
}

impl<'de> Deserialize<'de> for EquipmentItem {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        let (name, qty) = match &value {
            Value::Array(fields) => (
                fields.first().and_then(as_text).unwrap_or_default(),
                fields.get(1).and_then(as_int).unwrap_or(1),
            ),
            Value::Object(fields) => (
                fields.get("name").and_then(as_text).unwrap_or_default(),
                fields.get("qty").and_then(as_int).unwrap_or(1),
            ),
            other => (as_text(other).unwrap_or_default(), 1),
        };
        Ok(Self { name, qty })
    }
}

/// A lore skill, exported as `[name, rank]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lore {
    pub name: String,
    pub rank: i64,
}

impl<'de> Deserialize<'de> for Lore {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        let (name, rank) = match &value {
            Value::Array(fields) => (
                fields.first().and_then(as_text).unwrap_or_default(),
                fields.get(1).and_then(as_int).unwrap_or(0),
            ),
            Value::Object(fields) => (
                fields.get("name").and_then(as_text).unwrap_or_default(),
                fields.get("rank").and_then(as_int).unwrap_or(0),
            ),
            other => (as_text(other).unwrap_or_default(), 0),
        };
        Ok(Self { name, rank })
    }
}

// ============================================================================
// Feats
// ============================================================================

/// Choice kind marking a feat chosen through another feat's slot.
pub const CHILD_CHOICE: &str = "childChoice";

/// A feat, exported as the positional tuple
/// `[name, subChoice, type, level, slot, choiceKind, parentSlot]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feat {
    pub name: String,
    pub sub_choice: Option<String>,
    pub feat_type: String,
    pub level: i64,
    pub slot: String,
    pub choice_kind: String,
    pub parent_slot: Option<String>,
}

impl Feat {
    pub fn is_child_choice(&self) -> bool {
        self.choice_kind == CHILD_CHOICE
    }

    fn from_tuple(fields: &[Value]) -> Self {
        let text = |i: usize| fields.get(i).and_then(as_text).unwrap_or_default();
        let opt_text = |i: usize| {
            fields
                .get(i)
                .and_then(as_text)
                .filter(|s| !s.trim().is_empty())
        };
        Self {
            name: text(0),
            sub_choice: opt_text(1),
            feat_type: text(2),
            level: fields.get(3).and_then(as_int).unwrap_or(0),
            slot: text(4),
            choice_kind: text(5),
            parent_slot: opt_text(6),
        }
    }
}

impl<'de> Deserialize<'de> for Feat {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match &value {
            Value::Array(fields) => Feat::from_tuple(fields),
            Value::Object(fields) => {
                let positional: Vec<Value> = [
                    "name",
                    "sub_choice",
                    "feat_type",
                    "level",
                    "slot",
                    "choice_kind",
                    "parent_slot",
                ]
                .iter()
                .map(|key| fields.get(*key).cloned().unwrap_or(Value::Null))
                .collect();
                Feat::from_tuple(&positional)
            }
            other => Feat {
                name: as_text(other).unwrap_or_default(),
                ..Feat::default()
            },
        })
    }
}

// ============================================================================
// Spellcasting
// ============================================================================

/// Spells of one rank: `{ spellLevel, list }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellRank {
    #[serde(rename = "spellLevel", deserialize_with = "lenient::int")]
    pub spell_level: i64,
    #[serde(deserialize_with = "lenient::text_list")]
    pub list: Vec<String>,
}

/// One spellcasting source (a class's spell list, an innate grant, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCaster {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(rename = "magicTradition", deserialize_with = "lenient::text")]
    pub magic_tradition: String,
    /// `prepared`, `spontaneous` or `innate`.
    #[serde(rename = "spellcastingType", deserialize_with = "lenient::text")]
    pub spellcasting_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub ability: String,
    #[serde(deserialize_with = "lenient::int")]
    pub proficiency: i64,
    /// Slots per day, indexed by rank.
    #[serde(rename = "perDay", deserialize_with = "lenient::int_list")]
    pub per_day: Vec<i64>,
    #[serde(deserialize_with = "lenient::list")]
    pub spells: Vec<SpellRank>,
    #[serde(deserialize_with = "lenient::list")]
    pub prepared: Vec<SpellRank>,
}

impl Default for SpellCaster {
    fn default() -> Self {
        Self {
            name: String::new(),
            magic_tradition: "arcane".to_string(),
            spellcasting_type: "prepared".to_string(),
            ability: "int".to_string(),
            proficiency: 0,
            per_day: Vec::new(),
            spells: Vec::new(),
            prepared: Vec::new(),
        }
    }
}

/// Focus spells granted for one tradition and ability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusCell {
    #[serde(deserialize_with = "lenient::int")]
    pub proficiency: i64,
    #[serde(rename = "abilityBonus", deserialize_with = "lenient::int")]
    pub ability_bonus: i64,
    #[serde(rename = "itemBonus", deserialize_with = "lenient::int")]
    pub item_bonus: i64,
    #[serde(rename = "focusCantrips", deserialize_with = "lenient::text_list")]
    pub focus_cantrips: Vec<String>,
    #[serde(rename = "focusSpells", deserialize_with = "lenient::text_list")]
    pub focus_spells: Vec<String>,
}

/// Focus spells keyed by tradition, then by ability key.
pub type FocusMap = BTreeMap<String, BTreeMap<String, FocusCell>>;

fn focus_map<'de, D: Deserializer<'de>>(d: D) -> Result<FocusMap, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Object(traditions) => traditions
            .into_iter()
            .filter_map(|(tradition, cells)| match cells {
                Value::Object(cells) => Some((
                    tradition,
                    cells
                        .into_iter()
                        .filter_map(|(ability, cell)| {
                            serde_json::from_value(cell).ok().map(|c| (ability, c))
                        })
                        .collect(),
                )),
                _ => None,
            })
            .collect(),
        _ => FocusMap::new(),
    })
}

// ============================================================================
// Build
// ============================================================================

/// A complete Pathbuilder character build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class: String,
    #[serde(deserialize_with = "lenient::text")]
    pub ancestry: String,
    #[serde(deserialize_with = "lenient::text")]
    pub heritage: String,
    #[serde(deserialize_with = "lenient::text")]
    pub background: String,
    /// Key ability as a short key (`"str"`).
    #[serde(deserialize_with = "lenient::text")]
    pub keyability: String,
    #[serde(rename = "sizeName", deserialize_with = "lenient::text")]
    pub size_name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub deity: String,
    #[serde(deserialize_with = "lenient::text")]
    pub alignment: String,
    #[serde(deserialize_with = "lenient::level")]
    pub level: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub xp: i64,
    #[serde(deserialize_with = "lenient::record")]
    pub abilities: Abilities,
    #[serde(deserialize_with = "lenient::record")]
    pub attributes: Attributes,
    #[serde(deserialize_with = "lenient::record")]
    pub proficiencies: Proficiencies,
    #[serde(rename = "acTotal", deserialize_with = "lenient::record")]
    pub ac_total: AcTotal,
    #[serde(deserialize_with = "lenient::text_list")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub lores: Vec<Lore>,
    #[serde(deserialize_with = "lenient::list")]
    pub weapons: Vec<Weapon>,
    #[serde(deserialize_with = "lenient::list")]
    pub armor: Vec<Armor>,
    #[serde(deserialize_with = "lenient::list")]
    pub equipment: Vec<EquipmentItem>,
    #[serde(deserialize_with = "lenient::list")]
    pub feats: Vec<Feat>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub specials: Vec<String>,
    #[serde(rename = "spellCasters", deserialize_with = "lenient::list")]
    pub spell_casters: Vec<SpellCaster>,
    #[serde(rename = "focusPoints", deserialize_with = "lenient::int")]
    pub focus_points: i64,
    #[serde(deserialize_with = "focus_map")]
    pub focus: FocusMap,
    #[serde(deserialize_with = "lenient::record")]
    pub money: Money,
}

impl Default for Build {
    fn default() -> Self {
        Self {
            name: String::new(),
            class: String::new(),
            ancestry: String::new(),
            heritage: String::new(),
            background: String::new(),
            keyability: String::new(),
            size_name: String::new(),
            deity: String::new(),
            alignment: String::new(),
            level: 1,
            xp: 0,
            abilities: Abilities::default(),
            attributes: Attributes::default(),
            proficiencies: Proficiencies::default(),
            ac_total: AcTotal::default(),
            languages: Vec::new(),
            lores: Vec::new(),
            weapons: Vec::new(),
            armor: Vec::new(),
            equipment: Vec::new(),
            feats: Vec::new(),
            specials: Vec::new(),
            spell_casters: Vec::new(),
            focus_points: 0,
            focus: FocusMap::new(),
            money: Money::default(),
        }
    }
}

impl Build {
    /// Read a build from an already-unwrapped JSON value.
    ///
    /// Never fails: anything that is not an object yields the default build.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Ability modifier for `ability`, using floor division.
    pub fn modifier(&self, ability: Ability) -> i64 {
        self.abilities.score(ability).saturating_sub(10).div_euclid(2)
    }

    /// The key ability, when the export names a valid one.
    pub fn key_ability(&self) -> Option<Ability> {
        Ability::from_key(&self.keyability)
    }

    /// Whether the build has any spellcasting at all.
    pub fn has_spellcasting(&self) -> bool {
        !self.spell_casters.is_empty() || self.focus.values().any(|cells| !cells.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_uses_defaults() {
        let build = Build::from_value(json!({}));
        assert_eq!(build.level, 1);
        assert_eq!(build.abilities.str, 10);
        assert_eq!(build.xp, 0);
        assert!(build.weapons.is_empty());
        assert!(!build.has_spellcasting());
    }

    #[test]
    fn test_non_object_uses_defaults() {
        assert_eq!(Build::from_value(json!("nope")), Build::default());
        assert_eq!(Build::from_value(json!(null)), Build::default());
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let build = Build::from_value(json!({
            "name": "Ezren",
            "level": "7",
            "abilities": {"str": "14", "dex": null, "con": "tough"},
            "weapons": "none",
            "specials": ["Weapon Specialization", 3, null],
            "proficiencies": {"martial": "4", "simple": 2, "bogus": "x"},
        }));
        assert_eq!(build.name, "Ezren");
        assert_eq!(build.level, 7);
        assert_eq!(build.abilities.str, 14);
        assert_eq!(build.abilities.dex, 10);
        assert_eq!(build.abilities.con, 10);
        assert!(build.weapons.is_empty());
        assert_eq!(build.specials, vec!["Weapon Specialization", "3"]);
        assert_eq!(build.proficiencies.rank("martial"), 4);
        assert_eq!(build.proficiencies.rank("bogus"), 0);
        assert_eq!(build.proficiencies.highest_weapon_rank(), 4);
    }

    #[test]
    fn test_feat_tuple_positions() {
        let build = Build::from_value(json!({
            "feats": [
                ["Assurance", "Athletics", "Skill Feat", 2, "Skill Feat 2", "standardChoice"],
                ["Taunting Strike", null, "Class Feat", 8, "Advanced Defender", "childChoice", "Fighter Feat 8"],
                "Toughness"
            ]
        }));
        assert_eq!(build.feats.len(), 3);
        assert_eq!(build.feats[0].sub_choice.as_deref(), Some("Athletics"));
        assert_eq!(build.feats[0].level, 2);
        assert!(!build.feats[0].is_child_choice());
        assert!(build.feats[1].is_child_choice());
        assert_eq!(build.feats[1].parent_slot.as_deref(), Some("Fighter Feat 8"));
        assert_eq!(build.feats[2].name, "Toughness");
        assert_eq!(build.feats[2].level, 0);
    }

    #[test]
    fn test_modifier_floors() {
        let build = Build::from_value(json!({"abilities": {"str": 7, "dex": 18, "con": 9}}));
        assert_eq!(build.modifier(Ability::Strength), -2);
        assert_eq!(build.modifier(Ability::Dexterity), 4);
        assert_eq!(build.modifier(Ability::Constitution), -1);
        assert_eq!(build.modifier(Ability::Wisdom), 0);
    }

    #[test]
    fn test_equipment_and_lores() {
        let build = Build::from_value(json!({
            "equipment": [["Rope", 2, "Invested"], "Torch", {"name": "Bedroll"}],
            "lores": [["Warfare", 2], ["Sailing"]]
        }));
        assert_eq!(build.equipment[0], EquipmentItem { name: "Rope".into(), qty: 2 });
        assert_eq!(build.equipment[1].name, "Torch");
        assert_eq!(build.equipment[2].qty, 1);
        assert_eq!(build.lores[0].rank, 2);
        assert_eq!(build.lores[1].rank, 0);
    }

    #[test]
    fn test_caster_defaults_and_focus() {
        let build = Build::from_value(json!({
            "spellCasters": [{"name": "Wizard", "spells": [{"spellLevel": 1, "list": ["Fear"]}]}],
            "focus": {"divine": {"wis": {"proficiency": 4, "focusSpells": ["Lay on Hands"]}}, "junk": 3}
        }));
        let caster = &build.spell_casters[0];
        assert_eq!(caster.magic_tradition, "arcane");
        assert_eq!(caster.spellcasting_type, "prepared");
        assert_eq!(caster.ability, "int");
        assert_eq!(build.focus.len(), 1);
        assert_eq!(build.focus["divine"]["wis"].proficiency, 4);
        assert!(build.has_spellcasting());
    }

    #[test]
    fn test_ability_from_key() {
        assert_eq!(Ability::from_key("dex"), Some(Ability::Dexterity));
        assert_eq!(Ability::from_key("Wisdom"), Some(Ability::Wisdom));
        assert_eq!(Ability::from_key("luck"), None);
    }
}

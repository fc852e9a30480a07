//! Spells tab.
//!
//! Every spell source (class casters, innate grants and focus pools) is
//! normalized into a [`SpellcastingEntry`], bucketed by tradition and
//! rendered as one titled group per tradition.

use crate::ids::Tab;
use crate::proficiency::{proficiency_bonus, proficiency_formula, ProficiencyTiers};
use crate::property::PropertyNode;
use crate::writer::{SheetWriter, SkillBlock};
use pathbuilder::{Ability, Build, FocusCell, SpellCaster};
use regex::Regex;
use std::collections::BTreeMap;

lazy_static::lazy_static! {
    static ref FOCUS_RANK: Regex = Regex::new(r"\(Rank (\d+)\)").expect("valid focus rank pattern");
    static ref FOCUS_RANK_SUFFIX: Regex = Regex::new(r"\s*\(Rank \d+\)").expect("valid focus rank suffix pattern");
}

const NO_SPELLCASTING: &str = "<p>No spellcasting abilities.</p>";

/// How a source casts its spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastingMode {
    Prepared,
    Spontaneous,
    Innate,
    Focus,
}

impl CastingMode {
    /// Parse a caster's `spellcastingType`; anything unrecognized is prepared.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "spontaneous" => CastingMode::Spontaneous,
            "innate" => CastingMode::Innate,
            "focus" => CastingMode::Focus,
            _ => CastingMode::Prepared,
        }
    }
}

/// One spell source, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellcastingEntry {
    /// Lower-cased tradition name.
    pub tradition: String,
    pub mode: CastingMode,
    pub caster_name: String,
    pub ability: Option<Ability>,
    pub proficiency: i64,
    /// Known spells by rank; rank 0 holds cantrips.
    pub spells: BTreeMap<i64, Vec<String>>,
    /// Prepared spells by rank with how many times each was prepared.
    pub prepared: BTreeMap<i64, BTreeMap<String, usize>>,
    /// Slots per day indexed by rank.
    pub slots: Vec<i64>,
    /// Rank at which cantrips and focus spells are displayed.
    pub max_rank: i64,
}

impl SpellcastingEntry {
    fn slots_at(&self, rank: i64) -> i64 {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.slots.get(r).copied())
            .unwrap_or(0)
    }
}

/// Lower-cased tradition name; blank traditions are read as arcane.
fn normalize_tradition(raw: &str) -> String {
    let tradition = raw.trim().to_lowercase();
    if tradition.is_empty() {
        "arcane".to_string()
    } else {
        tradition
    }
}

fn tradition_of(caster: &SpellCaster) -> String {
    normalize_tradition(&caster.magic_tradition)
}

/// Highest rank a caster has spells, preparations or slots in.
fn caster_max_rank(caster: &SpellCaster) -> i64 {
    let listed = caster
        .spells
        .iter()
        .chain(&caster.prepared)
        .map(|r| r.spell_level);
    let slotted = (0..)
        .zip(&caster.per_day)
        .filter(|(rank, count)| *rank > 0 && **count > 0)
        .map(|(rank, _)| rank);
    listed.chain(slotted).max().unwrap_or(0)
}

/// Display rank for cantrips and focus spells of `tradition`.
///
/// Highest rank among that tradition's casters, else the highest of any
/// caster, else half the character level rounded up.
pub fn tradition_max_rank(build: &Build, tradition: &str) -> i64 {
    let same = build
        .spell_casters
        .iter()
        .filter(|c| tradition_of(c) == tradition)
        .map(caster_max_rank)
        .max()
        .unwrap_or(0);
    if same > 0 {
        return same;
    }
    let global = build
        .spell_casters
        .iter()
        .map(caster_max_rank)
        .max()
        .unwrap_or(0);
    if global > 0 {
        return global;
    }
    (build.level.saturating_add(1) / 2).max(1)
}

/// Split a focus spell name into its bare name and the rank in its `(Rank N)` suffix.
pub fn parse_focus_spell(name: &str) -> (String, i64) {
    let rank = FOCUS_RANK
        .captures(name)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(1);
    let bare = FOCUS_RANK_SUFFIX.replace(name, "").trim().to_string();
    (bare, rank.max(1))
}

fn caster_entry(build: &Build, caster: &SpellCaster) -> SpellcastingEntry {
    let tradition = tradition_of(caster);
    let mode = CastingMode::parse(&caster.spellcasting_type);

    let mut spells: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for rank in &caster.spells {
        let names: Vec<String> = rank.list.iter().filter(|n| !n.is_empty()).cloned().collect();
        if !names.is_empty() {
            spells.entry(rank.spell_level).or_default().extend(names);
        }
    }

    let mut prepared: BTreeMap<i64, BTreeMap<String, usize>> = BTreeMap::new();
    if mode == CastingMode::Prepared {
        for rank in &caster.prepared {
            for name in rank.list.iter().filter(|n| !n.is_empty()) {
                *prepared
                    .entry(rank.spell_level)
                    .or_default()
                    .entry(name.clone())
                    .or_default() += 1;
            }
        }
    }

    let name = caster.name.trim();
    SpellcastingEntry {
        max_rank: tradition_max_rank(build, &tradition),
        tradition,
        mode,
        caster_name: if name.is_empty() { "Spellcaster".to_string() } else { name.to_string() },
        ability: Ability::from_key(&caster.ability),
        proficiency: caster.proficiency,
        spells,
        prepared,
        slots: caster.per_day.clone(),
    }
}

fn focus_entry(build: &Build, tradition: &str, ability: &str, cell: &FocusCell) -> SpellcastingEntry {
    let mut spells: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    if !cell.focus_cantrips.is_empty() {
        spells.insert(0, cell.focus_cantrips.clone());
    }
    for name in &cell.focus_spells {
        let (bare, rank) = parse_focus_spell(name);
        spells.entry(rank).or_default().push(bare);
    }
    SpellcastingEntry {
        tradition: tradition.to_string(),
        mode: CastingMode::Focus,
        caster_name: ability.to_uppercase(),
        ability: Ability::from_key(ability),
        proficiency: cell.proficiency,
        spells,
        prepared: BTreeMap::new(),
        slots: Vec::new(),
        max_rank: tradition_max_rank(build, tradition),
    }
}

/// All spell sources grouped by tradition, traditions in alphabetical order.
/// Within a tradition, casters come first in source order, then focus pools.
pub fn spellcasting_entries(build: &Build) -> BTreeMap<String, Vec<SpellcastingEntry>> {
    let mut groups: BTreeMap<String, Vec<SpellcastingEntry>> = BTreeMap::new();
    for caster in &build.spell_casters {
        let entry = caster_entry(build, caster);
        groups.entry(entry.tradition.clone()).or_default().push(entry);
    }
    for (tradition, cells) in &build.focus {
        let tradition = normalize_tradition(tradition);
        for (ability, cell) in cells {
            let entry = focus_entry(build, &tradition, ability, cell);
            groups.entry(tradition.clone()).or_default().push(entry);
        }
    }
    groups
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Rank N Name`, with ` (×N)` when the spell was prepared more than once.
pub fn spell_label(rank: i64, name: &str, count: usize) -> String {
    if count > 1 {
        format!("Rank {rank} {name} (×{count})")
    } else {
        format!("Rank {rank} {name}")
    }
}

fn spell_message(sheet: &mut SheetWriter, parent: u64, label: String, rank: i64) {
    let message = format!("Casts {label}");
    sheet.message(parent, label, message, rank);
}

/// A `Cantrip` or `Rank N` section listing spells with their counts.
fn rank_section(
    sheet: &mut SheetWriter,
    parent: u64,
    rank: i64,
    spells: &BTreeMap<String, usize>,
    max_rank: i64,
    slots: Option<i64>,
) {
    let cantrip = rank == 0;
    let section = if cantrip {
        sheet.title(parent, "Cantrip", 0, true)
    } else {
        sheet.title(parent, format!("Rank {rank}"), rank, false)
    };
    if let Some(slots) = slots.filter(|s| !cantrip && *s > 0) {
        sheet.paragraph(section, format!("<p>Spell Slots: {slots}</p>"), 0);
    }
    let display_rank = if cantrip { max_rank } else { rank };
    for (i, (name, count)) in (1..).zip(spells) {
        spell_message(sheet, section, spell_label(display_rank, name, *count), i);
    }
}

fn counted(names: &[String]) -> BTreeMap<String, usize> {
    names.iter().map(|n| (n.clone(), 1)).collect()
}

fn prepared_section(sheet: &mut SheetWriter, column: u64, entry: &SpellcastingEntry, title: &str, suffix: &str) {
    let section = sheet.title(column, format!("{title} Prepared Spells{suffix}"), -1, false);
    for (rank, spells) in &entry.prepared {
        rank_section(sheet, section, *rank, spells, entry.max_rank, Some(entry.slots_at(*rank)));
    }
}

fn spellbook_section(sheet: &mut SheetWriter, column: u64, entry: &SpellcastingEntry, title: &str, suffix: &str) {
    let section = sheet.title(column, format!("{title} Spell Book{suffix}"), 0, false);
    for (rank, names) in &entry.spells {
        let rank_title = if *rank == 0 {
            sheet.title(section, "Cantrips", -1, true)
        } else {
            sheet.title(section, format!("Rank {rank}"), *rank, false)
        };
        let list = sheet.filter_list(rank_title, -1);
        let mut names = names.clone();
        names.sort();
        for (i, name) in (0..).zip(names) {
            spell_message(sheet, list, name, i);
        }
    }
}

fn listed_section(
    sheet: &mut SheetWriter,
    column: u64,
    entry: &SpellcastingEntry,
    heading: String,
    with_slots: bool,
) {
    let section = sheet.title(column, heading, 0, false);
    for (rank, names) in &entry.spells {
        let slots = with_slots.then(|| entry.slots_at(*rank));
        rank_section(sheet, section, *rank, &counted(names), entry.max_rank, slots);
    }
}

fn focus_section(sheet: &mut SheetWriter, column: u64, entry: &SpellcastingEntry, title: &str, suffix: &str) {
    let section = sheet.title(column, format!("{title} Focus Spells{suffix}"), 0, true);
    if let Some(cantrips) = entry.spells.get(&0) {
        let cantrip = sheet.title(section, "Cantrip", 1, false);
        for (i, name) in (0..).zip(cantrips) {
            spell_message(sheet, cantrip, spell_label(entry.max_rank, name, 1), i);
        }
    }
    let focus: Vec<&String> = entry.spells.range(1..).flat_map(|(_, names)| names).collect();
    if !focus.is_empty() {
        let spells = sheet.title(section, "Focus Spell", 2, false);
        for (i, name) in (0..).zip(focus) {
            spell_message(sheet, spells, spell_label(entry.max_rank, name, 1), i);
        }
    }
}

fn suffix(entry: &SpellcastingEntry, of_mode: usize) -> String {
    if of_mode > 1 {
        format!(" - {}", entry.caster_name)
    } else {
        String::new()
    }
}

fn tradition_group(
    sheet: &mut SheetWriter,
    build: &Build,
    parent: u64,
    index: i64,
    tradition: &str,
    entries: &[SpellcastingEntry],
) {
    let Some(first) = entries.first() else {
        return;
    };
    let title = capitalize(tradition);
    let group = sheet.title(parent, format!("{title} Spellcasting"), index, false);

    let proficiency = entries.iter().map(|e| e.proficiency).max().unwrap_or(0);
    let ability_mod = first.ability.map(|a| build.modifier(a)).unwrap_or(0);
    let attack_key = format!("{tradition}_spell_attack");
    let attack = proficiency_bonus(proficiency, build.level, ability_mod, 0);

    let top = sheet.row(group, -3);
    sheet.separator(top.left, -2);
    sheet.skill(
        top.left,
        SkillBlock {
            name: format!("{title} Spell Attack"),
            formula: proficiency_formula(&attack_key, first.ability),
            message: Some(format!("{title} Spell Attack: {{1d20 + {attack_key}}}")),
            key: attack_key.clone(),
            value: attack,
            tiers: ProficiencyTiers::from_rank(proficiency),
        },
        1,
    );
    sheet.separator(top.right, -1);
    sheet.computed(
        top.right,
        format!("{title} Spell DC"),
        attack + 10,
        format!("{attack_key} + 10"),
        0,
    );

    let of_mode = |mode: CastingMode| -> Vec<&SpellcastingEntry> {
        entries.iter().filter(|e| e.mode == mode).collect()
    };
    let prepared = of_mode(CastingMode::Prepared);
    let spontaneous = of_mode(CastingMode::Spontaneous);
    let innate = of_mode(CastingMode::Innate);
    let focus = of_mode(CastingMode::Focus);

    let mut section_rank = -1;

    if !prepared.is_empty() {
        let row = sheet.row(group, section_rank);
        section_rank += 1;
        sheet.separator(row.left, -2);
        for (i, entry) in prepared.iter().enumerate() {
            let tag = suffix(entry, prepared.len());
            prepared_section(sheet, row.left, entry, &title, &tag);
            spellbook_section(sheet, row.right, entry, &title, &tag);
            if i + 1 < prepared.len() {
                sheet.separator(row.left, 100 + i as i64);
                sheet.separator(row.right, 100 + i as i64);
            }
        }
    }

    if !spontaneous.is_empty() || !innate.is_empty() {
        let row = sheet.row(group, section_rank);
        section_rank += 1;
        sheet.separator(row.left, -2);
        sheet.separator(row.right, -1);
        let mut slot = 0;
        for (sources, kind, with_slots) in [
            (&spontaneous, "Spontaneous Spells", true),
            (&innate, "Innate Spellcasting", false),
        ] {
            for (i, entry) in sources.iter().enumerate() {
                let column = row.column(slot);
                slot += 1;
                let heading = format!("{title} {kind}{}", suffix(entry, sources.len()));
                listed_section(sheet, column, entry, heading, with_slots);
                if i + 1 < sources.len() {
                    sheet.separator(column, 100 + i as i64);
                }
            }
        }
    }

    if !focus.is_empty() {
        let row = sheet.row(group, section_rank);
        sheet.separator(row.left, -1);
        sheet.separator(row.right, -1);
        for (i, entry) in focus.iter().enumerate() {
            let column = row.column(i);
            focus_section(sheet, column, entry, &title, &suffix(entry, focus.len()));
            if i + 1 < focus.len() {
                sheet.separator(column, 100 + i as i64);
            }
        }
    }
}

pub fn build_spells(build: &Build) -> Vec<PropertyNode> {
    let mut sheet = SheetWriter::new(Tab::Spells);
    let tab = sheet.tab_root();

    if !build.has_spellcasting() {
        sheet.paragraph(tab, NO_SPELLCASTING, 0);
        return sheet.finish();
    }
    let groups = spellcasting_entries(build);

    if build.focus_points > 0 {
        sheet.tracker(tab, "Focus Points", 0, build.focus_points, -10);
    }

    for (index, (tradition, entries)) in (0..).zip(&groups) {
        tracing::debug!(tradition = %tradition, sources = entries.len(), "rendering spell tradition");
        tradition_group(&mut sheet, build, tab, index, tradition, entries);
    }

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyKind;
    use serde_json::json;

    fn wizard() -> Build {
        Build::from_value(json!({
            "level": 13,
            "abilities": {"int": 20},
            "spellCasters": [{
                "name": "Wizard",
                "magicTradition": "arcane",
                "spellcastingType": "prepared",
                "ability": "int",
                "proficiency": 4,
                "perDay": [5, 3, 3, 3, 3, 3, 3, 2],
                "spells": [
                    {"spellLevel": 0, "list": ["Shield", "Detect Magic"]},
                    {"spellLevel": 1, "list": ["Magic Missile", "Grease"]},
                    {"spellLevel": 7, "list": ["Warp Mind"]}
                ],
                "prepared": [
                    {"spellLevel": 0, "list": ["Shield"]},
                    {"spellLevel": 1, "list": ["Magic Missile", "Magic Missile", "Grease"]}
                ]
            }],
            "focusPoints": 2,
            "focus": {"arcane": {"int": {"proficiency": 4, "focusSpells": ["Force Bolt (Rank 3)"]}}}
        }))
    }

    fn names(props: &[PropertyNode]) -> Vec<&str> {
        props.iter().filter_map(|p| p.name.as_deref()).collect()
    }

    #[test]
    fn test_parse_focus_spell() {
        assert_eq!(parse_focus_spell("Force Bolt (Rank 3)"), ("Force Bolt".to_string(), 3));
        assert_eq!(parse_focus_spell("Lay on Hands"), ("Lay on Hands".to_string(), 1));
    }

    #[test]
    fn test_focus_heightened_to_tradition_max() {
        let props = build_spells(&wizard());
        assert!(names(&props).contains(&"Rank 7 Force Bolt"));
    }

    #[test]
    fn test_duplicate_prepared_collapses() {
        let props = build_spells(&wizard());
        let names = names(&props);
        assert!(names.contains(&"Rank 1 Magic Missile (×2)"));
        assert!(names.contains(&"Rank 1 Grease"));
        assert!(names.contains(&"Rank 7 Shield"));
        assert!(!names.contains(&"Rank 1 Magic Missile"));
    }

    #[test]
    fn test_spell_attack_and_dc() {
        let build = wizard();
        let props = build_spells(&build);
        let attack = props
            .iter()
            .find(|p| p.name.as_deref() == Some("Arcane Spell Attack"))
            .unwrap();
        // level 13 + expert 4 + int 5
        assert_eq!(attack.value_int(), Some(22));
        assert_eq!(attack.kind, PropertyKind::Skill4);
        let dc = props
            .iter()
            .find(|p| p.name.as_deref() == Some("Arcane Spell DC"))
            .unwrap();
        assert_eq!(dc.value_int(), Some(32));
        assert_eq!(dc.formula.as_deref(), Some("arcane_spell_attack + 10"));
    }

    #[test]
    fn test_slot_paragraph_and_focus_points() {
        let props = build_spells(&wizard());
        assert!(props
            .iter()
            .any(|p| p.value_str() == Some("<p>Spell Slots: 3</p>")));
        let max = props
            .iter()
            .find(|p| p.name.as_deref() == Some("focus_points-max"))
            .unwrap();
        assert_eq!(max.value_int(), Some(2));
    }

    #[test]
    fn test_max_rank_fallbacks() {
        let primal_only = Build::from_value(json!({
            "level": 9,
            "spellCasters": [{"magicTradition": "primal", "spells": [{"spellLevel": 4, "list": ["x"]}]}]
        }));
        assert_eq!(tradition_max_rank(&primal_only, "primal"), 4);
        assert_eq!(tradition_max_rank(&primal_only, "divine"), 4);

        let none = Build::from_value(json!({"level": 6}));
        assert_eq!(tradition_max_rank(&none, "divine"), 3);
        let first = Build::from_value(json!({"level": 1}));
        assert_eq!(tradition_max_rank(&first, "divine"), 1);
    }

    #[test]
    fn test_blank_focus_tradition_is_arcane() {
        let build = Build::from_value(json!({
            "focusPoints": 1,
            "focus": {" ": {"int": {"focusSpells": ["Hand of the Apprentice (Rank 1)"]}}}
        }));
        let groups = spellcasting_entries(&build);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["arcane"]);

        let props = build_spells(&build);
        assert!(props
            .iter()
            .any(|p| p.value_str() == Some("Arcane Focus Spells")));
        assert!(props
            .iter()
            .all(|p| !p.value_str().is_some_and(|v| v.starts_with(' '))));
    }

    #[test]
    fn test_traditions_sorted_and_suffixed() {
        let build = Build::from_value(json!({
            "spellCasters": [
                {"name": "Sorcerer", "magicTradition": "Occult", "spellcastingType": "spontaneous"},
                {"name": "Gnome", "magicTradition": "primal", "spellcastingType": "innate"},
                {"name": "Bard", "magicTradition": "occult", "spellcastingType": "spontaneous"}
            ]
        }));
        let props = build_spells(&build);
        let titles: Vec<_> = props
            .iter()
            .filter(|p| p.kind == PropertyKind::TitleSection)
            .filter_map(|p| p.value_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Occult Spellcasting",
                "Occult Spontaneous Spells - Sorcerer",
                "Occult Spontaneous Spells - Bard",
                "Primal Spellcasting",
                "Primal Innate Spellcasting",
            ]
        );
    }

    #[test]
    fn test_no_spellcasting_placeholder() {
        let props = build_spells(&Build::default());
        assert_eq!(props.len(), 2);
        assert_eq!(props[1].value_str(), Some(NO_SPELLCASTING));
    }
}

//! Character tab: details, abilities, skills, lores and combat info.
//!
//! The Character builder also runs the Inventory, Feats and Background
//! builders and appends their tabs, since the formulas on this tab read
//! values that live there.

use crate::ids::Tab;
use crate::map::{background, feats, inventory};
use crate::property::{PropertyKind, PropertyNode};
use crate::proficiency::{
    ability_modifier, formula_ref, modifier_formula, proficiency_bonus, proficiency_formula,
    slugify, ProficiencyTiers,
};
use crate::writer::{SheetWriter, SkillBlock};
use pathbuilder::{Ability, Build};

/// Column widths of the Character tab.
const LEFT_WIDTH: f64 = 62.76995305164285;
const RIGHT_WIDTH: f64 = 37.23004694835691;

const MAX_HP_FORMULA: &str =
    "(class_hp + constitution) * level + ancestry_hp + level * hp_per_level + bonus_hp";
const AC_FORMULA: &str = "armor_class + (shield_raised ? shield_circumstance_bonus : 0)";

/// The sixteen skills and their governing abilities.
pub const SKILLS: [(&str, Ability); 16] = [
    ("Acrobatics", Ability::Dexterity),
    ("Arcana", Ability::Intelligence),
    ("Athletics", Ability::Strength),
    ("Crafting", Ability::Intelligence),
    ("Deception", Ability::Charisma),
    ("Diplomacy", Ability::Charisma),
    ("Intimidation", Ability::Charisma),
    ("Medicine", Ability::Wisdom),
    ("Nature", Ability::Wisdom),
    ("Occultism", Ability::Intelligence),
    ("Performance", Ability::Charisma),
    ("Religion", Ability::Wisdom),
    ("Society", Ability::Intelligence),
    ("Stealth", Ability::Dexterity),
    ("Survival", Ability::Wisdom),
    ("Thievery", Ability::Dexterity),
];

/// Maximum hit points: `(class + Con) * level + ancestry + level * per-level + bonus`.
pub fn max_hp(build: &Build) -> i64 {
    let attrs = &build.attributes;
    attrs
        .classhp
        .saturating_add(build.modifier(Ability::Constitution))
        .saturating_mul(build.level)
        .saturating_add(attrs.ancestryhp)
        .saturating_add(build.level.saturating_mul(attrs.bonushp_per_level))
        .saturating_add(attrs.bonushp)
}

/// A rollable proficiency block against an ability. `key` doubles as the roll reference.
fn check_block(build: &Build, name: &str, key: String, rank: i64, ability: Ability) -> SkillBlock {
    SkillBlock {
        name: name.to_string(),
        formula: proficiency_formula(&key, Some(ability)),
        message: Some(format!("{name}: {{1d20 + {key}}}")),
        key,
        value: proficiency_bonus(rank, build.level, build.modifier(ability), 0),
        tiers: ProficiencyTiers::from_rank(rank),
    }
}

pub fn build_character(build: &Build) -> Vec<PropertyNode> {
    let mut sheet = SheetWriter::new(Tab::Character);
    let tab = sheet.tab_root();
    let main = sheet.row_sized(tab, -4, LEFT_WIDTH, RIGHT_WIDTH);

    details(&mut sheet, build, main.left);
    abilities(&mut sheet, build, main.left);
    skills(&mut sheet, build, main.left);
    lores(&mut sheet, build, main.left);
    status(&mut sheet, main.right);
    combat(&mut sheet, build, main.right);

    let mut props = sheet.finish();
    props.extend(inventory::build_inventory(build));
    props.extend(feats::build_feats(build));
    props.extend(background::build_background(build));
    props
}

fn details(sheet: &mut SheetWriter, build: &Build, column: u64) {
    let title = sheet.title(column, "Character Details", -100, false);
    let row = sheet.row(title, 0);
    sheet.text(row.left, "Name", build.name.clone(), -100);
    sheet.text(row.left, "Ancestry", build.ancestry.clone(), -90);
    sheet.text(row.left, "Heritage", build.heritage.clone(), -80);
    sheet.text(row.left, "Class", build.class.clone(), -70);

    let key_ability = build.key_ability().map(|a| a.name()).unwrap_or_default();
    sheet.text(row.right, "Background", build.background.clone(), -60);
    sheet.text(row.right, "Key Ability", key_ability, -50);
    sheet.number(row.right, "Experience", build.xp, -20);
    sheet.number(row.right, "Level", build.level, -10);
}

fn abilities(sheet: &mut SheetWriter, build: &Build, column: u64) {
    let title = sheet.title(column, "Ability Scores", 0, false);
    let key = build.key_ability();
    for (rank, ability) in (-1..).zip(Ability::all()) {
        let score = build.abilities.score(ability);
        let score_name = format!("{}-score", formula_ref(ability.name()));
        let id = sheet.add(
            PropertyNode::new(PropertyKind::Ability)
                .child_of(title)
                .with_name(ability.name())
                .with_value(ability_modifier(score))
                .with_formula(modifier_formula(&score_name))
                .with_rank(rank),
        );
        sheet.number(id, score_name, score, 0);
        sheet.checkbox(
            id,
            format!("{}-key", formula_ref(ability.name())),
            key == Some(ability),
            1,
        );
    }
}

fn skills(sheet: &mut SheetWriter, build: &Build, column: u64) {
    let title = sheet.title(column, "Skills", 10, false);
    for (rank, (name, ability)) in (0..).zip(SKILLS) {
        let key = formula_ref(name);
        let prof = build.proficiencies.rank(&key);
        let block = check_block(build, name, key, prof, ability);
        sheet.skill(title, block, rank);
    }
}

fn lores(sheet: &mut SheetWriter, build: &Build, column: u64) {
    let lores: Vec<_> = build
        .lores
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .collect();
    if lores.is_empty() {
        return;
    }
    let title = sheet.title(column, "Lores", 20, false);
    for (rank, lore) in (0..).zip(lores) {
        let name = format!("Lore: {}", lore.name.trim());
        let key = format!("lore_{}", slugify(&lore.name));
        let block = check_block(build, &name, key, lore.rank, Ability::Intelligence);
        sheet.skill(title, block, rank);
    }
}

fn status(sheet: &mut SheetWriter, column: u64) {
    sheet.add(
        PropertyNode::new(PropertyKind::Appearance)
            .child_of(column)
            .with_rank(-10),
    );
    sheet.tracker(column, "Hero Points", 1, 3, -5);
    let row = sheet.row(column, -4);
    sheet.tracker(row.left, "Dying", 0, 4, 0);
    sheet.tracker(row.right, "Wounded", 0, 3, 0);
}

fn combat(sheet: &mut SheetWriter, build: &Build, column: u64) {
    let title = sheet.title(column, "Combat Info", 0, false);

    let hp = max_hp(build);
    let health = sheet.add(
        PropertyNode::new(PropertyKind::Health)
            .child_of(title)
            .with_name("Hit Points")
            .with_value(hp)
            .with_rank(0),
    );
    sheet.computed(health, "Max HP", hp, MAX_HP_FORMULA, 0);
    sheet.number(health, "Temp HP", 0, 1);

    let ac_row = sheet.row(title, 1);
    sheet.computed(ac_row.left, "AC", inventory::armor_class(build), AC_FORMULA, 0);
    sheet.checkbox(ac_row.right, "Shield Raised", false, 0);

    let key_ability = build.key_ability().unwrap_or(Ability::Strength);
    let class_rank = build.proficiencies.rank("classDC");
    let class_bonus = proficiency_bonus(class_rank, build.level, build.modifier(key_ability), 0);
    let class_key = formula_ref("Class DC");
    sheet.skill(
        title,
        SkillBlock {
            name: "Class DC".to_string(),
            formula: format!("10 + {}", proficiency_formula(&class_key, Some(key_ability))),
            key: class_key.clone(),
            value: 10 + class_bonus,
            tiers: ProficiencyTiers::from_rank(class_rank),
            message: Some(format!("Class DC: {{{class_key}}}")),
        },
        2,
    );

    for (rank, (name, ability)) in (3..).zip([
        ("Perception", Ability::Wisdom),
        ("Fortitude", Ability::Constitution),
        ("Reflex", Ability::Dexterity),
        ("Will", Ability::Wisdom),
    ]) {
        let key = formula_ref(name);
        let prof = build.proficiencies.rank(&key);
        let block = check_block(build, name, key, prof, ability);
        sheet.skill(title, block, rank);
    }

    let attrs = &build.attributes;
    let speed = sheet.row(title, 7);
    sheet.computed(
        speed.left,
        "Speed",
        attrs.speed + attrs.speed_bonus,
        "base_speed + speed_bonus",
        0,
    );
    sheet.number(speed.right, "Base Speed", attrs.speed, 0);
    sheet.number(speed.right, "Speed Bonus", attrs.speed_bonus, 1);

    sheet.text(title, "Languages", build.languages.join(", "), 8);
}

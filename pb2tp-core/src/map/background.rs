//! Background tab: the user guide and the private hidden values that other
//! tabs' formulas read.

use crate::ids::Tab;
use crate::map::inventory::armor_class;
use crate::property::{PropertyKind, PropertyNode};
use crate::proficiency::{EXPERT, LEGENDARY, MASTER};
use crate::writer::SheetWriter;
use pathbuilder::{Build, Proficiencies};

const GUIDE: &str = "<p><strong>Pathbuilder 2e to Tableplop: sheet notes</strong></p>\
<p>Pathbuilder does not export backstory text. Replace this section with your character's background, personality and goals.</p>\
<p><strong>Armor</strong></p>\
<p>Common armors are recognized by name. Unknown armor uses the defaults for its category:</p>\
<ul>\
<li><strong>Heavy:</strong> item bonus +5, Dex cap +1</li>\
<li><strong>Medium:</strong> item bonus +3, Dex cap +2</li>\
<li><strong>Light:</strong> item bonus +1, Dex cap +4</li>\
<li><strong>Unarmored:</strong> item bonus +0, Dex cap +5</li>\
</ul>\
<p>Correct the Item Bonus and Dexterity Cap fields on the Inventory tab for anything unusual.</p>\
<p><strong>Shields</strong></p>\
<p>Shield Hit Points and Hardness are not exported. Fill them in on the Inventory tab.</p>\
<p><strong>Hidden Values</strong></p>\
<p>The fields below feed formulas elsewhere on the sheet: hit point modifiers drive Max HP on the Character tab, \
Armor Class drives the AC shown there, and the damage bonuses are added to every weapon's damage roll.</p>\
<p><em>Delete these notes once you have read them.</em></p>";

/// Weapon specialization damage from the specials list and weapon proficiency.
///
/// Matching is a case-insensitive substring test: any special containing
/// `greater weapon specialization` grants 4/6/8, otherwise any special
/// containing `weapon specialization` grants 2/3/4, at expert/master/legendary
/// in the best weapon category. Below expert, or without either special, the
/// bonus is 0.
pub fn class_damage_bonus(specials: &[String], proficiencies: &Proficiencies) -> i64 {
    let specials: Vec<String> = specials.iter().map(|s| s.to_lowercase()).collect();
    let greater = specials
        .iter()
        .any(|s| s.contains("greater weapon specialization"));
    let plain = specials.iter().any(|s| s.contains("weapon specialization"));

    let rank = proficiencies.highest_weapon_rank();
    let step = if rank >= LEGENDARY {
        3
    } else if rank >= MASTER {
        2
    } else if rank >= EXPERT {
        1
    } else {
        0
    };
    if step == 0 {
        return 0;
    }

    if greater {
        2 + 2 * step
    } else if plain {
        1 + step
    } else {
        0
    }
}

pub fn build_background(build: &Build) -> Vec<PropertyNode> {
    let mut sheet = SheetWriter::new(Tab::Background);
    let tab = sheet.tab_root();

    sheet.heading(tab, "About", -19);
    sheet.paragraph(tab, GUIDE, -17);

    let hidden = sheet.add(
        PropertyNode::new(PropertyKind::TitleSection)
            .child_of(tab)
            .with_value("Hidden Values")
            .with_rank(-12)
            .collapsed(false)
            .private(),
    );
    let row = sheet.row(hidden, 6);

    let attrs = &build.attributes;
    let hp = sheet.title(row.left, "Hit Point Modifiers", -1, false);
    sheet.number(hp, "Ancestry HP", attrs.ancestryhp, 0);
    sheet.number(hp, "Class HP", attrs.classhp, 1);
    sheet.tracker(hp, "HP per Level", attrs.bonushp_per_level, 4, 2);
    sheet.number(hp, "Bonus HP", attrs.bonushp, 5);

    let combat = sheet.title(row.right, "Combat Modifiers", 3, false);
    sheet.heading(combat, "Armor Class (used by the Character tab)", -2);
    sheet.computed(combat, "Armor Class", armor_class(build), "10 + ac_bonus", -1);
    let bonus = class_damage_bonus(&build.specials, &build.proficiencies);
    tracing::debug!(bonus, "class damage bonus");
    sheet.number(combat, "Class dmg bonus", bonus, 3);
    sheet.number(combat, "Other dmg bonus", 0, 4);

    sheet.finish()
}

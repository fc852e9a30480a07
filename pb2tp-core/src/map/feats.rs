//! Feats tab.
//!
//! Feats chosen through another feat's slot (`childChoice`) are folded into
//! their parent's entry as `Parent (Child)` instead of being listed alone.

use crate::ids::Tab;
use crate::property::PropertyNode;
use crate::writer::{bullet_list, SheetWriter};
use pathbuilder::{Build, Feat};
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

lazy_static::lazy_static! {
    static ref CLASS_SLOT: Regex = Regex::new(r"^([A-Za-z]+) Feat \d+").expect("valid class slot pattern");
}

/// Section a feat is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatSection {
    Class,
    Archetype,
    AncestryParagon,
    Skill,
    General,
    Ancestry,
    Bonus,
}

impl FeatSection {
    /// Classify by slot first, then by feat type.
    pub fn classify(feat: &Feat) -> Self {
        if feat.slot.contains("Free Archetype") {
            FeatSection::Archetype
        } else if feat.slot.contains("Ancestry Paragon") {
            FeatSection::AncestryParagon
        } else {
            match feat.feat_type.as_str() {
                "Skill Feat" => FeatSection::Skill,
                "General Feat" => FeatSection::General,
                "Ancestry Feat" | "Heritage" => FeatSection::Ancestry,
                "Class Feat" => FeatSection::Class,
                _ => FeatSection::Bonus,
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FeatSection::Class => "Class Feats",
            FeatSection::Archetype => "Archetype Feats",
            FeatSection::AncestryParagon => "Ancestry Paragon",
            FeatSection::Skill => "Skill Feats",
            FeatSection::General => "General Feats",
            FeatSection::Ancestry => "Ancestry Feats",
            FeatSection::Bonus => "Bonus Feats",
        }
    }

    /// Field-name prefix for entries of this section.
    fn label(&self) -> &'static str {
        match self {
            FeatSection::Class => "Class",
            FeatSection::Archetype => "Archetype",
            FeatSection::AncestryParagon => "Ancestry Paragon",
            FeatSection::Skill => "Skill",
            FeatSection::General => "General",
            FeatSection::Ancestry => "Ancestry",
            FeatSection::Bonus => "Bonus",
        }
    }

    /// Column (0 left, 1 right) and rank of the section's title.
    fn placement(&self) -> (usize, i64) {
        match self {
            FeatSection::Class => (0, 1),
            FeatSection::Archetype => (0, 2),
            FeatSection::General => (1, 0),
            FeatSection::Skill => (1, 1),
            FeatSection::Ancestry => (1, 2),
            FeatSection::AncestryParagon => (1, 3),
            FeatSection::Bonus => (1, 4),
        }
    }

    /// Emission order.
    fn all() -> [FeatSection; 7] {
        [
            FeatSection::Class,
            FeatSection::Archetype,
            FeatSection::General,
            FeatSection::Skill,
            FeatSection::Ancestry,
            FeatSection::AncestryParagon,
            FeatSection::Bonus,
        ]
    }
}

/// A feat ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatEntry {
    pub section: FeatSection,
    pub level: i64,
    /// Field name, such as `Fighter 8` or `Skill 2`.
    pub label: String,
    /// Displayed value, such as `Advanced Defender (Taunting Strike)`.
    pub value: String,
}

/// Class name parsed from a `<ClassName> Feat <N>` slot, or `Class`.
pub fn class_label(slot: &str) -> String {
    CLASS_SLOT
        .captures(slot)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "Class".to_string())
}

/// Fold child choices into their parents and classify the rest.
pub fn feat_entries(feats: &[Feat]) -> Vec<FeatEntry> {
    let mut skip = HashSet::new();
    let mut children: HashMap<&str, &str> = HashMap::new();
    for feat in feats.iter().filter(|f| f.is_child_choice()) {
        skip.insert(feat.name.as_str());
        if let Some(parent) = feat.parent_slot.as_deref() {
            children.insert(parent, feat.name.as_str());
        }
    }

    feats
        .iter()
        .filter(|feat| !skip.contains(feat.name.as_str()))
        .map(|feat| {
            let section = FeatSection::classify(feat);
            let value = match (children.get(feat.slot.as_str()), &feat.sub_choice) {
                (Some(child), _) => format!("{} ({})", feat.name, child),
                (None, Some(choice)) => format!("{} ({})", feat.name, choice),
                (None, None) => feat.name.clone(),
            };
            let prefix = match section {
                FeatSection::Class => class_label(&feat.slot),
                other => other.label().to_string(),
            };
            FeatEntry {
                section,
                level: feat.level,
                label: format!("{prefix} {}", feat.level),
                value,
            }
        })
        .collect()
}

pub fn build_feats(build: &Build) -> Vec<PropertyNode> {
    let mut sheet = SheetWriter::new(Tab::Feats);
    let tab = sheet.tab_root();
    let row = sheet.row(tab, -1);

    let features = sheet.title(row.left, "Class & Ancestry Features", 0, true);
    sheet.paragraph(features, bullet_list(&build.specials, "None"), 0);

    let mut sections: BTreeMap<FeatSection, BTreeMap<i64, Vec<FeatEntry>>> = BTreeMap::new();
    for entry in feat_entries(&build.feats) {
        sections
            .entry(entry.section)
            .or_default()
            .entry(entry.level)
            .or_default()
            .push(entry);
    }

    for section in FeatSection::all() {
        let Some(levels) = sections.remove(&section) else {
            continue;
        };
        let (column, rank) = section.placement();
        let title = sheet.title(row.column(column), section.title(), rank, true);
        for (level, entries) in levels {
            for entry in entries {
                sheet.text(title, entry.label, entry.value, level);
            }
        }
    }

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feats(value: serde_json::Value) -> Vec<Feat> {
        Build::from_value(json!({ "feats": value })).feats
    }

    #[test]
    fn test_child_folds_into_parent() {
        let entries = feat_entries(&feats(json!([
            ["Advanced Defender", null, "Class Feat", 8, "Guardian Feat 8", "standardChoice"],
            ["Taunting Strike", null, "Class Feat", 8, "Advanced Defender", "childChoice", "Guardian Feat 8"]
        ])));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "Advanced Defender (Taunting Strike)");
        assert_eq!(entries[0].label, "Guardian 8");
    }

    #[test]
    fn test_parent_wins_over_sub_choice() {
        let entries = feat_entries(&feats(json!([
            ["Natural Ambition", "Chosen", "Ancestry Feat", 1, "Ancestry Feat 1", "standardChoice"],
            ["Reactive Shield", null, "Class Feat", 1, "Natural Ambition", "childChoice", "Ancestry Feat 1"]
        ])));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "Natural Ambition (Reactive Shield)");
        assert_eq!(entries[0].section, FeatSection::Ancestry);
    }

    #[test]
    fn test_sub_choice_in_parentheses() {
        let entries = feat_entries(&feats(json!([
            ["Assurance", "Athletics", "Skill Feat", 2, "Skill Feat 2", "standardChoice"]
        ])));
        assert_eq!(entries[0].value, "Assurance (Athletics)");
        assert_eq!(entries[0].label, "Skill 2");
    }

    #[test]
    fn test_classification_priority() {
        let entries = feat_entries(&feats(json!([
            ["Dedication", null, "Class Feat", 2, "Free Archetype 2", "standardChoice"],
            ["Paragon Pick", null, "Ancestry Feat", 1, "Ancestry Paragon 1", "standardChoice"],
            ["Toughness", null, "General Feat", 3, "General Feat 3", "standardChoice"],
            ["Adopted", null, "Heritage", 1, "Heritage", "standardChoice"],
            ["Shield Block", null, "Awarded Feat", 1, "Awarded Feat", "standardChoice"],
            ["Power Attack", null, "Class Feat", 1, "weird slot", "standardChoice"]
        ])));
        let sections: Vec<_> = entries.iter().map(|e| e.section).collect();
        assert_eq!(
            sections,
            vec![
                FeatSection::Archetype,
                FeatSection::AncestryParagon,
                FeatSection::General,
                FeatSection::Ancestry,
                FeatSection::Bonus,
                FeatSection::Class,
            ]
        );
        assert_eq!(entries[5].label, "Class 1");
        assert_eq!(entries[0].label, "Archetype 2");
    }

    #[test]
    fn test_class_label() {
        assert_eq!(class_label("Magus Feat 8"), "Magus");
        assert_eq!(class_label("Feat 8"), "Class");
        assert_eq!(class_label(""), "Class");
    }

    #[test]
    fn test_empty_sections_omitted() {
        let build = Build::from_value(json!({
            "feats": [["Assurance", "Athletics", "Skill Feat", 2, "Skill Feat 2", "standardChoice"]]
        }));
        let props = build_feats(&build);
        let titles: Vec<_> = props
            .iter()
            .filter(|p| p.kind == crate::property::PropertyKind::TitleSection)
            .filter_map(|p| p.value_str())
            .collect();
        assert_eq!(titles, vec!["Class & Ancestry Features", "Skill Feats"]);
        let none = props
            .iter()
            .find(|p| p.value_str() == Some("<ul><li>None</li></ul>"));
        assert!(none.is_some());
    }

    #[test]
    fn test_levels_ascending() {
        let build = Build::from_value(json!({
            "feats": [
                ["Late", null, "General Feat", 7, "General Feat 7", "standardChoice"],
                ["Early", null, "General Feat", 3, "General Feat 3", "standardChoice"]
            ]
        }));
        let props = build_feats(&build);
        let values: Vec<_> = props
            .iter()
            .filter(|p| p.kind == crate::property::PropertyKind::Text)
            .filter_map(|p| p.value_str())
            .collect();
        assert_eq!(values, vec!["Early", "Late"]);
    }
}

//! Actions tab: weapon attacks plus a reference library of the basic
//! encounter, exploration and downtime actions.

use crate::ids::Tab;
use crate::map::inventory::attacks;
use crate::property::PropertyNode;
use crate::writer::SheetWriter;
use pathbuilder::Build;
use std::fmt;

/// Action-economy cost of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    OneAction,
    TwoActions,
    ThreeActions,
    FreeAction,
    Reaction,
    Exploration,
    Downtime,
}

impl ActionType {
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::OneAction => "One-Action",
            ActionType::TwoActions => "Two-Actions",
            ActionType::ThreeActions => "Three-Actions",
            ActionType::FreeAction => "Free-Action",
            ActionType::Reaction => "Reaction",
            ActionType::Exploration => "Exploration",
            ActionType::Downtime => "Downtime",
        }
    }

    /// Display-name prefix. Exploration activities have none.
    pub fn prefix(&self) -> Option<String> {
        match self {
            ActionType::Exploration => None,
            other => Some(format!("[{}]", other.label())),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    pub name: &'static str,
    pub action_type: ActionType,
    pub description: &'static str,
}

impl ActionInfo {
    const fn new(name: &'static str, action_type: ActionType, description: &'static str) -> Self {
        Self {
            name,
            action_type,
            description,
        }
    }

    /// Name as shown on the sheet, e.g. `[One-Action] Stride`.
    pub fn display_name(&self) -> String {
        match self.action_type.prefix() {
            Some(prefix) => format!("{prefix} {}", self.name),
            None => self.name.to_string(),
        }
    }
}

use ActionType::*;

/// Basic actions usable in an encounter.
pub const ENCOUNTER_ACTIONS: &[ActionInfo] = &[
    ActionInfo::new("Avert Gaze", OneAction, "Look away from a threat. Until the start of your next turn you gain a +2 circumstance bonus to saves against visual effects that require you to look at their source."),
    ActionInfo::new("Crawl", OneAction, "Requirements: you are prone and your Speed is at least 5 feet. Move 5 feet while staying prone."),
    ActionInfo::new("Delay", FreeAction, "Trigger: your turn begins. Leave the initiative order and return later as a free action at the end of another creature's turn, taking that new position permanently. Start-of-turn effects happen when you Delay."),
    ActionInfo::new("Drop Prone", OneAction, "Fall prone."),
    ActionInfo::new("Escape", OneAction, "Try to get free of being grabbed, restrained or immobilized. Roll an unarmed attack, Acrobatics or Athletics against the effect's DC; success frees you."),
    ActionInfo::new("Interact", OneAction, "Use a hand to manipulate an object or the terrain: draw or stow an item, open a door, pick something up."),
    ActionInfo::new("Leap", OneAction, "Jump up to 10 feet horizontally (15 feet with a Speed of 30 feet or more) or 3 feet up and 5 feet across."),
    ActionInfo::new("Seek", OneAction, "Scan an area for creatures or objects with a Perception check, usually secret, against their Stealth DC."),
    ActionInfo::new("Sense Motive", OneAction, "Roll Perception against a creature's Deception DC to tell whether it is lying or under a mental effect."),
    ActionInfo::new("Stand", OneAction, "Stand up from prone."),
    ActionInfo::new("Step", OneAction, "Requirements: your Speed is at least 10 feet. Move 5 feet without triggering reactions that respond to movement."),
    ActionInfo::new("Stride", OneAction, "Move up to your Speed."),
    ActionInfo::new("Strike", OneAction, "Attack with a weapon or unarmed attack against a target in reach or range. Each further attack this turn takes the multiple attack penalty."),
    ActionInfo::new("Take Cover", OneAction, "Requirements: you benefit from cover, are near a feature that grants it, or are prone. Improve standard cover to greater cover, or gain standard cover from a feature or while prone."),
    ActionInfo::new("Ready", TwoActions, "Choose one action or free action and a trigger. Your turn ends; if the trigger happens before your next turn you may use the chosen action as a reaction."),
];

/// Reactions available to every character.
pub const REACTIONS: &[ActionInfo] = &[
    ActionInfo::new("Aid", Reaction, "Trigger: an ally is about to attempt a check you prepared to help with. Roll against DC 15: a success grants a +1 circumstance bonus, a critical success more, a critical failure a -1 penalty."),
];

/// Exploration activities.
pub const EXPLORATION_ACTIONS: &[ActionInfo] = &[
    ActionInfo::new("Avoid Notice", Exploration, "Travel at half speed using Stealth to stay hidden; you roll Stealth for initiative."),
    ActionInfo::new("Defend", Exploration, "Travel at half speed with your shield up, so you start combat with the shield raised."),
    ActionInfo::new("Detect Magic", Exploration, "Cast detect magic repeatedly while traveling at half speed or slower."),
    ActionInfo::new("Follow the Expert", Exploration, "Copy an expert ally's technique: add your level to a skill check for their chosen activity and gain a bonus depending on their proficiency."),
    ActionInfo::new("Hustle", Exploration, "Travel at double speed for up to your Constitution modifier times 10 minutes (at least 10)."),
    ActionInfo::new("Investigate", Exploration, "Travel at half speed making secret Recall Knowledge checks about your surroundings."),
    ActionInfo::new("Repeat a Spell", Exploration, "Cast the same cantrip again and again while moving at half speed, so its effect is up when trouble starts."),
    ActionInfo::new("Scout", Exploration, "Range ahead and behind the group at half speed. Allies gain a +1 circumstance bonus to initiative in the next encounter."),
    ActionInfo::new("Search", Exploration, "Move at half speed while Seeking for hidden doors, traps and other concealed things."),
];

/// Downtime activities.
pub const DOWNTIME_ACTIONS: &[ActionInfo] = &[
    ActionInfo::new("Earn Income", Downtime, "Spend downtime working a job with a trained skill. The GM sets the task level; your check result decides how much you earn each day."),
    ActionInfo::new("Retrain", Downtime, "Swap a feat, skill increase or class choice for another you could have taken. Takes a week or more of practice."),
];

/// Emit a filter list holding one saved message per action.
fn action_list(sheet: &mut SheetWriter, title: u64, rank: i64, actions: &[&ActionInfo]) {
    let list = sheet.filter_list(title, rank);
    for (i, action) in (0..).zip(actions) {
        sheet.message(list, action.display_name(), action.description, i);
    }
}

pub fn build_actions(build: &Build) -> Vec<PropertyNode> {
    let mut sheet = SheetWriter::new(Tab::Actions);
    let tab = sheet.tab_root();

    let encounter = sheet.title(tab, "Encounter Actions", -1, false);

    let attack_title = sheet.title(encounter, "Attacks", 0, true);
    let attack_list = sheet.filter_list(attack_title, -1);
    for (i, attack) in (0..).zip(attacks(build)) {
        sheet.message(attack_list, attack.full_name.clone(), attack.message(), i);
    }

    let actions = sheet.title(encounter, "Actions", 1, true);
    let basic: Vec<_> = ENCOUNTER_ACTIONS
        .iter()
        .filter(|a| a.action_type != ActionType::FreeAction)
        .collect();
    action_list(&mut sheet, actions, -1, &basic);

    let reactions = sheet.title(encounter, "Reactions", 2, true);
    let reaction_list: Vec<_> = REACTIONS.iter().collect();
    action_list(&mut sheet, reactions, 0, &reaction_list);

    let free = sheet.title(encounter, "Free Actions", 4, true);
    let free_list: Vec<_> = ENCOUNTER_ACTIONS
        .iter()
        .filter(|a| a.action_type == ActionType::FreeAction)
        .collect();
    action_list(&mut sheet, free, 0, &free_list);

    let exploration = sheet.title(tab, "Exploration Actions", 2, false);
    let exploration_list: Vec<_> = EXPLORATION_ACTIONS.iter().collect();
    action_list(&mut sheet, exploration, 0, &exploration_list);

    let downtime = sheet.title(tab, "Downtime Actions", 3, true);
    let downtime_list: Vec<_> = DOWNTIME_ACTIONS.iter().collect();
    action_list(&mut sheet, downtime, 0, &downtime_list);

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyKind;
    use serde_json::json;

    fn messages_under(props: &[PropertyNode], title: &str) -> Vec<String> {
        let title = props
            .iter()
            .find(|p| p.kind == PropertyKind::TitleSection && p.value_str() == Some(title))
            .unwrap();
        let list = props
            .iter()
            .find(|p| p.parent_id == Some(title.id) && p.kind == PropertyKind::FilterList)
            .unwrap();
        props
            .iter()
            .filter(|p| p.parent_id == Some(list.id))
            .filter_map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn test_display_prefix() {
        assert_eq!(ENCOUNTER_ACTIONS[11].display_name(), "[One-Action] Stride");
        assert_eq!(EXPLORATION_ACTIONS[0].display_name(), "Avoid Notice");
        assert_eq!(DOWNTIME_ACTIONS[0].display_name(), "[Downtime] Earn Income");
    }

    #[test]
    fn test_free_actions_routed_by_type() {
        let props = build_actions(&Build::default());
        let actions = messages_under(&props, "Actions");
        let free = messages_under(&props, "Free Actions");
        assert!(actions.iter().all(|n| !n.starts_with("[Free-Action]")));
        assert!(actions.contains(&"[Two-Actions] Ready".to_string()));
        assert_eq!(free, vec!["[Free-Action] Delay"]);
        assert_eq!(
            actions.len() + free.len(),
            ENCOUNTER_ACTIONS.len()
        );
    }

    #[test]
    fn test_weapon_attacks() {
        let build = Build::from_value(json!({
            "weapons": [
                {"name": "Dagger", "prof": "simple", "die": "d4"},
                {"name": "Longbow", "prof": "martial", "die": "d8", "pot": 2}
            ]
        }));
        let props = build_actions(&build);
        let attacks = messages_under(&props, "Attacks");
        assert_eq!(attacks, vec!["Dagger", "+2 Longbow"]);
        let bow = props
            .iter()
            .find(|p| p.name.as_deref() == Some("+2 Longbow"))
            .unwrap();
        assert!(bow
            .message
            .as_deref()
            .unwrap()
            .contains("martial_weapons+potency_rune_2"));
    }

    #[test]
    fn test_fist_when_unarmed() {
        let props = build_actions(&Build::default());
        assert_eq!(messages_under(&props, "Attacks"), vec!["Fist"]);
    }
}

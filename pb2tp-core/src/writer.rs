//! Node-emitting helpers shared by the section builders.
//!
//! A [`SheetWriter`] owns one tab's [`IdAllocator`] and the list of nodes
//! built so far. Every helper returns the new node's ID so callers can hang
//! children off it.

use crate::ids::{IdAllocator, Tab};
use crate::property::{PropertyKind, PropertyNode, MESSAGE_ICON};
use crate::proficiency::{formula_ref, pip_name, ProficiencyTiers};
use serde_json::json;

/// Value of the separator headings between stacked sections.
pub const SEPARATOR: &str = "===================";

/// A two-column horizontal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub id: u64,
    pub left: u64,
    pub right: u64,
}

impl Row {
    /// Column for the `index`th item when filling columns alternately.
    pub fn column(&self, index: usize) -> u64 {
        if index % 2 == 0 {
            self.left
        } else {
            self.right
        }
    }
}

/// A four-pip proficiency block to emit.
#[derive(Debug, Clone)]
pub struct SkillBlock {
    /// Display name; also the formula reference of the block's value.
    pub name: String,
    /// Prefix of the pip checkbox names.
    pub key: String,
    pub formula: String,
    pub value: i64,
    pub tiers: ProficiencyTiers,
    pub message: Option<String>,
}

/// Accumulates the nodes of one tab.
#[derive(Debug)]
pub struct SheetWriter {
    ids: IdAllocator,
    props: Vec<PropertyNode>,
}

impl SheetWriter {
    pub fn new(tab: Tab) -> Self {
        Self {
            ids: IdAllocator::new(tab),
            props: Vec::new(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.ids.tab()
    }

    /// Assign the next ID to `node` and append it.
    pub fn add(&mut self, mut node: PropertyNode) -> u64 {
        let id = self.ids.next_id();
        node.id = id;
        node.character_id = None;
        self.props.push(node);
        id
    }

    /// The tab root, labelled and ranked per [`Tab`].
    pub fn tab_root(&mut self) -> u64 {
        let tab = self.tab();
        self.add(
            PropertyNode::new(PropertyKind::TabSection)
                .with_value(tab.name())
                .with_rank(tab.rank())
                .with_data(json!({})),
        )
    }

    /// An even two-column row.
    pub fn row(&mut self, parent: u64, rank: i64) -> Row {
        self.row_sized(parent, rank, 50.0, 50.0)
    }

    pub fn row_sized(&mut self, parent: u64, rank: i64, left: f64, right: f64) -> Row {
        let id = self.add(
            PropertyNode::new(PropertyKind::HorizontalSection)
                .child_of(parent)
                .with_rank(rank),
        );
        let left = self.add(
            PropertyNode::new(PropertyKind::Section)
                .child_of(id)
                .with_size(left)
                .with_rank(0),
        );
        let right = self.add(
            PropertyNode::new(PropertyKind::Section)
                .child_of(id)
                .with_size(right)
                .with_rank(1),
        );
        Row { id, left, right }
    }

    /// A collapsible titled section.
    pub fn title(&mut self, parent: u64, title: impl Into<String>, rank: i64, collapsed: bool) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::TitleSection)
                .child_of(parent)
                .with_value(title.into())
                .with_rank(rank)
                .collapsed(collapsed),
        )
    }

    pub fn text(&mut self, parent: u64, name: impl Into<String>, value: impl Into<String>, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Text)
                .child_of(parent)
                .with_name(name)
                .with_value(value.into())
                .with_rank(rank),
        )
    }

    pub fn number(&mut self, parent: u64, name: impl Into<String>, value: i64, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Number)
                .child_of(parent)
                .with_name(name)
                .with_value(value)
                .with_rank(rank),
        )
    }

    /// A number whose value the renderer recomputes from `formula`.
    pub fn computed(
        &mut self,
        parent: u64,
        name: impl Into<String>,
        value: i64,
        formula: impl Into<String>,
        rank: i64,
    ) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Number)
                .child_of(parent)
                .with_name(name)
                .with_value(value)
                .with_formula(formula)
                .with_rank(rank),
        )
    }

    pub fn checkbox(&mut self, parent: u64, name: impl Into<String>, value: bool, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Checkbox)
                .child_of(parent)
                .with_name(name)
                .with_value(value)
                .with_rank(rank),
        )
    }

    /// A step tracker with its paired `<ref>-max` number.
    pub fn tracker(&mut self, parent: u64, name: &str, value: i64, max: i64, rank: i64) -> u64 {
        let id = self.add(
            PropertyNode::new(PropertyKind::Checkboxes)
                .child_of(parent)
                .with_name(name)
                .with_value(value)
                .with_rank(rank),
        );
        self.number(id, format!("{}-max", formula_ref(name)), max, 1);
        id
    }

    pub fn heading(&mut self, parent: u64, value: impl Into<String>, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Heading)
                .child_of(parent)
                .with_value(value.into())
                .with_rank(rank),
        )
    }

    pub fn separator(&mut self, parent: u64, rank: i64) -> u64 {
        self.heading(parent, SEPARATOR, rank)
    }

    /// An HTML paragraph.
    pub fn paragraph(&mut self, parent: u64, html: impl Into<String>, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Paragraph)
                .child_of(parent)
                .with_value(html.into())
                .with_rank(rank),
        )
    }

    /// A saved message with the standard icon.
    pub fn message(&mut self, parent: u64, name: impl Into<String>, message: impl Into<String>, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::Message)
                .child_of(parent)
                .with_name(name)
                .with_message(message)
                .with_icon(MESSAGE_ICON)
                .with_rank(rank),
        )
    }

    pub fn filter_list(&mut self, parent: u64, rank: i64) -> u64 {
        self.add(
            PropertyNode::new(PropertyKind::FilterList)
                .child_of(parent)
                .with_rank(rank),
        )
    }

    /// A `skill-4` block followed by its four pip checkboxes.
    pub fn skill(&mut self, parent: u64, block: SkillBlock, rank: i64) -> u64 {
        let mut node = PropertyNode::new(PropertyKind::Skill4)
            .child_of(parent)
            .with_name(block.name)
            .with_value(block.value)
            .with_formula(block.formula)
            .with_rank(rank)
            .with_data(json!({ "subtitle": "" }));
        if let Some(message) = block.message {
            node = node.with_message(message);
        }
        let id = self.add(node);
        for (pip, (tier, checked)) in (1..).zip(block.tiers.pips()) {
            self.checkbox(id, pip_name(&block.key, tier), checked, pip);
        }
        id
    }

    /// Number of nodes emitted so far.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn finish(self) -> Vec<PropertyNode> {
        tracing::debug!(tab = %self.ids.tab(), nodes = self.props.len(), "built tab");
        self.props
    }
}

/// Escape text for inclusion in a paragraph's HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render items as an HTML bullet list, or `placeholder` as the only item when empty.
pub fn bullet_list<S: AsRef<str>>(items: &[S], placeholder: &str) -> String {
    let items: String = if items.is_empty() {
        format!("<li>{}</li>", escape_html(placeholder))
    } else {
        items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item.as_ref())))
            .collect()
    };
    format!("<ul>{items}</ul>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_tab_range() {
        let mut sheet = SheetWriter::new(Tab::Background);
        let root = sheet.tab_root();
        let row = sheet.row(root, 0);
        assert_eq!(root, 90_000_001);
        assert_eq!(row.id, 90_000_002);
        assert_eq!(row.right, 90_000_004);
        let props = sheet.finish();
        assert_eq!(props.len(), 4);
        assert_eq!(props[0].value_str(), Some("Background"));
        assert_eq!(props[0].rank, 0);
        assert_eq!(props[2].size, Some(50.0));
    }

    #[test]
    fn test_tracker_has_max_child() {
        let mut sheet = SheetWriter::new(Tab::Character);
        let root = sheet.tab_root();
        let tracker = sheet.tracker(root, "Hero Points", 1, 3, 0);
        let props = sheet.finish();
        let max = props.last().unwrap();
        assert_eq!(max.parent_id, Some(tracker));
        assert_eq!(max.name.as_deref(), Some("hero_points-max"));
        assert_eq!(max.value_int(), Some(3));
        assert_eq!(max.rank, 1);
    }

    #[test]
    fn test_skill_block_pips() {
        let mut sheet = SheetWriter::new(Tab::Character);
        let root = sheet.tab_root();
        let block = SkillBlock {
            name: "Athletics".to_string(),
            key: "athletics".to_string(),
            formula: "strength".to_string(),
            value: 7,
            tiers: ProficiencyTiers::from_rank(4),
            message: None,
        };
        let id = sheet.skill(root, block, 3);
        let props = sheet.finish();
        let pips: Vec<_> = props.iter().filter(|p| p.parent_id == Some(id)).collect();
        assert_eq!(pips.len(), 4);
        assert_eq!(pips[0].name.as_deref(), Some("athletics-trained"));
        assert_eq!(pips[1].value_bool(), Some(true));
        assert_eq!(pips[2].value_bool(), Some(false));
        assert_eq!(pips[3].name.as_deref(), Some("athletics-legendary"));
        assert_eq!(pips[3].rank, 4);
    }

    #[test]
    fn test_row_column_alternates() {
        let row = Row { id: 1, left: 2, right: 3 };
        assert_eq!(row.column(0), 2);
        assert_eq!(row.column(1), 3);
        assert_eq!(row.column(4), 2);
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list::<&str>(&[], "Empty"), "<ul><li>Empty</li></ul>");
        assert_eq!(
            bullet_list(&["Rope", "Salt & Pepper"], "Empty"),
            "<ul><li>Rope</li><li>Salt &amp; Pepper</li></ul>"
        );
    }
}

//! Tableplop character document model.
//!
//! A Tableplop character is a flat list of properties linked into a tree by
//! `parentId`. Containers (tabs, rows, columns, titled sections) hold widgets
//! (numbers, checkboxes, messages, ...) and siblings are ordered by `rank`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// Document type tag understood by the renderer.
pub const DOCUMENT_TYPE: &str = "tableplop-character-v2";

/// Icon attached to saved messages.
pub const MESSAGE_ICON: &str = "/images/message.png";

/// The kind of a property node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    /// Root container shown on the tab strip.
    TabSection,
    /// Row of `Section` columns.
    HorizontalSection,
    /// Column inside a horizontal section.
    Section,
    /// Collapsible titled section.
    TitleSection,
    Text,
    Number,
    Checkbox,
    /// Step tracker; paired with a `<name>-max` number child.
    Checkboxes,
    Ability,
    Health,
    /// Four-pip proficiency block.
    #[serde(rename = "skill-4")]
    Skill4,
    Paragraph,
    Appearance,
    /// Saved dice-roll or chat message.
    Message,
    FilterList,
    Heading,
}

/// Payload of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

/// One node of the property tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyNode {
    pub id: u64,
    #[serde(rename = "parentId")]
    pub parent_id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Widget options such as `{"collapsed": true}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
    #[serde(default)]
    pub rank: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(rename = "characterId", default)]
    pub character_id: Option<u64>,
    /// Fields this model does not know about, kept so foreign documents survive a rewrite.
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl PropertyNode {
    /// Create an unattached node. The ID is assigned when it is added to a sheet.
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            id: 0,
            parent_id: None,
            kind,
            data: None,
            name: None,
            value: None,
            rank: 0,
            size: None,
            formula: None,
            message: None,
            icon: None,
            private: None,
            character_id: None,
            extra: Map::new(),
        }
    }

    pub fn child_of(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the collapsed state of a titled section.
    pub fn collapsed(self, collapsed: bool) -> Self {
        self.with_data(json!({ "collapsed": collapsed }))
    }

    /// Hide the node from other players.
    pub fn private(mut self) -> Self {
        self.private = Some(true);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn value_int(&self) -> Option<i64> {
        self.value.as_ref().and_then(PropertyValue::as_int)
    }

    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(PropertyValue::as_str)
    }

    pub fn value_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(PropertyValue::as_bool)
    }
}

/// A structural problem in a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityIssue {
    #[error("property id {0} appears more than once")]
    DuplicateId(u64),

    #[error("property {id} points at missing parent {parent_id}")]
    DanglingParent { id: u64, parent_id: u64 },
}

/// A complete Tableplop character document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub document_type: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub properties: Vec<PropertyNode>,
}

impl Document {
    /// Wrap properties in a public character envelope.
    pub fn new(properties: Vec<PropertyNode>) -> Self {
        Self {
            document_type: DOCUMENT_TYPE.to_string(),
            private: false,
            properties,
        }
    }

    pub fn get(&self, id: u64) -> Option<&PropertyNode> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// First property with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&PropertyNode> {
        self.properties
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }

    /// First property with the given kind and text value (titles, tabs, headings).
    pub fn find_by_value(&self, kind: PropertyKind, value: &str) -> Option<&PropertyNode> {
        self.properties
            .iter()
            .find(|p| p.kind == kind && p.value_str() == Some(value))
    }

    /// Children of `id` in insertion order.
    pub fn children_of(&self, id: u64) -> impl Iterator<Item = &PropertyNode> {
        self.properties
            .iter()
            .filter(move |p| p.parent_id == Some(id))
    }

    /// Every property below `id`, depth first.
    pub fn descendants_of(&self, id: u64) -> Vec<&PropertyNode> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for child in self.children_of(current) {
                out.push(child);
                stack.push(child.id);
            }
        }
        out
    }

    /// Root tab sections.
    pub fn tabs(&self) -> impl Iterator<Item = &PropertyNode> {
        self.properties
            .iter()
            .filter(|p| p.is_root() && p.kind == PropertyKind::TabSection)
    }

    /// Duplicate IDs and dangling parent references, in document order.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.id) {
                issues.push(IntegrityIssue::DuplicateId(property.id));
            }
        }
        for property in &self.properties {
            if let Some(parent_id) = property.parent_id {
                if !seen.contains(&parent_id) {
                    issues.push(IntegrityIssue::DanglingParent {
                        id: property.id,
                        parent_id,
                    });
                }
            }
        }
        issues
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serializes_renderer_keys() {
        let node = PropertyNode::new(PropertyKind::Skill4)
            .child_of(7)
            .with_name("Athletics")
            .with_value(5i64)
            .with_rank(2)
            .with_formula("strength + 2");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "skill-4");
        assert_eq!(json["parentId"], 7);
        assert_eq!(json["characterId"], Value::Null);
        assert_eq!(json["value"], 5);
        assert!(json.get("size").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(
            serde_json::to_value(PropertyKind::HorizontalSection).unwrap(),
            "horizontal-section"
        );
        assert_eq!(serde_json::to_value(PropertyKind::FilterList).unwrap(), "filter-list");
        assert_eq!(serde_json::to_value(PropertyKind::TabSection).unwrap(), "tab-section");
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "id": 1, "parentId": null, "type": "text", "rank": 3,
            "characterId": null, "locked": true
        });
        let node: PropertyNode = serde_json::from_value(raw).unwrap();
        assert_eq!(node.extra.get("locked"), Some(&json!(true)));
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["locked"], true);
    }

    #[test]
    fn test_integrity_issues() {
        let mut a = PropertyNode::new(PropertyKind::TabSection);
        a.id = 1;
        let mut b = PropertyNode::new(PropertyKind::Text).child_of(1);
        b.id = 2;
        let mut c = PropertyNode::new(PropertyKind::Text).child_of(99);
        c.id = 2;
        let doc = Document::new(vec![a, b, c]);
        assert_eq!(
            doc.integrity_issues(),
            vec![
                IntegrityIssue::DuplicateId(2),
                IntegrityIssue::DanglingParent { id: 2, parent_id: 99 },
            ]
        );
    }

    #[test]
    fn test_document_envelope() {
        let doc = Document::new(Vec::new());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], DOCUMENT_TYPE);
        assert_eq!(json["private"], false);
        assert!(json["properties"].as_array().unwrap().is_empty());
    }
}

//! Renumbering the IDs of an existing document.
//!
//! Each known tab's subtree is walked depth first with siblings in
//! `(rank, id)` order and renumbered from the tab's base, so hand-edited or
//! foreign exports end up with the same ID layout a fresh conversion has.

use crate::ids::{IdAllocator, Tab};
use crate::property::{Document, PropertyKind, PropertyNode};
use std::collections::HashMap;

/// Summary of a renumbering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberStats {
    /// Nodes reached from a known tab and given new IDs.
    pub renumbered: usize,
    /// Nodes left with their original IDs.
    pub untouched: usize,
}

/// Renumber `doc` in place.
pub fn renumber(doc: &mut Document) -> RenumberStats {
    let props = std::mem::take(&mut doc.properties);

    let mut index_of: HashMap<u64, usize> = HashMap::new();
    for (i, p) in props.iter().enumerate() {
        index_of.entry(p.id).or_insert(i);
    }

    let mut children: HashMap<u64, Vec<usize>> = HashMap::new();
    for (i, p) in props.iter().enumerate() {
        if let Some(parent) = p.parent_id {
            children.entry(parent).or_default().push(i);
        }
    }
    for list in children.values_mut() {
        list.sort_by_key(|&i| (props[i].rank, props[i].id));
    }

    let mut new_ids: Vec<Option<u64>> = vec![None; props.len()];
    let mut order: Vec<usize> = Vec::with_capacity(props.len());

    for tab in Tab::all() {
        let Some(root) = props.iter().position(|p| {
            p.is_root() && p.kind == PropertyKind::TabSection && p.value_str() == Some(tab.name())
        }) else {
            continue;
        };
        if new_ids[root].is_some() {
            continue;
        }

        let mut ids = IdAllocator::new(tab);
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            if new_ids[i].is_some() {
                continue;
            }
            new_ids[i] = Some(ids.next_id());
            order.push(i);
            if let Some(kids) = children.get(&props[i].id) {
                stack.extend(kids.iter().rev().copied());
            }
        }
        tracing::debug!(tab = %tab, "renumbered tab");
    }

    let renumbered = order.len();
    order.extend((0..props.len()).filter(|&i| new_ids[i].is_none()));

    let remap = |old: u64| -> u64 {
        index_of
            .get(&old)
            .and_then(|&i| new_ids[i])
            .unwrap_or(old)
    };

    let mut slots: Vec<Option<PropertyNode>> = props.into_iter().map(Some).collect();
    doc.properties = order
        .iter()
        .filter_map(|&i| {
            let mut node = slots[i].take()?;
            node.id = new_ids[i].unwrap_or(node.id);
            node.parent_id = node.parent_id.map(remap);
            node.character_id = None;
            Some(node)
        })
        .collect();

    let stats = RenumberStats {
        renumbered,
        untouched: doc.properties.len() - renumbered,
    };
    tracing::info!(renumbered = stats.renumbered, untouched = stats.untouched, "renumbered document");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, parent: Option<u64>, kind: PropertyKind, rank: i64) -> PropertyNode {
        let mut node = PropertyNode::new(kind).with_rank(rank);
        node.id = id;
        node.parent_id = parent;
        node.character_id = Some(42);
        node
    }

    #[test]
    fn test_siblings_ordered_by_rank() {
        let mut doc = Document::new(vec![
            node(7, None, PropertyKind::TabSection, 0).with_value("Feats"),
            node(3, Some(7), PropertyKind::Text, 5).with_name("late"),
            node(9, Some(7), PropertyKind::Text, -1).with_name("early"),
            node(1, Some(3), PropertyKind::Text, 0).with_name("child"),
        ]);
        let stats = renumber(&mut doc);
        assert_eq!(stats, RenumberStats { renumbered: 4, untouched: 0 });

        let names: Vec<_> = doc.properties.iter().map(|p| p.name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("early"), Some("late"), Some("child")]);
        let ids: Vec<_> = doc.properties.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![55_000_001, 55_000_002, 55_000_003, 55_000_004]);
        assert_eq!(doc.properties[3].parent_id, Some(55_000_003));
        assert!(doc.properties.iter().all(|p| p.character_id.is_none()));
    }

    #[test]
    fn test_unknown_tab_kept_and_appended() {
        let mut doc = Document::new(vec![
            node(500, None, PropertyKind::TabSection, 0).with_value("Notes"),
            node(501, Some(500), PropertyKind::Text, 0),
            node(1, None, PropertyKind::TabSection, 0).with_value("Spells"),
        ]);
        let stats = renumber(&mut doc);
        assert_eq!(stats, RenumberStats { renumbered: 1, untouched: 2 });
        let ids: Vec<_> = doc.properties.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![70_000_001, 500, 501]);
        assert_eq!(doc.properties[2].parent_id, Some(500));
    }
}

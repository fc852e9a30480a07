//! Per-tab property ID allocation.
//!
//! Every tab owns a disjoint numeric range so that builders can run
//! independently and still never emit colliding IDs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the last tab's range.
const ID_CEILING: u64 = 100_000_000;

/// The tabs of a Tableplop character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tab {
    Character,
    Actions,
    Inventory,
    Feats,
    Spells,
    Background,
}

impl Tab {
    /// IDs of this tab start one step above this value.
    pub fn base(&self) -> u64 {
        match self {
            Tab::Character => 10_000_000,
            Tab::Actions => 20_000_000,
            Tab::Inventory => 35_000_000,
            Tab::Feats => 55_000_000,
            Tab::Spells => 70_000_000,
            Tab::Background => 90_000_000,
        }
    }

    /// First ID past this tab's range.
    pub fn limit(&self) -> u64 {
        Tab::all()
            .into_iter()
            .map(|t| t.base())
            .filter(|b| *b > self.base())
            .min()
            .unwrap_or(ID_CEILING)
    }

    /// Label shown on the tab strip.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Character => "Character",
            Tab::Actions => "Actions",
            Tab::Inventory => "Inventory",
            Tab::Feats => "Feats",
            Tab::Spells => "Spells",
            Tab::Background => "Background",
        }
    }

    /// Rank of the tab root; orders the tab strip left to right.
    pub fn rank(&self) -> i64 {
        match self {
            Tab::Character => -5,
            Tab::Actions => -4,
            Tab::Inventory => -3,
            Tab::Feats => -2,
            Tab::Spells => -1,
            Tab::Background => 0,
        }
    }

    pub fn from_name(name: &str) -> Option<Tab> {
        Tab::all().into_iter().find(|t| t.name() == name)
    }

    pub fn all() -> [Tab; 6] {
        [
            Tab::Character,
            Tab::Actions,
            Tab::Inventory,
            Tab::Feats,
            Tab::Spells,
            Tab::Background,
        ]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Issues increasing IDs from one tab's range.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    tab: Tab,
    next: u64,
    step: u64,
}

impl IdAllocator {
    pub fn new(tab: Tab) -> Self {
        Self::with_step(tab, 1)
    }

    pub fn with_step(tab: Tab, step: u64) -> Self {
        Self {
            tab,
            next: tab.base(),
            step: step.max(1),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Return the next ID in the tab's range.
    pub fn next_id(&mut self) -> u64 {
        self.next += self.step;
        // Running past the range means the tab bases are misconfigured.
        debug_assert!(
            self.next < self.tab.limit(),
            "{} tab exhausted its ID range",
            self.tab
        );
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_starts_above_base() {
        let mut ids = IdAllocator::new(Tab::Feats);
        assert_eq!(ids.next_id(), 55_000_001);
        assert_eq!(ids.next_id(), 55_000_002);
    }

    #[test]
    fn test_allocator_step() {
        let mut ids = IdAllocator::with_step(Tab::Spells, 10);
        assert_eq!(ids.next_id(), 70_000_010);
        assert_eq!(ids.next_id(), 70_000_020);
    }

    #[test]
    fn test_ranges_are_disjoint_and_wide() {
        let mut tabs = Tab::all().to_vec();
        tabs.sort_by_key(|t| t.base());
        for pair in tabs.windows(2) {
            assert!(pair[1].base() - pair[0].base() >= 10_000_000);
            assert_eq!(pair[0].limit(), pair[1].base());
        }
        assert_eq!(Tab::Background.limit(), ID_CEILING);
    }

    #[test]
    fn test_tab_names_round_trip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_name(tab.name()), Some(tab));
        }
        assert_eq!(Tab::from_name("Notes"), None);
    }

    #[test]
    fn test_independent_allocators() {
        let mut a = IdAllocator::new(Tab::Character);
        let mut b = IdAllocator::new(Tab::Character);
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), 10_000_001);
        assert_eq!(a.tab(), Tab::Character);
    }
}

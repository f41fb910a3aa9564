//! Which parent items are shown expanded.
//!
//! Two input channels feed the set: a location change recomputes it from
//! scratch, and the user toggles single entries in between.

use std::collections::HashSet;

use crate::route::Location;
use crate::tree::NavItem;

/// True iff a direct child of `item` is the active route. Grandchildren are not inspected.
pub fn has_active_child(item: &NavItem, location: &Location) -> bool {
    item.children()
        .iter()
        .any(|child| location.matches(child.href.as_deref()))
}

/// Set of expanded parent titles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: titles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.expanded.contains(title)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Replace the whole set with the top-level items whose direct child is active.
    /// Manual expansions are discarded.
    pub fn recompute(&mut self, items: &[NavItem], location: &Location) {
        self.expanded = items
            .iter()
            .filter(|item| has_active_child(item, location))
            .map(|item| item.title.clone())
            .collect();
        log::debug!("Expansion: recomputed for {} -> {:?}", location, self.expanded);
    }

    /// Flip membership of `title`. Returns the new membership.
    pub fn toggle(&mut self, title: &str) -> bool {
        if self.expanded.remove(title) {
            false
        } else {
            self.expanded.insert(title.to_string());
            true
        }
    }

    pub fn expand(&mut self, title: &str) {
        self.expanded.insert(title.to_string());
    }

    pub fn collapse(&mut self, title: &str) {
        self.expanded.remove(title);
    }

    /// Sorted titles, for stable serialization
    pub fn titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.expanded.iter().cloned().collect();
        titles.sort();
        titles
    }
}

/// Outcome of clicking a parent row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentClick {
    /// Where to navigate before the group toggles, if anywhere
    pub navigate_to: Option<String>,
    pub expanded: bool,
}

/// Clicking a parent row navigates to its first usable child and toggles the group.
pub fn click_parent(state: &mut ExpansionState, item: &NavItem) -> ParentClick {
    let navigate_to = item.first_child_href().map(str::to_string);
    let expanded = state.toggle(&item.title);
    ParentClick {
        navigate_to,
        expanded,
    }
}

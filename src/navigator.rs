//! Sidebar navigator state machine
//!
//! `NavigatorState` owns everything the sidebar needs between frames: the
//! tree, the current location, the expansion set, the display mode, the
//! open flyout, a keyboard cursor and the search filter. Events go in,
//! [`NavAction`]s come out; the host performs the actions (route changes,
//! closing the mobile drawer) and reports the new location back.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{NavError, Result};
use crate::expansion::{click_parent, ExpansionState};
use crate::providers::{IconSet, LocationProvider, Translations};
use crate::render::{render_tree, resolve_title, FlyoutEntry, NodeKind, RenderContext, RenderedNode};
use crate::route::Location;
use crate::tree::{NavItem, NavTree};

/// Events that can be sent to the navigator
#[derive(Debug, Clone, PartialEq)]
pub enum NavigatorEvent {
    LocationChanged(Location),
    ToggleExpanded(String),
    /// Click on the row with the given ancestor path
    ClickItem(Vec<String>),
    OpenFlyout(String),
    CloseFlyout,
    SelectFlyoutEntry(usize),
    SetMinimized(bool),
    SetAboveBreakpoint(bool),
    NavigateUp,
    NavigateDown,
    ActivateSelected,
    ToggleSelected,
    StartSearch,
    UpdateSearchQuery(String),
    EndSearch,
    EndSearchKeepQuery,
}

/// Side effects requested from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Navigate(String),
    CloseMobileNav,
}

/// Result of handling one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOutcome {
    pub changed: bool,
    pub actions: Vec<NavAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Link,
    Inert,
    Group { expanded: bool },
    Flyout,
}

/// A visible row in the sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub path: Vec<String>,
    pub key: String,
    pub title: String,
    pub icon: String,
    pub depth: usize,
    pub active: bool,
    pub disabled: bool,
    pub badge: Option<String>,
    pub target: Option<String>,
    pub kind: RowKind,
    pub is_selected: bool,
}

/// Open flyout menu
#[derive(Debug, Clone, PartialEq)]
pub struct FlyoutView {
    pub parent: String,
    pub title: String,
    pub entries: Vec<FlyoutEntry>,
    pub cursor: usize,
}

/// View model for rendering the navigator
#[derive(Debug, Clone)]
pub struct NavigatorViewModel {
    pub rows: Vec<VisibleRow>,
    pub cursor_position: usize,
    pub search_query: String,
    pub is_searching: bool,
    pub flyout: Option<FlyoutView>,
    pub location: String,
    pub minimized: bool,
}

/// Saved pieces of a navigator, used to restore from a snapshot
#[derive(Debug, Clone, Default)]
pub struct NavigatorParts {
    pub tree: NavTree,
    pub translations: Translations,
    pub location: Location,
    pub expanded: Vec<String>,
    pub minimized: bool,
    pub above_breakpoint: bool,
    pub open_flyout: Option<String>,
    pub selection: Option<Vec<String>>,
    pub query: String,
    pub editing_search: bool,
}

#[derive(Debug)]
pub struct NavigatorState {
    tree: NavTree,
    translations: Translations,
    icons: IconSet,
    location: Location,
    expansion: ExpansionState,
    minimized: bool,
    above_breakpoint: bool,
    open_flyout: Option<String>,
    flyout_cursor: usize,
    selection: Option<Vec<String>>,
    query: String,
    editing_search: bool,

    cached_view_model: Option<NavigatorViewModel>,
    view_model_dirty: bool,
}

impl NavigatorState {
    /// Create a navigator positioned at `location`, with the active branch expanded
    pub fn new(tree: NavTree, location: Location) -> Self {
        let mut expansion = ExpansionState::new();
        expansion.recompute(&tree.items, &location);
        Self {
            tree,
            translations: Translations::default(),
            icons: IconSet::new(),
            location,
            expansion,
            minimized: false,
            above_breakpoint: true,
            open_flyout: None,
            flyout_cursor: 0,
            selection: None,
            query: String::new(),
            editing_search: false,
            cached_view_model: None,
            view_model_dirty: true,
        }
    }

    /// Rebuild a navigator from saved parts without recomputing expansion
    pub fn restore(parts: NavigatorParts) -> Self {
        let mut navigator = Self::new(parts.tree, parts.location);
        navigator.translations = parts.translations;
        navigator.expansion = ExpansionState::from_titles(parts.expanded);
        navigator.minimized = parts.minimized;
        navigator.above_breakpoint = parts.above_breakpoint;
        navigator.open_flyout = parts.open_flyout;
        navigator.selection = parts.selection;
        navigator.query = parts.query;
        navigator.editing_search = parts.editing_search;
        navigator
    }

    pub fn to_parts(&self) -> NavigatorParts {
        NavigatorParts {
            tree: self.tree.clone(),
            translations: self.translations.clone(),
            location: self.location.clone(),
            expanded: self.expansion.titles(),
            minimized: self.minimized,
            above_breakpoint: self.above_breakpoint,
            open_flyout: self.open_flyout.clone(),
            selection: self.selection.clone(),
            query: self.query.clone(),
            editing_search: self.editing_search,
        }
    }

    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self.invalidate_view_model();
        self
    }

    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self.invalidate_view_model();
        self
    }

    /// Handle an event and report whether the state changed and what the host should do
    pub fn handle_event(&mut self, event: NavigatorEvent) -> Result<NavOutcome> {
        let state_before = self.compute_state_hash();
        let mut actions = Vec::new();

        match event {
            NavigatorEvent::LocationChanged(location) => {
                if location != self.location {
                    log::debug!("Navigator: location {} -> {}", self.location, location);
                    self.location = location;
                    self.expansion.recompute(&self.tree.items, &self.location);
                    self.open_flyout = None;
                }
            }

            NavigatorEvent::ToggleExpanded(title) => {
                self.expansion.toggle(&title);
            }

            NavigatorEvent::ClickItem(path) => {
                actions = self.click(&path)?;
            }

            NavigatorEvent::OpenFlyout(title) => {
                let is_flyout = self
                    .render()
                    .iter()
                    .any(|node| node.key == title && matches!(node.kind, NodeKind::Flyout { .. }));
                if is_flyout {
                    self.open_flyout = Some(title);
                    self.flyout_cursor = 0;
                }
            }

            NavigatorEvent::CloseFlyout => {
                self.open_flyout = None;
            }

            NavigatorEvent::SelectFlyoutEntry(index) => {
                actions = self.select_flyout_entry(index);
            }

            NavigatorEvent::SetMinimized(minimized) => {
                if self.minimized != minimized {
                    self.minimized = minimized;
                    self.open_flyout = None;
                }
            }

            NavigatorEvent::SetAboveBreakpoint(above) => {
                if self.above_breakpoint != above {
                    self.above_breakpoint = above;
                    self.open_flyout = None;
                }
            }

            NavigatorEvent::NavigateUp => {
                if let Some(flyout) = self.flyout_view() {
                    self.flyout_cursor = self.flyout_cursor.saturating_sub(1).min(flyout.entries.len().saturating_sub(1));
                } else {
                    let rows = self.get_current_visible_rows();
                    self.selection = self.find_previous_row(&rows);
                }
            }

            NavigatorEvent::NavigateDown => {
                if let Some(flyout) = self.flyout_view() {
                    if self.flyout_cursor + 1 < flyout.entries.len() {
                        self.flyout_cursor += 1;
                    }
                } else {
                    let rows = self.get_current_visible_rows();
                    self.selection = self.find_next_row(&rows);
                }
            }

            NavigatorEvent::ActivateSelected => {
                if self.open_flyout.is_some() {
                    actions = self.select_flyout_entry(self.flyout_cursor);
                } else if let Some(path) = self.selection.clone() {
                    actions = self.click(&path)?;
                }
            }

            // Filtered rows are always expanded, so there is nothing to toggle
            NavigatorEvent::ToggleSelected if self.is_filtering() => {}

            NavigatorEvent::ToggleSelected => {
                let rows = self.get_current_visible_rows();
                let selected = rows.iter().find(|row| row.is_selected);
                match selected.map(|row| (row.kind, row.key.clone())) {
                    Some((RowKind::Group { .. }, key)) => {
                        self.expansion.toggle(&key);
                    }
                    Some((RowKind::Flyout, key)) => {
                        self.open_flyout = Some(key);
                        self.flyout_cursor = 0;
                    }
                    _ => {}
                }
            }

            NavigatorEvent::StartSearch => {
                self.editing_search = true;
                self.open_flyout = None;
                if self.selection.is_none() {
                    self.ensure_valid_selection();
                }
            }

            NavigatorEvent::UpdateSearchQuery(new_query) => {
                if self.editing_search {
                    self.query = new_query;
                    self.ensure_valid_selection();
                }
            }

            NavigatorEvent::EndSearch => {
                self.editing_search = false;
                self.query.clear();
            }

            NavigatorEvent::EndSearchKeepQuery => {
                self.editing_search = false;
            }
        }

        let state_after = self.compute_state_hash();
        let changed = state_before != state_after || !actions.is_empty();
        if changed {
            self.invalidate_view_model();
        }

        Ok(NavOutcome { changed, actions })
    }

    /// Pull the location from the host and react if it moved
    pub fn sync_location(&mut self, provider: &dyn LocationProvider) -> Result<bool> {
        let outcome = self.handle_event(NavigatorEvent::LocationChanged(provider.current_location()))?;
        Ok(outcome.changed)
    }

    fn click(&mut self, path: &[String]) -> Result<Vec<NavAction>> {
        let item = self
            .tree
            .find_by_path(path)
            .cloned()
            .ok_or_else(|| NavError::Generic(format!("No navigation item at '{}'", path.join(" / "))))?;

        self.selection = Some(path.to_vec());

        if item.is_parent() {
            if item.is_disabled() {
                return Ok(disabled_click(&item));
            }
            if self.is_filtering() {
                let target = item.first_child_href().map(|href| NavAction::Navigate(href.to_string()));
                return Ok(target.into_iter().collect());
            }
            if self.uses_flyouts() && path.len() == 1 {
                self.open_flyout = Some(item.title.clone());
                self.flyout_cursor = 0;
                return Ok(Vec::new());
            }
            let click = click_parent(&mut self.expansion, &item);
            log::debug!("Navigator: parent '{}' clicked, expanded={}", item.title, click.expanded);
            return Ok(click.navigate_to.map(NavAction::Navigate).into_iter().collect());
        }

        match item.usable_href() {
            Some(_) if item.is_disabled() => {
                Ok(vec![NavAction::Navigate(crate::render::SAFE_TARGET.to_string()), NavAction::CloseMobileNav])
            }
            Some(href) => Ok(vec![NavAction::Navigate(href.to_string()), NavAction::CloseMobileNav]),
            None => Ok(Vec::new()),
        }
    }

    fn select_flyout_entry(&mut self, index: usize) -> Vec<NavAction> {
        let entry = self
            .flyout_view()
            .and_then(|flyout| flyout.entries.get(index).cloned());
        self.open_flyout = None;
        self.flyout_cursor = 0;
        match entry.and_then(|entry| entry.target) {
            Some(target) => vec![NavAction::Navigate(target)],
            None => Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_above_breakpoint(&self) -> bool {
        self.above_breakpoint
    }

    pub fn open_flyout(&self) -> Option<&str> {
        self.open_flyout.as_deref()
    }

    /// Get the current selection
    pub fn get_selection(&self) -> Option<Vec<String>> {
        self.selection.clone()
    }

    /// Check if currently editing search
    pub fn is_searching(&self) -> bool {
        self.editing_search
    }

    /// Get current search query
    pub fn get_search_query(&self) -> String {
        self.query.clone()
    }

    fn is_filtering(&self) -> bool {
        !self.query.is_empty()
    }

    fn uses_flyouts(&self) -> bool {
        self.minimized && self.above_breakpoint
    }

    /// Render the tree for the current state.
    ///
    /// While a search filter is active the matching branches are shown fully
    /// expanded and inline, regardless of the expansion set.
    pub fn render(&self) -> Vec<RenderedNode> {
        if self.is_filtering() {
            let filtered = filter_tree(&self.tree.items, &self.query, &self.translations);
            let expansion = ExpansionState::from_titles(NavTree::new(filtered.clone()).parent_titles());
            let ctx = RenderContext {
                expansion: &expansion,
                minimized: false,
                above_breakpoint: self.above_breakpoint,
                location: &self.location,
                translator: &self.translations,
                icons: &self.icons,
            };
            render_tree(&filtered, &ctx)
        } else {
            let ctx = RenderContext {
                expansion: &self.expansion,
                minimized: self.minimized,
                above_breakpoint: self.above_breakpoint,
                location: &self.location,
                translator: &self.translations,
                icons: &self.icons,
            };
            render_tree(&self.tree.items, &ctx)
        }
    }

    /// Build view model for rendering (with caching)
    pub fn build_view_model(&mut self) -> &NavigatorViewModel {
        if self.view_model_dirty {
            self.cached_view_model = None;
        }
        let view_model = match self.cached_view_model.take() {
            Some(cached) => {
                log::debug!("View model: using cached (no state change)");
                cached
            }
            None => {
                log::debug!("View model: rebuilding due to state change");
                self.rebuild_view_model()
            }
        };
        self.view_model_dirty = false;
        self.cached_view_model.insert(view_model)
    }

    fn rebuild_view_model(&self) -> NavigatorViewModel {
        let rows = self.get_current_visible_rows();
        let cursor_position = rows.iter().position(|row| row.is_selected).unwrap_or(0);
        NavigatorViewModel {
            rows,
            cursor_position,
            search_query: self.query.clone(),
            is_searching: self.editing_search,
            flyout: self.flyout_view(),
            location: self.location.to_string(),
            minimized: self.minimized,
        }
    }

    /// Mark view model as needing rebuild
    pub fn invalidate_view_model(&mut self) {
        self.view_model_dirty = true;
    }

    fn compute_state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.location.hash(&mut hasher);
        self.expansion.titles().hash(&mut hasher);
        self.minimized.hash(&mut hasher);
        self.above_breakpoint.hash(&mut hasher);
        self.open_flyout.hash(&mut hasher);
        self.flyout_cursor.hash(&mut hasher);
        self.selection.hash(&mut hasher);
        self.query.hash(&mut hasher);
        self.editing_search.hash(&mut hasher);
        hasher.finish()
    }

    fn flyout_view(&self) -> Option<FlyoutView> {
        let parent = self.open_flyout.as_ref()?;
        self.render().into_iter().find_map(|node| match node.kind {
            NodeKind::Flyout { entries } if &node.key == parent => Some(FlyoutView {
                parent: node.key,
                title: node.title,
                cursor: self.flyout_cursor.min(entries.len().saturating_sub(1)),
                entries,
            }),
            _ => None,
        })
    }

    /// Get the currently visible rows based on current state
    fn get_current_visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for node in self.render() {
            self.collect_rows(&node, &mut rows);
        }
        rows
    }

    fn collect_rows(&self, node: &RenderedNode, rows: &mut Vec<VisibleRow>) {
        let kind = match &node.kind {
            NodeKind::Link => RowKind::Link,
            NodeKind::Inert => RowKind::Inert,
            NodeKind::Group { expanded, .. } => RowKind::Group { expanded: *expanded },
            NodeKind::Flyout { .. } => RowKind::Flyout,
        };
        rows.push(VisibleRow {
            path: node.path.clone(),
            key: node.key.clone(),
            title: node.title.clone(),
            icon: node.icon.clone(),
            depth: node.depth,
            active: node.active,
            disabled: node.disabled,
            badge: node.badge.clone(),
            target: node.target.clone(),
            kind,
            is_selected: self.selection.as_ref() == Some(&node.path),
        });
        for child in node.children() {
            self.collect_rows(child, rows);
        }
    }

    fn find_next_row(&self, rows: &[VisibleRow]) -> Option<Vec<String>> {
        if rows.is_empty() {
            return None;
        }
        match rows.iter().position(|row| row.is_selected) {
            Some(index) if index + 1 < rows.len() => Some(rows[index + 1].path.clone()),
            Some(index) => Some(rows[index].path.clone()),
            None => Some(rows[0].path.clone()),
        }
    }

    fn find_previous_row(&self, rows: &[VisibleRow]) -> Option<Vec<String>> {
        if rows.is_empty() {
            return None;
        }
        match rows.iter().position(|row| row.is_selected) {
            Some(index) => Some(rows[index.saturating_sub(1)].path.clone()),
            None => Some(rows[0].path.clone()),
        }
    }

    fn ensure_valid_selection(&mut self) {
        let rows = self.get_current_visible_rows();
        if rows.iter().any(|row| row.is_selected) {
            return;
        }
        self.selection = rows.first().map(|row| row.path.clone());
    }
}

fn disabled_click(item: &NavItem) -> Vec<NavAction> {
    log::debug!("Navigator: '{}' is disabled, redirecting to safe target", item.title);
    vec![NavAction::Navigate(crate::render::SAFE_TARGET.to_string())]
}

/// Keep the items whose title fuzzy-matches `query`, plus their ancestors.
/// A matching parent keeps all of its children.
pub fn filter_tree(items: &[NavItem], query: &str, translations: &Translations) -> Vec<NavItem> {
    let matcher = SkimMatcherV2::default();
    filter_with(items, query, translations, &matcher)
}

fn filter_with(
    items: &[NavItem],
    query: &str,
    translations: &Translations,
    matcher: &SkimMatcherV2,
) -> Vec<NavItem> {
    items
        .iter()
        .filter_map(|item| {
            let title = resolve_title(translations, item);
            if matcher.fuzzy_match(&title, query).is_some() {
                return Some(item.clone());
            }
            let children = filter_with(item.children(), query, translations, matcher);
            if children.is_empty() {
                None
            } else {
                Some(item.clone().with_children(children))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StaticLocation;
    use assert_matches::assert_matches;

    fn create_test_tree() -> NavTree {
        // Dashboard
        // Users/
        //   All Users      /users
        //   Teachers       /users?role=TEACHER
        // Courses/
        //   All Courses    /courses
        //   Locked         /secret (disabled)
        // Help (no href)
        NavTree::new(vec![
            NavItem::link("Dashboard", "/dashboard"),
            NavItem::group(
                "Users",
                vec![
                    NavItem::link("All Users", "/users"),
                    NavItem::link("Teachers", "/users?role=TEACHER"),
                ],
            ),
            NavItem::group(
                "Courses",
                vec![
                    NavItem::link("All Courses", "/courses"),
                    NavItem::link("Locked", "/secret").disabled(),
                ],
            ),
            NavItem::new("Help"),
        ])
    }

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_navigator_state_creation() {
        let navigator = NavigatorState::new(create_test_tree(), Location::parse("/users"));
        assert!(!navigator.is_searching());
        assert_eq!(navigator.get_search_query(), "");
        assert_eq!(navigator.get_selection(), None);
        assert!(navigator.expansion().contains("Users"));
    }

    #[test]
    fn test_location_change_replaces_expansion() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::parse("/users"));
        navigator.handle_event(NavigatorEvent::ToggleExpanded("Courses".to_string())).unwrap();
        assert!(navigator.expansion().contains("Courses"));

        let outcome = navigator
            .handle_event(NavigatorEvent::LocationChanged(Location::parse("/courses")))
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(navigator.expansion().titles(), vec!["Courses"]);
    }

    #[test]
    fn test_same_location_does_not_recompute() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::parse("/users"));
        navigator.handle_event(NavigatorEvent::ToggleExpanded("Courses".to_string())).unwrap();
        let outcome = navigator
            .handle_event(NavigatorEvent::LocationChanged(Location::parse("/users")))
            .unwrap();
        assert!(!outcome.changed);
        assert!(navigator.expansion().contains("Courses"));
    }

    #[test]
    fn test_leaf_click_navigates_and_closes_mobile_nav() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let outcome = navigator.handle_event(NavigatorEvent::ClickItem(path(&["Dashboard"]))).unwrap();
        assert_eq!(
            outcome.actions,
            vec![NavAction::Navigate("/dashboard".to_string()), NavAction::CloseMobileNav]
        );
    }

    #[test]
    fn test_parent_click_navigates_to_first_child_and_toggles() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let outcome = navigator.handle_event(NavigatorEvent::ClickItem(path(&["Users"]))).unwrap();
        assert_eq!(outcome.actions, vec![NavAction::Navigate("/users".to_string())]);
        assert!(navigator.expansion().contains("Users"));
    }

    #[test]
    fn test_disabled_leaf_targets_root() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let outcome = navigator
            .handle_event(NavigatorEvent::ClickItem(path(&["Courses", "Locked"])))
            .unwrap();
        assert!(!outcome.actions.contains(&NavAction::Navigate("/secret".to_string())));
        assert_eq!(outcome.actions[0], NavAction::Navigate("/".to_string()));
    }

    #[test]
    fn test_inert_click_does_nothing() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let outcome = navigator.handle_event(NavigatorEvent::ClickItem(path(&["Help"]))).unwrap();
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let result = navigator.handle_event(NavigatorEvent::ClickItem(path(&["Nope"])));
        assert_matches!(result, Err(NavError::Generic(_)));
    }

    #[test]
    fn test_flyout_open_and_select() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        navigator.handle_event(NavigatorEvent::SetMinimized(true)).unwrap();

        let outcome = navigator.handle_event(NavigatorEvent::ClickItem(path(&["Users"]))).unwrap();
        assert!(outcome.actions.is_empty());
        assert_eq!(navigator.open_flyout(), Some("Users"));
        // flyouts do not touch the expansion set
        assert!(!navigator.expansion().contains("Users"));

        let flyout = navigator.build_view_model().flyout.clone().unwrap();
        assert_eq!(flyout.entries.len(), 2);

        let outcome = navigator.handle_event(NavigatorEvent::SelectFlyoutEntry(1)).unwrap();
        assert_eq!(outcome.actions, vec![NavAction::Navigate("/users?role=TEACHER".to_string())]);
        assert_eq!(navigator.open_flyout(), None);
    }

    #[test]
    fn test_flyout_keyboard() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        navigator.handle_event(NavigatorEvent::SetMinimized(true)).unwrap();
        navigator.handle_event(NavigatorEvent::OpenFlyout("Courses".to_string())).unwrap();
        navigator.handle_event(NavigatorEvent::NavigateDown).unwrap();
        navigator.handle_event(NavigatorEvent::NavigateDown).unwrap();
        let outcome = navigator.handle_event(NavigatorEvent::ActivateSelected).unwrap();
        assert_eq!(outcome.actions, vec![NavAction::Navigate("/".to_string())]);
    }

    #[test]
    fn test_flyout_needs_wide_viewport() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        navigator.handle_event(NavigatorEvent::SetMinimized(true)).unwrap();
        navigator.handle_event(NavigatorEvent::SetAboveBreakpoint(false)).unwrap();
        navigator.handle_event(NavigatorEvent::OpenFlyout("Users".to_string())).unwrap();
        assert_eq!(navigator.open_flyout(), None);
    }

    #[test]
    fn test_mode_change_closes_flyout() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        navigator.handle_event(NavigatorEvent::SetMinimized(true)).unwrap();
        navigator.handle_event(NavigatorEvent::OpenFlyout("Users".to_string())).unwrap();
        navigator.handle_event(NavigatorEvent::SetMinimized(false)).unwrap();
        assert_eq!(navigator.open_flyout(), None);
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let outcome = navigator.handle_event(NavigatorEvent::NavigateDown).unwrap();
        assert!(outcome.changed);
        assert_eq!(navigator.get_selection(), Some(path(&["Dashboard"])));

        navigator.handle_event(NavigatorEvent::NavigateDown).unwrap();
        assert_eq!(navigator.get_selection(), Some(path(&["Users"])));

        navigator.handle_event(NavigatorEvent::ToggleSelected).unwrap();
        navigator.handle_event(NavigatorEvent::NavigateDown).unwrap();
        assert_eq!(navigator.get_selection(), Some(path(&["Users", "All Users"])));

        navigator.handle_event(NavigatorEvent::NavigateUp).unwrap();
        navigator.handle_event(NavigatorEvent::NavigateUp).unwrap();
        navigator.handle_event(NavigatorEvent::NavigateUp).unwrap();
        assert_eq!(navigator.get_selection(), Some(path(&["Dashboard"])));
    }

    #[test]
    fn test_view_model_rows() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::parse("/users?role=TEACHER"));
        let view_model = navigator.build_view_model();
        let titles: Vec<&str> = view_model.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(titles, vec!["Dashboard", "Users", "All Users", "Teachers", "Courses", "Help"]);
        let teachers = &view_model.rows[3];
        assert!(teachers.active);
        assert_eq!(teachers.depth, 1);
        assert_eq!(view_model.location, "/users?role=TEACHER");
    }

    #[test]
    fn test_view_model_cache_invalidated_on_change() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        assert_eq!(navigator.build_view_model().rows.len(), 4);
        navigator.handle_event(NavigatorEvent::ToggleExpanded("Users".to_string())).unwrap();
        assert_eq!(navigator.build_view_model().rows.len(), 6);
    }

    #[test]
    fn test_search_filters_and_expands() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        navigator.handle_event(NavigatorEvent::StartSearch).unwrap();
        navigator
            .handle_event(NavigatorEvent::UpdateSearchQuery("teach".to_string()))
            .unwrap();
        let keys: Vec<String> = navigator.build_view_model().rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec!["Users".to_string(), "Teachers".to_string()]);
        assert_eq!(navigator.get_selection(), Some(path(&["Users"])));

        navigator.handle_event(NavigatorEvent::EndSearch).unwrap();
        assert!(!navigator.is_searching());
        assert_eq!(navigator.build_view_model().rows.len(), 4);
    }

    #[test]
    fn test_filtered_rows_do_not_toggle_expansion() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        navigator.handle_event(NavigatorEvent::StartSearch).unwrap();
        navigator
            .handle_event(NavigatorEvent::UpdateSearchQuery("teach".to_string()))
            .unwrap();
        assert_eq!(navigator.get_selection(), Some(path(&["Users"])));

        let outcome = navigator.handle_event(NavigatorEvent::ToggleSelected).unwrap();
        assert!(!outcome.changed);
        assert!(navigator.expansion().is_empty());

        let outcome = navigator
            .handle_event(NavigatorEvent::ClickItem(path(&["Users"])))
            .unwrap();
        assert_eq!(outcome.actions, vec![NavAction::Navigate("/users".to_string())]);
        assert!(navigator.expansion().is_empty());

        navigator.handle_event(NavigatorEvent::EndSearch).unwrap();
        assert_eq!(navigator.build_view_model().rows.len(), 4);
    }

    #[test]
    fn test_query_ignored_unless_editing() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let outcome = navigator
            .handle_event(NavigatorEvent::UpdateSearchQuery("users".to_string()))
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(navigator.get_search_query(), "");
    }

    #[test]
    fn test_sync_location_from_provider() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::root());
        let provider = StaticLocation(Location::parse("/courses"));
        assert!(navigator.sync_location(&provider).unwrap());
        assert!(!navigator.sync_location(&provider).unwrap());
        assert!(navigator.expansion().contains("Courses"));
    }

    #[test]
    fn test_restore_round_trip() {
        let mut navigator = NavigatorState::new(create_test_tree(), Location::parse("/users"));
        navigator.handle_event(NavigatorEvent::ToggleExpanded("Courses".to_string())).unwrap();
        let restored = NavigatorState::restore(navigator.to_parts());
        assert_eq!(restored.expansion(), navigator.expansion());
        assert_eq!(restored.location(), navigator.location());
    }

    #[test]
    fn test_filter_tree_keeps_ancestors() {
        let filtered = filter_tree(&create_test_tree().items, "locked", &Translations::default());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Courses");
        assert_eq!(filtered[0].children().len(), 1);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Decorative counter shown next to a navigation item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Badge {
    Count(i64),
    Text(String),
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Count(n) => write!(f, "{}", n),
            Badge::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Represents a single node in the navigation tree.
///
/// `title` doubles as the node identity: the expansion state is keyed by it,
/// so titles are expected to be unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl NavItem {
    /// Create a bare node with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: None,
            href: None,
            icon: None,
            children: None,
            disabled: None,
            badge: None,
        }
    }

    /// Create a leaf node pointing at `href`
    pub fn link(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(title).with_href(href)
    }

    /// Create a parent node with the given children
    pub fn group(title: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self::new(title).with_children(children)
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = Some(true);
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: NavItem) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Children as a slice (empty for leaves)
    pub fn children(&self) -> &[NavItem] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// A node is a parent iff it has at least one child
    pub fn is_parent(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_parent()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// The declared href, treating an empty string as absent
    pub fn usable_href(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !href.is_empty())
    }

    /// Href of the first child that can be navigated to.
    /// Disabled children are skipped since they never navigate to their href.
    pub fn first_child_href(&self) -> Option<&str> {
        self.children()
            .iter()
            .filter(|child| !child.is_disabled())
            .find_map(|child| child.usable_href())
    }

    /// Depth of the deepest descendant, 0 for a leaf
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Ordered list of top-level navigation items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavTree {
    pub items: Vec<NavItem>,
}

impl NavTree {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load a tree from a JSON array of items
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Find the first node with the given title, depth-first
    pub fn find_by_title(&self, title: &str) -> Option<&NavItem> {
        fn find<'a>(nodes: &'a [NavItem], title: &str) -> Option<&'a NavItem> {
            for node in nodes {
                if node.title == title {
                    return Some(node);
                }
                if let Some(found) = find(node.children(), title) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.items, title)
    }

    /// Find a node by its ancestor path of titles
    pub fn find_by_path(&self, path: &[String]) -> Option<&NavItem> {
        let (first, rest) = path.split_first()?;
        let mut node = self.items.iter().find(|item| &item.title == first)?;
        for title in rest {
            node = node.children().iter().find(|child| &child.title == title)?;
        }
        Some(node)
    }

    /// Titles of all parent nodes, depth-first
    pub fn parent_titles(&self) -> Vec<String> {
        fn collect(nodes: &[NavItem], titles: &mut Vec<String>) {
            for node in nodes {
                if node.is_parent() {
                    titles.push(node.title.clone());
                    collect(node.children(), titles);
                }
            }
        }
        let mut titles = Vec::new();
        collect(&self.items, &mut titles);
        titles
    }

    /// Titles that appear more than once, with their occurrence counts
    pub fn duplicate_titles(&self) -> BTreeMap<String, usize> {
        fn count(nodes: &[NavItem], counts: &mut BTreeMap<String, usize>) {
            for node in nodes {
                *counts.entry(node.title.clone()).or_insert(0) += 1;
                count(node.children(), counts);
            }
        }
        let mut counts = BTreeMap::new();
        count(&self.items, &mut counts);
        counts.retain(|_, n| *n > 1);
        counts
    }

    /// Depth of the deepest node (root level = 0), `None` for an empty tree
    pub fn max_depth(&self) -> Option<usize> {
        self.items.iter().map(NavItem::height).max()
    }

    /// Log structural problems that degrade rendering. Returns the number of issues.
    pub fn validate(&self, depth_limit: usize) -> usize {
        let mut issues = 0;
        for (title, n) in self.duplicate_titles() {
            log::warn!(
                "Navigation title '{}' appears {} times; expansion state will be shared",
                title,
                n
            );
            issues += 1;
        }
        if let Some(depth) = self.max_depth() {
            if depth > depth_limit {
                log::warn!(
                    "Navigation tree is {} levels deep; nodes below depth {} will not render",
                    depth,
                    depth_limit
                );
                issues += 1;
            }
        }
        issues
    }

    /// Sample admin navigation used by the default snapshot and the demo
    pub fn sample() -> Self {
        Self::new(vec![
            NavItem::link("Dashboard", "/dashboard").with_icon("dashboard"),
            NavItem::group(
                "Courses",
                vec![
                    NavItem::link("All Courses", "/courses").with_label("nav.courses.all"),
                    NavItem::link("Seasons", "/courses/seasons").with_label("nav.courses.seasons"),
                    NavItem::link("Lessons", "/courses/lessons").with_label("nav.courses.lessons"),
                ],
            )
            .with_label("nav.courses")
            .with_icon("book"),
            NavItem::link("Media", "/media").with_icon("media"),
            NavItem::group(
                "Users",
                vec![
                    NavItem::link("All Users", "/users"),
                    NavItem::link("Teachers", "/users?role=TEACHER")
                        .with_badge(Badge::Count(3)),
                    NavItem::link("Students", "/users?role=STUDENT"),
                ],
            )
            .with_icon("users"),
            NavItem::group(
                "Payments",
                vec![
                    NavItem::link("Transactions", "/payments"),
                    NavItem::link("Financial Reports", "/payments/reports"),
                ],
            )
            .with_icon("payments"),
            NavItem::group(
                "Schools",
                vec![
                    NavItem::link("School List", "/schools"),
                    NavItem::link("Stores", "/schools/stores").with_badge(Badge::Text("new".to_string())),
                ],
            )
            .with_icon("school"),
            NavItem::link("Settings", "/settings").with_icon("settings").disabled(),
        ])
    }
}

impl From<Vec<NavItem>> for NavTree {
    fn from(items: Vec<NavItem>) -> Self {
        Self::new(items)
    }
}

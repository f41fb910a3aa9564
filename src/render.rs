//! Depth-first walk turning the navigation tree into render state.
//!
//! The walk is a pure function of the tree and a [`RenderContext`]; nothing
//! here touches the terminal.

use crate::expansion::{has_active_child, ExpansionState};
use crate::providers::{IconRegistry, Translator, DEFAULT_ICON};
use crate::route::Location;
use crate::tree::NavItem;

/// Deepest level that is rendered (root = 0)
pub const MAX_DEPTH: usize = 5;

/// Where disabled items send the user instead of their declared href
pub const SAFE_TARGET: &str = "/";

/// Everything the walk reads besides the tree itself
pub struct RenderContext<'a> {
    pub expansion: &'a ExpansionState,
    pub minimized: bool,
    pub above_breakpoint: bool,
    pub location: &'a Location,
    pub translator: &'a dyn Translator,
    pub icons: &'a dyn IconRegistry,
}

impl RenderContext<'_> {
    /// Parents render as flyouts only in the collapsed sidebar on a wide viewport
    pub fn uses_flyouts(&self) -> bool {
        self.minimized && self.above_breakpoint
    }

    fn display_title(&self, item: &NavItem) -> String {
        resolve_title(self.translator, item)
    }

    fn icon(&self, item: &NavItem) -> String {
        item.icon
            .as_deref()
            .and_then(|key| self.icons.resolve(key))
            .unwrap_or(DEFAULT_ICON)
            .to_string()
    }
}

/// Translated title of `item`, falling back to the raw title
pub fn resolve_title(translator: &dyn Translator, item: &NavItem) -> String {
    match item.label.as_deref() {
        Some(label) => {
            let translated = translator.translate(label, &item.title);
            if translated.is_empty() || translated == label {
                item.title.clone()
            } else {
                translated
            }
        }
        None => item.title.clone(),
    }
}

/// Child listed in a flyout menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlyoutEntry {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub target: Option<String>,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf with a navigation target
    Link,
    /// Leaf without a target
    Inert,
    /// Inline expandable parent. `children` is empty while collapsed.
    Group {
        expanded: bool,
        children: Vec<RenderedNode>,
    },
    /// Parent shown as a popover trigger in the collapsed sidebar
    Flyout { entries: Vec<FlyoutEntry> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    /// Item title, the identity used by the expansion state
    pub key: String,
    /// Titles from the root down to this node
    pub path: Vec<String>,
    pub title: String,
    pub icon: String,
    pub depth: usize,
    pub active: bool,
    pub disabled: bool,
    pub badge: Option<String>,
    /// Effective click target: the href for links, the first child for parents.
    /// Disabled items always target [`SAFE_TARGET`].
    pub target: Option<String>,
    pub kind: NodeKind,
}

impl RenderedNode {
    pub fn is_parent(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. } | NodeKind::Flyout { .. })
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Group { expanded: true, .. })
    }

    /// Rendered children (empty unless an expanded group)
    pub fn children(&self) -> &[RenderedNode] {
        match &self.kind {
            NodeKind::Group { children, .. } => children,
            _ => &[],
        }
    }
}

fn effective_target(item: &NavItem) -> Option<String> {
    let declared = if item.is_parent() {
        item.first_child_href()
    } else {
        item.usable_href()
    };
    declared.map(|href| {
        if item.is_disabled() {
            SAFE_TARGET.to_string()
        } else {
            href.to_string()
        }
    })
}

/// Render the top-level items
pub fn render_tree(items: &[NavItem], ctx: &RenderContext<'_>) -> Vec<RenderedNode> {
    items
        .iter()
        .filter_map(|item| render_node(item, 0, &[], ctx))
        .collect()
}

/// Render one node and, when expanded, its subtree.
///
/// Returns `None` for nodes below [`MAX_DEPTH`]; the rest of the tree is unaffected.
pub fn render_node(
    item: &NavItem,
    depth: usize,
    parent_path: &[String],
    ctx: &RenderContext<'_>,
) -> Option<RenderedNode> {
    if depth > MAX_DEPTH {
        log::warn!(
            "Navigation depth limit exceeded at '{}' (depth {} > {}); skipping subtree",
            item.title,
            depth,
            MAX_DEPTH
        );
        return None;
    }

    let mut path = parent_path.to_vec();
    path.push(item.title.clone());

    let matches_own_href = ctx.location.matches(item.href.as_deref());
    // Top level also checks its own href so that root links like a dashboard
    // entry can highlight; deeper levels only look at their own href.
    let active = if depth == 0 {
        has_active_child(item, ctx.location) || matches_own_href
    } else {
        matches_own_href
    };

    let kind = if item.is_parent() {
        if ctx.uses_flyouts() {
            NodeKind::Flyout {
                entries: item
                    .children()
                    .iter()
                    .map(|child| FlyoutEntry {
                        key: child.title.clone(),
                        title: ctx.display_title(child),
                        icon: ctx.icon(child),
                        target: effective_target(child),
                        active: ctx.location.matches(child.href.as_deref()),
                        disabled: child.is_disabled(),
                    })
                    .collect(),
            }
        } else {
            let expanded = ctx.expansion.contains(&item.title);
            let children = if expanded {
                item.children()
                    .iter()
                    .filter_map(|child| render_node(child, depth + 1, &path, ctx))
                    .collect()
            } else {
                Vec::new()
            };
            NodeKind::Group { expanded, children }
        }
    } else if item.usable_href().is_some() {
        NodeKind::Link
    } else {
        NodeKind::Inert
    };

    Some(RenderedNode {
        key: item.title.clone(),
        title: ctx.display_title(item),
        icon: ctx.icon(item),
        depth,
        active,
        disabled: item.is_disabled(),
        badge: item.badge.as_ref().map(ToString::to_string),
        target: effective_target(item),
        path,
        kind,
    })
}

use assert_matches::assert_matches;
use dashboard_nav::expansion::{has_active_child, ExpansionState};
use dashboard_nav::navigator::{NavAction, NavigatorEvent, NavigatorState};
use dashboard_nav::providers::{IconSet, StaticLocation, Translations};
use dashboard_nav::render::{render_tree, NodeKind, RenderContext, RenderedNode, SAFE_TARGET};
use dashboard_nav::route::{is_active, Location};
use dashboard_nav::tree::{NavItem, NavTree};

fn navigator_at(location: &str) -> NavigatorState {
    NavigatorState::new(NavTree::sample(), Location::parse(location))
}

fn goto(navigator: &mut NavigatorState, location: &str) {
    navigator
        .handle_event(NavigatorEvent::LocationChanged(Location::parse(location)))
        .unwrap();
}

fn path(titles: &[&str]) -> Vec<String> {
    titles.iter().map(|t| t.to_string()).collect()
}

fn count_nodes(nodes: &[RenderedNode]) -> usize {
    nodes.iter().map(|node| 1 + count_nodes(node.children())).sum()
}

#[test]
fn test_exact_path_without_prefix_matching() {
    assert!(is_active("/courses", Some("/courses")));
    assert!(!is_active("/courses/1", Some("/courses")));
}

#[test]
fn test_query_order_does_not_matter() {
    assert!(is_active(
        "/users?status=ACTIVE&role=TEACHER",
        Some("/users?role=TEACHER&status=ACTIVE")
    ));
}

#[test]
fn test_query_subset_is_not_a_match() {
    assert!(!is_active("/users?role=TEACHER&status=ACTIVE", Some("/users?role=TEACHER")));
}

#[test]
fn test_bare_href_only_matches_bare_path() {
    assert!(!is_active("/users?role=TEACHER", Some("/users")));
    assert!(is_active("/users?", Some("/users")));
}

#[test]
fn test_missing_href_never_matches() {
    assert!(!is_active("/", None));
}

#[test]
fn test_depth_guard_drops_seventh_level() {
    let mut chain = NavItem::link("Level 6", "/six");
    for level in (0..6).rev() {
        chain = NavItem::group(format!("Level {}", level), vec![chain]);
    }
    let items = vec![chain];
    let titles: Vec<String> = (0..6).map(|level| format!("Level {}", level)).collect();
    let expansion = ExpansionState::from_titles(titles);
    let location = Location::root();
    let translations = Translations::default();
    let icons = IconSet::new();
    let ctx = RenderContext {
        expansion: &expansion,
        minimized: false,
        above_breakpoint: true,
        location: &location,
        translator: &translations,
        icons: &icons,
    };

    let rendered = render_tree(&items, &ctx);
    assert_eq!(count_nodes(&rendered), 6);
}

#[test]
fn test_auto_expansion_replaces_previous_branch() {
    let mut navigator = navigator_at("/users?role=TEACHER");
    assert!(navigator.expansion().contains("Users"));

    goto(&mut navigator, "/payments");
    assert_eq!(navigator.expansion().titles(), vec!["Payments".to_string()]);

    goto(&mut navigator, "/media");
    assert!(navigator.expansion().is_empty());
}

#[test]
fn test_manual_toggle_survives_until_location_changes() {
    let mut navigator = navigator_at("/users?role=TEACHER");

    navigator
        .handle_event(NavigatorEvent::ToggleExpanded("Schools".to_string()))
        .unwrap();
    assert!(navigator.expansion().contains("Schools"));
    assert!(navigator.expansion().contains("Users"));

    navigator
        .handle_event(NavigatorEvent::ToggleExpanded("Schools".to_string()))
        .unwrap();
    assert!(!navigator.expansion().contains("Schools"));

    navigator
        .handle_event(NavigatorEvent::ToggleExpanded("Courses".to_string()))
        .unwrap();
    goto(&mut navigator, "/users?role=STUDENT");
    assert_eq!(navigator.expansion().titles(), vec!["Users".to_string()]);
}

#[test]
fn test_disabled_leaf_never_targets_its_href() {
    let tree = NavTree::new(vec![NavItem::link("Secret", "/secret").disabled()]);
    let mut navigator = NavigatorState::new(tree, Location::root());

    let outcome = navigator
        .handle_event(NavigatorEvent::ClickItem(path(&["Secret"])))
        .unwrap();
    assert!(!outcome
        .actions
        .iter()
        .any(|action| action == &NavAction::Navigate("/secret".to_string())));
    assert_eq!(outcome.actions[0], NavAction::Navigate(SAFE_TARGET.to_string()));
}

#[test]
fn test_disabled_parent_redirects_without_expanding() {
    let tree = NavTree::new(vec![
        NavItem::group("Vault", vec![NavItem::link("Inner", "/secret")]).disabled()
    ]);
    let mut navigator = NavigatorState::new(tree, Location::root());

    let outcome = navigator
        .handle_event(NavigatorEvent::ClickItem(path(&["Vault"])))
        .unwrap();
    assert_eq!(outcome.actions, vec![NavAction::Navigate("/".to_string())]);
    assert!(!navigator.expansion().contains("Vault"));
}

#[test]
fn test_parent_click_navigates_to_first_child_and_expands() {
    let mut navigator = navigator_at("/");

    let outcome = navigator
        .handle_event(NavigatorEvent::ClickItem(path(&["Courses"])))
        .unwrap();
    assert_eq!(outcome.actions, vec![NavAction::Navigate("/courses".to_string())]);
    assert!(navigator.expansion().contains("Courses"));

    // Host completes the navigation
    navigator
        .sync_location(&StaticLocation(Location::parse("/courses")))
        .unwrap();
    assert!(navigator.expansion().contains("Courses"));
}

#[test]
fn test_leaf_click_closes_mobile_nav() {
    let mut navigator = navigator_at("/");
    let outcome = navigator
        .handle_event(NavigatorEvent::ClickItem(path(&["Users", "Students"])))
        .unwrap();
    assert_eq!(
        outcome.actions,
        vec![
            NavAction::Navigate("/users?role=STUDENT".to_string()),
            NavAction::CloseMobileNav
        ]
    );
}

#[test]
fn test_unknown_path_is_an_error() {
    let mut navigator = navigator_at("/");
    assert!(navigator
        .handle_event(NavigatorEvent::ClickItem(path(&["Nope"])))
        .is_err());
}

#[test]
fn test_minimized_wide_sidebar_uses_flyouts() {
    let mut navigator = navigator_at("/users?role=TEACHER");
    navigator.handle_event(NavigatorEvent::SetMinimized(true)).unwrap();
    navigator.handle_event(NavigatorEvent::SetAboveBreakpoint(true)).unwrap();

    let users = navigator
        .render()
        .into_iter()
        .find(|node| node.key == "Users")
        .unwrap();
    assert_matches!(&users.kind, NodeKind::Flyout { entries } if entries.len() == 3 && entries[1].active);
    assert!(users.active);

    let outcome = navigator
        .handle_event(NavigatorEvent::ClickItem(path(&["Users"])))
        .unwrap();
    assert!(outcome.actions.is_empty());
    assert_eq!(navigator.open_flyout(), Some("Users"));

    let outcome = navigator
        .handle_event(NavigatorEvent::SelectFlyoutEntry(2))
        .unwrap();
    assert_eq!(outcome.actions, vec![NavAction::Navigate("/users?role=STUDENT".to_string())]);
    assert_eq!(navigator.open_flyout(), None);
}

#[test]
fn test_minimized_narrow_sidebar_renders_inline() {
    let mut navigator = navigator_at("/users?role=TEACHER");
    navigator.handle_event(NavigatorEvent::SetMinimized(true)).unwrap();
    navigator.handle_event(NavigatorEvent::SetAboveBreakpoint(false)).unwrap();

    let users = navigator
        .render()
        .into_iter()
        .find(|node| node.key == "Users")
        .unwrap();
    assert_matches!(users.kind, NodeKind::Group { expanded: true, .. });
}

#[test]
fn test_has_active_child_is_single_level() {
    let item = NavItem::group(
        "Outer",
        vec![NavItem::group("Inner", vec![NavItem::link("Deep", "/deep")])],
    );
    assert!(!has_active_child(&item, &Location::parse("/deep")));
    assert!(has_active_child(&item.children()[0], &Location::parse("/deep")));
}

#[test]
fn test_search_filter_keeps_matching_branch() {
    let mut navigator = navigator_at("/");
    navigator.handle_event(NavigatorEvent::StartSearch).unwrap();
    navigator
        .handle_event(NavigatorEvent::UpdateSearchQuery("reports".to_string()))
        .unwrap();

    let rendered = navigator.render();
    let payments = rendered.iter().find(|node| node.key == "Payments").unwrap();
    assert!(payments.is_expanded());
    assert!(payments.children().iter().any(|child| child.title == "Financial Reports"));
    assert!(rendered.iter().all(|node| node.key != "Media"));

    navigator.handle_event(NavigatorEvent::EndSearch).unwrap();
    assert_eq!(navigator.render().len(), NavTree::sample().items.len());
}

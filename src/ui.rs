use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::navigator::{FlyoutView, NavigatorViewModel, RowKind, VisibleRow};
use crate::theme::{get_theme, Theme};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = get_theme();

    let status_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let sidebar_width = if app.navigator.is_minimized() && app.navigator.is_above_breakpoint() {
        app.config.minimized_width
    } else {
        app.config.sidebar_width
    };

    let view_model = app.navigator.build_view_model().clone();

    if app.sidebar_visible() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(status_chunks[0]);

        draw_sidebar(frame, app, &view_model, &theme, chunks[0]);
        draw_content(frame, app, &view_model, &theme, chunks[1]);
        if let Some(ref flyout) = view_model.flyout {
            draw_flyout(frame, &view_model, flyout, &theme, chunks[0], status_chunks[0]);
        }
    } else {
        draw_content(frame, app, &view_model, &theme, status_chunks[0]);
    }

    draw_status_bar(frame, app, &theme, status_chunks[1]);
}

fn sidebar_line(row: &VisibleRow, compact: bool, indent: usize) -> String {
    if compact {
        let marker = if row.kind == RowKind::Flyout { "›" } else { " " };
        return format!("{}{}", row.icon, marker);
    }

    let expand_char = match row.kind {
        RowKind::Group { expanded: true } => "▼",
        RowKind::Group { expanded: false } => "▶",
        RowKind::Flyout => "›",
        RowKind::Link | RowKind::Inert => " ",
    };
    let badge = row
        .badge
        .as_ref()
        .map(|badge| format!(" ({})", badge))
        .unwrap_or_default();
    format!(
        "{}{} {} {}{}",
        " ".repeat(row.depth * indent),
        expand_char,
        row.icon,
        row.title,
        badge
    )
}

fn draw_sidebar(frame: &mut Frame, app: &App, view_model: &NavigatorViewModel, theme: &Theme, area: Rect) {
    let compact = view_model.minimized && app.navigator.is_above_breakpoint() && view_model.search_query.is_empty();

    let title = if view_model.is_searching {
        format!(" Search: {} ", app.search_input)
    } else if !view_model.search_query.is_empty() {
        format!(" Filter: {} ", view_model.search_query)
    } else if compact {
        String::new()
    } else {
        " Navigation ".to_string()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.sidebar_border));

    if view_model.rows.is_empty() {
        let message = if view_model.search_query.is_empty() {
            "No navigation items"
        } else {
            "No matches"
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(theme.search_text));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = view_model
        .rows
        .iter()
        .map(|row| {
            let text = sidebar_line(row, compact, app.config.indent);
            let style = if row.is_selected {
                theme.selected_style()
            } else {
                let is_group = matches!(row.kind, RowKind::Group { .. } | RowKind::Flyout);
                theme.item_style(row.active, row.disabled, is_group)
            };
            ListItem::new(Line::from(vec![Span::styled(text, style)]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_symbol("");

    let selected_index = view_model.rows.iter().position(|row| row.is_selected);
    let mut list_state = ListState::default();
    list_state.select(selected_index);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_flyout(
    frame: &mut Frame,
    view_model: &NavigatorViewModel,
    flyout: &FlyoutView,
    theme: &Theme,
    sidebar: Rect,
    bounds: Rect,
) {
    let row_index = view_model
        .rows
        .iter()
        .position(|row| row.key == flyout.parent)
        .unwrap_or(0) as u16;

    let width = flyout
        .entries
        .iter()
        .map(|entry| entry.title.chars().count() + 6)
        .chain(std::iter::once(flyout.title.chars().count() + 4))
        .max()
        .unwrap_or(10) as u16;
    let height = flyout.entries.len() as u16 + 2;

    let x = sidebar.x + sidebar.width;
    let y = (sidebar.y + 1 + row_index).min(bounds.bottom().saturating_sub(height));
    let area = Rect::new(x, y, width, height).intersection(bounds);
    if area.width == 0 || area.height == 0 {
        return;
    }

    let items: Vec<ListItem> = flyout
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let style = if index == flyout.cursor {
                theme.selected_style()
            } else if entry.disabled {
                theme.item_style(false, true, false)
            } else if entry.active {
                Style::default().fg(theme.flyout_active)
            } else {
                Style::default().fg(theme.item_default)
            };
            ListItem::new(Line::from(Span::styled(format!("{} {}", entry.icon, entry.title), style)))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", flyout.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.flyout_border));

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_content(frame: &mut Frame, app: &App, view_model: &NavigatorViewModel, theme: &Theme, area: Rect) {
    let breadcrumb = view_model
        .rows
        .iter()
        .filter(|row| row.active)
        .max_by_key(|row| row.depth)
        .map(|row| row.path.join(" › "))
        .unwrap_or_else(|| "-".to_string());

    let mode = match (app.navigator.is_minimized(), app.navigator.is_above_breakpoint()) {
        (true, true) => "minimized sidebar, wide viewport",
        (true, false) => "minimized sidebar, narrow viewport",
        (false, true) => "full sidebar, wide viewport",
        (false, false) => "full sidebar, narrow viewport",
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Location: "),
            Span::styled(view_model.location.clone(), Style::default().fg(theme.location_text)),
        ]),
        Line::from(vec![
            Span::raw("Section:  "),
            Span::styled(breadcrumb, Style::default().fg(theme.breadcrumb)),
        ]),
        Line::from(format!("Mode:     {}", mode)),
        Line::from(format!("History:  {} entries", app.router.history().len())),
    ];
    if !app.navigator.is_above_breakpoint() {
        let state = if app.mobile_nav_open { "open" } else { "closed" };
        lines.push(Line::from(format!("Menu:     {}", state)));
    }

    let block = Block::default().title(" Dashboard ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let help_text = if app.navigator.is_searching() {
        "Type to filter | Enter: Keep filter | Esc: Clear"
    } else if app.navigator.open_flyout().is_some() {
        "↑↓: Choose | Enter: Open | Esc: Close"
    } else {
        "↑↓: Move | Enter: Open | Space: Expand | m: Minimize | /: Search | b: Back | q: Quit"
    };

    let status_line = Line::from(vec![
        Span::styled(app.status_message.clone(), Style::default().fg(theme.status_bar_fg)),
        Span::raw(" | "),
        Span::styled(help_text, Style::default().fg(theme.status_help_text)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(theme.status_bar_bg));
    frame.render_widget(paragraph, area);
}

use ratatui::style::{Color, Modifier, Style};

/// Theme data structure containing all colors used in the application
#[derive(Debug, Clone)]
pub struct Theme {
    // Sidebar
    pub sidebar_border: Color,
    pub item_default: Color,
    pub item_active: Color,
    pub item_disabled: Color,
    pub group_title: Color,
    pub badge: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub search_text: Color,

    // Flyout
    pub flyout_border: Color,
    pub flyout_active: Color,

    // Content pane
    pub location_text: Color,
    pub breadcrumb: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_help_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            sidebar_border: Color::DarkGray,
            item_default: Color::Reset,
            item_active: Color::Yellow,
            item_disabled: Color::DarkGray,
            group_title: Color::Blue,
            badge: Color::Magenta,
            selected_bg: Color::White,
            selected_fg: Color::Black,
            search_text: Color::Gray,

            flyout_border: Color::Yellow,
            flyout_active: Color::Yellow,

            location_text: Color::Green,
            breadcrumb: Color::Gray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_help_text: Color::Gray,
        }
    }
}

impl Theme {
    /// Style for a sidebar entry. Disabled wins over active.
    pub fn item_style(&self, active: bool, disabled: bool, is_group: bool) -> Style {
        if disabled {
            Style::default()
                .fg(self.item_disabled)
                .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
        } else if active {
            Style::default().fg(self.item_active).add_modifier(Modifier::BOLD)
        } else if is_group {
            Style::default().fg(self.group_title).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.item_default)
        }
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Get the current theme
pub fn get_theme() -> Theme {
    Theme::default()
}

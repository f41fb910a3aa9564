use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;
use crate::command::Command;
use crate::error::Result;

/// Translate a key press into a command, given the current mode
pub fn command_for_key(key: KeyEvent, app: &App) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if app.navigator.is_searching() {
        return match key.code {
            KeyCode::Esc => Some(Command::EndSearch),
            KeyCode::Enter => Some(Command::AcceptSearch),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Up => Some(Command::NavigateUp),
            KeyCode::Down => Some(Command::NavigateDown),
            KeyCode::Char(c) => Some(Command::SearchInput(c)),
            _ => None,
        };
    }

    let keys = &app.config.keybindings;
    match key.code {
        KeyCode::Esc if app.navigator.open_flyout().is_some() => Some(Command::CloseFlyout),
        KeyCode::Esc if !app.navigator.get_search_query().is_empty() => Some(Command::EndSearch),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::NavigateDown),
        KeyCode::Enter => Some(Command::Activate),
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => Some(Command::Toggle),
        KeyCode::Char(c) if c == keys.quit => Some(Command::Quit),
        KeyCode::Char(c) if c == keys.toggle_minimized => Some(Command::ToggleMinimized),
        KeyCode::Char(c) if c == keys.toggle_mobile_nav => Some(Command::ToggleMobileNav),
        KeyCode::Char(c) if c == keys.back => Some(Command::Back),
        KeyCode::Char(c) if c == keys.search => Some(Command::StartSearch),
        _ => None,
    }
}

/// Handle a terminal event. Returns true if UI needs update.
pub fn handle_event(event: Event, app: &mut App) -> Result<bool> {
    let command = match event {
        Event::Key(key) => command_for_key(key, app),
        Event::Resize(width, _) => Some(Command::Resize(width)),
        _ => None,
    };

    match command {
        Some(command) => {
            log::debug!("Event: {}", command);
            app.apply_command(command)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

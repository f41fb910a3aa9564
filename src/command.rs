use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NavError;

/// Represents all possible user commands that can be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Quit,

    // Sidebar commands
    NavigateUp,
    NavigateDown,
    Activate,
    Toggle,
    ToggleMinimized,
    ToggleMobileNav,
    CloseFlyout,

    // Routing commands
    Goto(String),
    Back,
    Resize(u16),

    // Search commands
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    AcceptSearch,
    EndSearch,

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, NavError> {
        if let Some(target) = s.strip_prefix("goto:") {
            if target.is_empty() {
                return Err(NavError::InvalidCommand(s.to_string()));
            }
            return Ok(Command::Goto(target.to_string()));
        }

        if let Some(width) = s.strip_prefix("width:") {
            return width
                .trim()
                .parse()
                .map(Command::Resize)
                .map_err(|_| NavError::InvalidCommand(s.to_string()));
        }

        if let Some(char_str) = s.strip_prefix("search:") {
            let mut chars = char_str.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(Command::SearchInput(ch)),
                _ => Err(NavError::InvalidCommand(s.to_string())),
            };
        }

        if let Some(inner) = s.strip_prefix("sequence:[").and_then(|rest| rest.strip_suffix(']')) {
            if inner.trim().is_empty() {
                return Ok(Command::Sequence(vec![]));
            }
            return parse_sequence(inner).map(Command::Sequence);
        }

        match s.to_lowercase().as_str() {
            "quit" | "q" => Ok(Command::Quit),
            "navigate_up" | "up" => Ok(Command::NavigateUp),
            "navigate_down" | "down" => Ok(Command::NavigateDown),
            "activate" | "enter" => Ok(Command::Activate),
            "toggle" | "space" => Ok(Command::Toggle),
            "minimize" | "m" => Ok(Command::ToggleMinimized),
            "mobile_nav" | "open_nav" | "o" => Ok(Command::ToggleMobileNav),
            "close_flyout" => Ok(Command::CloseFlyout),
            "back" | "b" => Ok(Command::Back),
            "start_search" | "/" => Ok(Command::StartSearch),
            "search_backspace" | "backspace" => Ok(Command::SearchBackspace),
            "accept_search" => Ok(Command::AcceptSearch),
            "end_search" | "escape" => Ok(Command::EndSearch),
            _ => Err(NavError::InvalidCommand(s.to_string())),
        }
    }
}

/// Split a sequence body on commas. A comma inside a `goto:` target stays part
/// of the target unless the text after it is itself a command.
fn parse_sequence(inner: &str) -> Result<Vec<Command>, NavError> {
    let mut commands: Vec<Command> = Vec::new();
    for part in inner.split(',') {
        match Command::from_string(part.trim()) {
            Ok(command) => commands.push(command),
            Err(e) => match commands.last_mut() {
                Some(Command::Goto(target)) => {
                    target.push(',');
                    target.push_str(part.trim_end());
                }
                _ => return Err(e),
            },
        }
    }
    Ok(commands)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Quit => write!(f, "quit"),
            Command::NavigateUp => write!(f, "navigate_up"),
            Command::NavigateDown => write!(f, "navigate_down"),
            Command::Activate => write!(f, "activate"),
            Command::Toggle => write!(f, "toggle"),
            Command::ToggleMinimized => write!(f, "minimize"),
            Command::ToggleMobileNav => write!(f, "mobile_nav"),
            Command::CloseFlyout => write!(f, "close_flyout"),
            Command::Goto(target) => write!(f, "goto:{}", target),
            Command::Back => write!(f, "back"),
            Command::Resize(width) => write!(f, "width:{}", width),
            Command::StartSearch => write!(f, "start_search"),
            Command::SearchInput(ch) => write!(f, "search:{}", ch),
            Command::SearchBackspace => write!(f, "search_backspace"),
            Command::AcceptSearch => write!(f, "accept_search"),
            Command::EndSearch => write!(f, "end_search"),
            Command::Sequence(commands) => write!(
                f,
                "sequence:[{}]",
                commands
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

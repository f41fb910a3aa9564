use crate::command::Command;
use crate::config::NavConfig;
use crate::debounce::{Debounced, Debouncer};
use crate::error::Result;
use crate::navigator::{NavAction, NavigatorEvent, NavigatorParts, NavigatorState};
use crate::providers::{LocationProvider, Translations};
use crate::route::Location;
use crate::snapshot::Snapshot;
use crate::tree::NavTree;

/// In-memory route history standing in for the host router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    history: Vec<String>,
}

impl Router {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: vec![initial.into()],
        }
    }

    /// Restore from a saved history. An empty history starts at `/`.
    pub fn from_history(history: Vec<String>) -> Self {
        if history.is_empty() {
            Self::new("/")
        } else {
            Self { history }
        }
    }

    pub fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    /// Push `target`. Pushing the current route is a no-op.
    pub fn push(&mut self, target: &str) -> bool {
        if self.current() == target {
            return false;
        }
        self.history.push(target.to_string());
        true
    }

    /// Pop back to the previous route, keeping at least one entry
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl LocationProvider for Router {
    fn current_location(&self) -> Location {
        Location::parse(self.current())
    }
}

pub struct App {
    pub navigator: NavigatorState,
    pub router: Router,
    pub config: NavConfig,
    pub viewport_width: u16,
    pub mobile_nav_open: bool,
    pub search_input: String,
    pub status_message: String,
    pub should_quit: bool,
    search_debouncer: Option<Debouncer<String>>,
}

impl App {
    pub fn new(tree: NavTree, translations: Translations, config: NavConfig) -> Self {
        let router = Router::new(config.initial_location.clone());
        let mut navigator = NavigatorState::new(tree, router.current_location())
            .with_translations(translations);
        if config.start_minimized {
            if let Err(e) = navigator.handle_event(NavigatorEvent::SetMinimized(true)) {
                log::error!("Failed to apply start_minimized: {}", e);
            }
        }
        Self {
            navigator,
            router,
            viewport_width: config.breakpoint_width,
            config,
            mobile_nav_open: false,
            search_input: String::new(),
            status_message: "Ready".to_string(),
            should_quit: false,
            search_debouncer: None,
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot, config: NavConfig) -> Self {
        let router = Router::from_history(snapshot.history.clone());
        let location = Location::parse(&snapshot.location);
        let navigator = NavigatorState::restore(NavigatorParts {
            tree: snapshot.tree.clone(),
            translations: snapshot.translations.clone(),
            location,
            expanded: snapshot.expanded.clone(),
            minimized: snapshot.minimized,
            above_breakpoint: config.is_above_breakpoint(snapshot.viewport_width),
            open_flyout: snapshot.open_flyout.clone(),
            selection: snapshot.selection.clone(),
            query: snapshot.search_query.clone(),
            editing_search: snapshot.in_search_mode,
        });
        Self {
            navigator,
            router,
            config,
            viewport_width: snapshot.viewport_width,
            mobile_nav_open: snapshot.mobile_nav_open,
            search_input: snapshot.search_query.clone(),
            status_message: snapshot.status_message.clone(),
            should_quit: false,
            search_debouncer: None,
        }
    }

    /// Route search keystrokes through a debouncer instead of applying them immediately
    pub fn enable_debounced_search(&mut self, debouncer: Debouncer<String>) {
        self.search_debouncer = Some(debouncer);
    }

    /// Whether the sidebar occupies screen space
    pub fn sidebar_visible(&self) -> bool {
        self.navigator.is_above_breakpoint() || self.mobile_nav_open
    }

    /// Apply a command and return the actions it produced (already performed)
    pub fn apply_command(&mut self, command: Command) -> Result<Vec<NavAction>> {
        let actions = match command {
            Command::Quit => {
                self.should_quit = true;
                self.status_message = "Goodbye!".to_string();
                Vec::new()
            }
            Command::NavigateUp => self.send(NavigatorEvent::NavigateUp)?,
            Command::NavigateDown => self.send(NavigatorEvent::NavigateDown)?,
            Command::Activate => self.send(NavigatorEvent::ActivateSelected)?,
            Command::Toggle => self.send(NavigatorEvent::ToggleSelected)?,
            Command::ToggleMinimized => {
                let minimized = !self.navigator.is_minimized();
                self.status_message = if minimized {
                    "Sidebar minimized".to_string()
                } else {
                    "Sidebar expanded".to_string()
                };
                self.send(NavigatorEvent::SetMinimized(minimized))?
            }
            Command::ToggleMobileNav => {
                if self.navigator.is_above_breakpoint() {
                    self.status_message = "Mobile navigation is only used on narrow screens".to_string();
                } else {
                    self.mobile_nav_open = !self.mobile_nav_open;
                }
                Vec::new()
            }
            Command::CloseFlyout => self.send(NavigatorEvent::CloseFlyout)?,
            Command::Goto(target) => {
                let actions = vec![NavAction::Navigate(target)];
                self.perform(&actions)?;
                actions
            }
            Command::Back => {
                if self.router.back() {
                    self.navigator.sync_location(&self.router)?;
                    self.status_message = format!("Back to {}", self.router.current());
                } else {
                    self.status_message = "No previous page".to_string();
                }
                Vec::new()
            }
            Command::Resize(width) => {
                self.viewport_width = width;
                let above = self.config.is_above_breakpoint(width);
                if above {
                    self.mobile_nav_open = false;
                }
                self.send(NavigatorEvent::SetAboveBreakpoint(above))?
            }
            Command::StartSearch => {
                self.search_input.clear();
                self.send(NavigatorEvent::StartSearch)?
            }
            Command::SearchInput(ch) => {
                if self.navigator.is_searching() {
                    self.search_input.push(ch);
                    self.submit_search()?;
                }
                Vec::new()
            }
            Command::SearchBackspace => {
                if self.navigator.is_searching() {
                    self.search_input.pop();
                    self.submit_search()?;
                }
                Vec::new()
            }
            Command::AcceptSearch => {
                if let Some(debouncer) = self.search_debouncer.as_mut() {
                    debouncer.cancel();
                }
                let query = self.search_input.clone();
                self.send(NavigatorEvent::UpdateSearchQuery(query))?;
                self.send(NavigatorEvent::EndSearchKeepQuery)?
            }
            Command::EndSearch => {
                if let Some(debouncer) = self.search_debouncer.as_mut() {
                    debouncer.cancel();
                }
                self.search_input.clear();
                self.send(NavigatorEvent::EndSearch)?
            }
            Command::Sequence(commands) => {
                let mut actions = Vec::new();
                for command in commands {
                    actions.extend(self.apply_command(command)?);
                    if self.should_quit {
                        break;
                    }
                }
                actions
            }
        };
        Ok(actions)
    }

    /// Apply a debounced search query if it is still the latest one
    pub fn apply_search_delivery(&mut self, delivery: Debounced<String>) -> Result<bool> {
        let is_current = self
            .search_debouncer
            .as_ref()
            .map(|debouncer| debouncer.is_current(&delivery))
            .unwrap_or(true);
        if !is_current {
            log::debug!("Search: ignoring stale query '{}'", delivery.value);
            return Ok(false);
        }
        let outcome = self
            .navigator
            .handle_event(NavigatorEvent::UpdateSearchQuery(delivery.value))?;
        Ok(outcome.changed)
    }

    fn submit_search(&mut self) -> Result<()> {
        match self.search_debouncer.as_mut() {
            Some(debouncer) => {
                debouncer.schedule(self.search_input.clone());
            }
            None => {
                let query = self.search_input.clone();
                self.navigator.handle_event(NavigatorEvent::UpdateSearchQuery(query))?;
            }
        }
        Ok(())
    }

    fn send(&mut self, event: NavigatorEvent) -> Result<Vec<NavAction>> {
        let outcome = self.navigator.handle_event(event)?;
        self.perform(&outcome.actions)?;
        Ok(outcome.actions)
    }

    /// Carry out navigator side effects: route changes and closing the mobile drawer
    fn perform(&mut self, actions: &[NavAction]) -> Result<()> {
        for action in actions {
            match action {
                NavAction::Navigate(target) => {
                    if self.router.push(target) {
                        log::debug!("Router: pushed {}", target);
                    }
                    self.navigator.sync_location(&self.router)?;
                    self.status_message = format!("Navigated to {}", target);
                }
                NavAction::CloseMobileNav => {
                    self.mobile_nav_open = false;
                }
            }
        }
        Ok(())
    }
}

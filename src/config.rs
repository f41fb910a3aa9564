use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{NavError, Result};

/// Path of a JSON config file to load when none is given explicitly
pub const CONFIG_ENV: &str = "DASHBOARD_NAV_CONFIG";
/// Overrides `breakpoint_width`
pub const BREAKPOINT_ENV: &str = "DASHBOARD_NAV_BREAKPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Terminal columns at or above which the viewport counts as wide
    pub breakpoint_width: u16,
    pub sidebar_width: u16,
    pub minimized_width: u16,
    pub indent: usize,
    pub search_debounce_ms: u64,
    pub start_minimized: bool,
    pub initial_location: String,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: char,
    pub toggle_minimized: char,
    pub toggle_mobile_nav: char,
    pub back: char,
    pub search: char,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint_width: 100,
            sidebar_width: 32,
            minimized_width: 6,
            indent: 2,
            search_debounce_ms: 400,
            start_minimized: false,
            initial_location: "/".to_string(),
            keybindings: KeybindingConfig::default(),
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            toggle_minimized: 'm',
            toggle_mobile_nav: 'o',
            back: 'b',
            search: '/',
        }
    }
}

impl NavConfig {
    /// Load from `path`, else from `$DASHBOARD_NAV_CONFIG`, else defaults.
    /// `$DASHBOARD_NAV_BREAKPOINT` is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok();
        let mut config = match path.or(env_path.as_deref().map(Path::new)) {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load_from_file(path)?
            }
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(BREAKPOINT_ENV) {
            config.breakpoint_width = value
                .trim()
                .parse()
                .map_err(|e| NavError::Generic(format!("Invalid {}='{}': {}", BREAKPOINT_ENV, value, e)))?;
        }

        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn is_above_breakpoint(&self, width: u16) -> bool {
        width >= self.breakpoint_width
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

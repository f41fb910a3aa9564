use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::app::App;
use crate::error::Result;
use crate::providers::Translations;
use crate::tree::NavTree;

/// Serializable UI state, used by headless commands and rendering tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub tree: NavTree,
    pub translations: Translations,
    pub location: String,
    pub history: Vec<String>,
    pub expanded: Vec<String>,
    pub minimized: bool,
    pub viewport_width: u16,
    pub mobile_nav_open: bool,
    pub search_query: String,
    pub in_search_mode: bool,
    pub selection: Option<Vec<String>>,
    pub open_flyout: Option<String>,
    pub status_message: String,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tree: NavTree::sample(),
            translations: Translations::default(),
            location: "/users?role=TEACHER".to_string(),
            history: vec!["/".to_string(), "/users?role=TEACHER".to_string()],
            expanded: vec!["Users".to_string()],
            minimized: false,
            viewport_width: 120,
            mobile_nav_open: false,
            search_query: String::new(),
            in_search_mode: false,
            selection: Some(vec!["Users".to_string(), "Teachers".to_string()]),
            open_flyout: None,
            status_message: "Ready".to_string(),
        }
    }
}

impl Snapshot {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn from_app(app: &App) -> Self {
        let parts = app.navigator.to_parts();
        Snapshot {
            tree: parts.tree,
            translations: parts.translations,
            location: parts.location.to_string(),
            history: app.router.history().to_vec(),
            expanded: parts.expanded,
            minimized: parts.minimized,
            viewport_width: app.viewport_width,
            mobile_nav_open: app.mobile_nav_open,
            search_query: parts.query,
            in_search_mode: parts.editing_search,
            selection: parts.selection,
            open_flyout: parts.open_flyout,
            status_message: app.status_message.clone(),
        }
    }
}

//! Narrow interfaces the host application supplies to the navigation core.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::Result;
use crate::route::Location;

/// Glyph used when an item has no icon or the key is unknown
pub const DEFAULT_ICON: &str = "•";

/// Source of the current route
pub trait LocationProvider {
    fn current_location(&self) -> Location;
}

/// Fixed location, for headless use and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation(pub Location);

impl LocationProvider for StaticLocation {
    fn current_location(&self) -> Location {
        self.0.clone()
    }
}

/// Key based string lookup. `fallback` is returned when the key is unknown.
#[cfg_attr(test, mockall::automock)]
pub trait Translator {
    fn translate(&self, key: &str, fallback: &str) -> String;
}

/// Flat key to string table, loaded from a JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: BTreeMap<String, String>,
}

impl Translations {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Translations {
    fn translate(&self, key: &str, fallback: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Icon key resolution
pub trait IconRegistry {
    fn resolve(&self, key: &str) -> Option<&str>;
}

lazy_static! {
    static ref BUILTIN_ICONS: HashMap<&'static str, &'static str> = {
        let mut icons = HashMap::new();
        icons.insert("dashboard", "▦");
        icons.insert("book", "▤");
        icons.insert("media", "▶");
        icons.insert("users", "☺");
        icons.insert("payments", "$");
        icons.insert("reports", "≡");
        icons.insert("school", "⌂");
        icons.insert("store", "◫");
        icons.insert("settings", "⚙");
        icons.insert("lock", "⊘");
        icons
    };
}

/// Icon table with the built-in terminal glyphs plus caller overrides
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    overrides: HashMap<String, String>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon(mut self, key: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), glyph.into());
        self
    }
}

impl IconRegistry for IconSet {
    fn resolve(&self, key: &str) -> Option<&str> {
        self.overrides
            .get(key)
            .map(String::as_str)
            .or_else(|| BUILTIN_ICONS.get(key).copied())
    }
}

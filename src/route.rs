//! Route matching between the current location and navigation targets.
//!
//! Matching is strict: paths must be equal, and an href only matches a
//! location carrying exactly the same query parameters (in any order).

use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Path and query string of the active route
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    /// Split `path?query` at the first `?`
    pub fn parse(path_and_query: &str) -> Self {
        let (path, query) = split_path_and_query(path_and_query);
        Self {
            path: path.to_string(),
            query: query.unwrap_or_default().to_string(),
        }
    }

    pub fn root() -> Self {
        Self::parse("/")
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether `href` is the active target for this location
    pub fn matches(&self, href: Option<&str>) -> bool {
        is_active(&self.to_string(), href)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Split at the first `?`. An empty query is reported as `None`.
pub fn split_path_and_query(value: &str) -> (&str, Option<&str>) {
    match value.split_once('?') {
        Some((path, query)) if !query.is_empty() => (path, Some(query)),
        Some((path, _)) => (path, None),
        None => (value, None),
    }
}

/// Decode a query string into key/value pairs.
///
/// Returns `None` when a pair has an empty key, which makes the query
/// unusable for matching.
pub fn parse_query(query: &str) -> Option<Vec<(String, String)>> {
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.iter().any(|(k, _)| k.is_empty()) {
        return None;
    }
    Some(pairs)
}

/// Decide whether `href` should be highlighted for `current`.
pub fn is_active(current: &str, href: Option<&str>) -> bool {
    let href = match href {
        Some(href) if !href.is_empty() => href,
        _ => return false,
    };

    let (current_path, current_query) = split_path_and_query(current);
    let (href_path, href_query) = split_path_and_query(href);

    if current_path != href_path {
        return false;
    }

    let href_query = match href_query {
        None => return current_query.is_none(),
        Some(q) => q,
    };
    let current_query = match current_query {
        None => return false,
        Some(q) => q,
    };

    let (mut href_pairs, mut current_pairs) = match (parse_query(href_query), parse_query(current_query)) {
        (Some(h), Some(c)) => (h, c),
        _ => {
            log::debug!("Route: unparsable query comparing '{}' with '{}'", current, href);
            return false;
        }
    };

    // Order-insensitive, but repeated pairs still count
    href_pairs.sort();
    current_pairs.sort();
    href_pairs == current_pairs
}

//! Request targets split into path, query and hash.

use serde::Serialize;
use std::fmt;

/// An in-app location: `path?query#hash`.
///
/// The path is never empty; a bare `?x=1` or `""` is treated as `/`.
/// `query` and `hash` are stored without their leading `?` / `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Path component, always starting with `/`
    pub path: String,
    /// Raw query string, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Fragment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Location {
    /// Split a raw request target into its parts.
    ///
    /// ```
    /// use viewrouter::Location;
    ///
    /// let loc = Location::parse("/dashboard/42?tab=info#top");
    /// assert_eq!(loc.path, "/dashboard/42");
    /// assert_eq!(loc.query.as_deref(), Some("tab=info"));
    /// assert_eq!(loc.hash.as_deref(), Some("top"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self { path, query, hash }
    }

    /// A location with no query or hash.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            hash: None,
        }
    }

    /// Take the query and hash from `other` where this location has none.
    ///
    /// Used when following a redirect whose target does not specify its own.
    #[must_use]
    pub fn inherit(mut self, other: &Location) -> Self {
        if self.query.is_none() {
            self.query = other.query.clone();
        }
        if self.hash.is_none() {
            self.hash = other.hash.clone();
        }
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(hash) = &self.hash {
            write!(f, "#{hash}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let loc = Location::parse("/users");
        assert_eq!(loc, Location::from_path("/users"));
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("?a=1").path, "/");
        assert_eq!(Location::parse("?a=1").query.as_deref(), Some("a=1"));
    }

    #[test]
    fn test_parse_relative_gets_leading_slash() {
        assert_eq!(Location::parse("users").path, "/users");
    }

    #[test]
    fn test_hash_may_contain_question_mark() {
        let loc = Location::parse("/a#frag?not-a-query");
        assert_eq!(loc.path, "/a");
        assert_eq!(loc.query, None);
        assert_eq!(loc.hash.as_deref(), Some("frag?not-a-query"));
    }

    #[test]
    fn test_display_rebuilds_target() {
        let raw = "/dashboard/7?tab=1#top";
        assert_eq!(Location::parse(raw).to_string(), raw);
    }

    #[test]
    fn test_inherit_keeps_own_parts() {
        let original = Location::parse("/?ref=mail#x");
        let target = Location::parse("/users?page=2").inherit(&original);
        assert_eq!(target.query.as_deref(), Some("page=2"));
        assert_eq!(target.hash.as_deref(), Some("x"));
    }
}

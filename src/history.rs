//! # History Module
//!
//! Push-state browser history anchored at a base path.
//!
//! The application is served under a base path taken from the environment at
//! start-up (see [`RuntimeConfig`](crate::runtime_config::RuntimeConfig)). In-app
//! locations never include the base; hrefs written to the address bar always do.
//!
//! ```
//! use viewrouter::history::WebHistory;
//!
//! let mut history = WebHistory::new("/app/");
//! assert_eq!(history.base(), "/app");
//! assert_eq!(history.create_href("/users"), "/app/users");
//! assert_eq!(
//!     history.strip_base("https://example.com/app/dashboard/42?tab=1").as_deref(),
//!     Some("/dashboard/42?tab=1")
//! );
//!
//! history.push("/users");
//! history.push("/dashboard/42");
//! assert_eq!(history.back(), Some("/users"));
//! assert_eq!(history.forward(), Some("/dashboard/42"));
//! ```

use tracing::{debug, warn};
use url::Url;

/// Normalize a base path: leading `/`, no trailing `/`; root becomes `""`.
///
/// A full URL base (`https://cdn.example.com/app/`) keeps only its path.
#[must_use]
pub fn normalize_base(base: &str) -> String {
    let base = base.trim();
    let path = if base.contains("://") {
        match Url::parse(base) {
            Ok(parsed) => parsed.path().to_string(),
            Err(err) => {
                warn!(base = %base, error = %err, "Unparseable base URL, using it as a path");
                base.to_string()
            }
        }
    } else {
        base.to_string()
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// History entry stack with a cursor, plus the base path.
#[derive(Debug, Clone)]
pub struct WebHistory {
    base: String,
    entries: Vec<String>,
    position: usize,
}

impl Default for WebHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl WebHistory {
    /// Create a history at the given base with a single `/` entry.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            entries: vec!["/".to_string()],
            position: 0,
        }
    }

    /// Normalized base path; empty when the app is served from the root.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The current in-app location.
    #[must_use]
    pub fn location(&self) -> &str {
        // position is always kept within entries, which is never empty
        &self.entries[self.position]
    }

    /// Cursor position in the entry stack.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its initial entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prefix an in-app location with the base.
    #[must_use]
    pub fn create_href(&self, location: &str) -> String {
        if location.starts_with('/') {
            format!("{}{}", self.base, location)
        } else {
            format!("{}/{}", self.base, location)
        }
    }

    /// Turn an address-bar URL or path into an in-app location.
    ///
    /// Absolute `http(s)` URLs are reduced to path, query and fragment first.
    /// Returns `None` for anything outside the base.
    #[must_use]
    pub fn strip_base(&self, url: &str) -> Option<String> {
        let target = if url.contains("://") {
            match Url::parse(url) {
                Ok(parsed) => {
                    let mut target = parsed.path().to_string();
                    if let Some(query) = parsed.query() {
                        target.push('?');
                        target.push_str(query);
                    }
                    if let Some(fragment) = parsed.fragment() {
                        target.push('#');
                        target.push_str(fragment);
                    }
                    target
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "Unparseable URL");
                    return None;
                }
            }
        } else {
            url.to_string()
        };

        if self.base.is_empty() {
            return Some(if target.is_empty() {
                "/".to_string()
            } else {
                target
            });
        }

        let rest = target.strip_prefix(&self.base)?;
        if rest.is_empty() {
            Some("/".to_string())
        } else if rest.starts_with('/') {
            Some(rest.to_string())
        } else if rest.starts_with('?') || rest.starts_with('#') {
            Some(format!("/{rest}"))
        } else {
            // e.g. base `/app` and URL `/application`
            None
        }
    }

    /// Add an entry after the cursor, dropping any forward entries.
    pub fn push(&mut self, location: impl Into<String>) {
        let location = location.into();
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position = self.entries.len() - 1;
        debug!(
            location = %self.location(),
            position = self.position,
            "History push"
        );
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, location: impl Into<String>) {
        self.entries[self.position] = location.into();
        debug!(
            location = %self.location(),
            position = self.position,
            "History replace"
        );
    }

    /// The entry `delta` steps from the cursor, without moving.
    #[must_use]
    pub fn peek(&self, delta: isize) -> Option<&str> {
        let target = self.position.checked_add_signed(delta)?;
        self.entries.get(target).map(String::as_str)
    }

    /// Move the cursor by `delta`. Out-of-range moves do nothing and return `None`.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        debug!(
            location = %self.entries[target],
            position = target,
            delta,
            "History go"
        );
        Some(&self.entries[target])
    }

    /// Step back one entry.
    pub fn back(&mut self) -> Option<&str> {
        self.go(-1)
    }

    /// Step forward one entry.
    pub fn forward(&mut self) -> Option<&str> {
        self.go(1)
    }

    /// Whether [`back`](Self::back) would move.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    /// Whether [`forward`](Self::forward) would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base("app"), "/app");
        assert_eq!(normalize_base("/app/"), "/app");
        assert_eq!(normalize_base(" /a/b// "), "/a/b");
    }

    #[test]
    fn test_url_base_keeps_only_path() {
        assert_eq!(normalize_base("https://cdn.example.com/app/"), "/app");
        assert_eq!(normalize_base("https://cdn.example.com"), "");

        let history = WebHistory::new("https://cdn.example.com/app/");
        assert_eq!(history.base(), "/app");
        assert_eq!(history.create_href("/users"), "/app/users");
        assert_eq!(
            history.strip_base("https://cdn.example.com/app/users").as_deref(),
            Some("/users")
        );
    }

    #[test]
    fn test_root_base_hrefs() {
        let history = WebHistory::default();
        assert_eq!(history.create_href("/users"), "/users");
        assert_eq!(history.strip_base("/users").as_deref(), Some("/users"));
        assert_eq!(history.location(), "/");
    }

    #[test]
    fn test_strip_base_rejects_outside_paths() {
        let history = WebHistory::new("/app");
        assert_eq!(history.strip_base("/app").as_deref(), Some("/"));
        assert_eq!(history.strip_base("/app?x=1").as_deref(), Some("/?x=1"));
        assert_eq!(history.strip_base("/application"), None);
        assert_eq!(history.strip_base("/other/users"), None);
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = WebHistory::default();
        history.push("/a");
        history.push("/b");
        assert_eq!(history.back(), Some("/a"));
        history.push("/c");
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 3);
        assert_eq!(history.back(), Some("/a"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.location(), "/");
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut history = WebHistory::default();
        history.push("/a");
        history.replace("/b");
        assert_eq!(history.len(), 2);
        assert_eq!(history.position(), 1);
        assert_eq!(history.location(), "/b");
    }

    #[test]
    fn test_go_out_of_range_is_noop() {
        let mut history = WebHistory::default();
        history.push("/a");
        assert_eq!(history.go(5), None);
        assert_eq!(history.go(-5), None);
        assert_eq!(history.location(), "/a");
        assert_eq!(history.go(-1), Some("/"));
    }

    #[test]
    fn test_peek_does_not_move() {
        let mut history = WebHistory::default();
        history.push("/a");
        assert_eq!(history.peek(-1), Some("/"));
        assert_eq!(history.peek(1), None);
        assert_eq!(history.position(), 1);
    }
}

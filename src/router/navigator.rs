use std::sync::Arc;
use tracing::{info, warn};

use super::table::{Resolution, RouteMatch, RouteTable};
use crate::error::{NavigationError, RouteTableError};
use crate::history::WebHistory;
use crate::location::Location;
use crate::runtime_config::RuntimeConfig;

/// Default bound on redirect hops within one resolution.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Final outcome of a navigation, after redirects were followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A view route matched
    Matched(RouteMatch),
    /// Nothing matched; the caller decides what to show
    NoMatch(Location),
}

impl Resolved {
    /// The match, if any.
    #[must_use]
    pub fn matched(&self) -> Option<&RouteMatch> {
        match self {
            Resolved::Matched(m) => Some(m),
            Resolved::NoMatch(_) => None,
        }
    }

    /// Consume into the match, if any.
    #[must_use]
    pub fn into_matched(self) -> Option<RouteMatch> {
        match self {
            Resolved::Matched(m) => Some(m),
            Resolved::NoMatch(_) => None,
        }
    }
}

/// Resolves navigation against a shared [`RouteTable`] and keeps the history.
///
/// One `Router` is built by the application's composition root and handed to
/// whatever drives navigation. Navigation methods take `&mut self`, so two
/// resolutions never interleave; the table itself is shared read-only.
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    history: WebHistory,
    max_redirects: usize,
}

impl Router {
    /// Create a router over `table` using `history`.
    #[must_use]
    pub fn new(table: Arc<RouteTable>, history: WebHistory) -> Self {
        Self {
            table,
            history,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Create a router whose base path and redirect limit come from `config`.
    #[must_use]
    pub fn from_config(table: Arc<RouteTable>, config: &RuntimeConfig) -> Self {
        Self::new(table, WebHistory::new(&config.base_url)).with_max_redirects(config.max_redirects)
    }

    /// Override the redirect hop limit.
    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The navigation history.
    #[must_use]
    pub fn history(&self) -> &WebHistory {
        &self.history
    }

    /// Configured redirect hop limit.
    #[must_use]
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// The current in-app location.
    #[must_use]
    pub fn current(&self) -> &str {
        self.history.location()
    }

    /// Resolve a request target, following redirects.
    ///
    /// # Errors
    ///
    /// [`NavigationError::RedirectLoop`] if a redirect leads back to a path
    /// already visited, [`NavigationError::TooManyRedirects`] if the chain is
    /// longer than [`max_redirects`](Self::max_redirects).
    pub fn resolve(&self, raw: &str) -> Result<Resolved, NavigationError> {
        let start = Location::parse(raw);
        let mut current = start.clone();
        let mut chain = vec![current.path.clone()];
        let mut redirected_from: Option<Location> = None;

        loop {
            match self.table.match_location(&current) {
                Resolution::Matched(mut matched) => {
                    matched.redirected_from = redirected_from;
                    return Ok(Resolved::Matched(matched));
                }
                Resolution::NoMatch(location) => return Ok(Resolved::NoMatch(location)),
                Resolution::Redirect(redirect) => {
                    if chain.contains(&redirect.to.path) {
                        chain.push(redirect.to.path);
                        warn!(chain = ?chain, "Redirect loop detected");
                        return Err(NavigationError::RedirectLoop { chain });
                    }
                    if chain.len() > self.max_redirects {
                        warn!(
                            path = %start,
                            limit = self.max_redirects,
                            "Redirect limit exceeded"
                        );
                        return Err(NavigationError::TooManyRedirects {
                            path: start.to_string(),
                            limit: self.max_redirects,
                        });
                    }
                    chain.push(redirect.to.path.clone());
                    if redirected_from.is_none() {
                        redirected_from = Some(redirect.from);
                    }
                    current = redirect.to;
                }
            }
        }
    }

    /// Resolve an address-bar URL or path, stripping the base first.
    ///
    /// URLs outside the base resolve to [`Resolved::NoMatch`].
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn resolve_url(&self, url: &str) -> Result<Resolved, NavigationError> {
        match self.history.strip_base(url) {
            Some(location) => self.resolve(&location),
            None => {
                warn!(url = %url, base = %self.history.base(), "URL outside base path");
                Ok(Resolved::NoMatch(Location::parse(url)))
            }
        }
    }

    /// Resolve a named route with parameters.
    ///
    /// # Errors
    ///
    /// Unknown names and missing parameters are reported as
    /// [`NavigationError::Route`].
    pub fn resolve_named<I, K, V>(&self, name: &str, params: I) -> Result<Resolved, NavigationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = self.table.href_for(name, params)?;
        self.resolve(&path)
    }

    /// Full href (base included) for a named route.
    ///
    /// # Errors
    ///
    /// As [`RouteTable::href_for`].
    pub fn href_for<I, K, V>(&self, name: &str, params: I) -> Result<String, RouteTableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Ok(self.history.create_href(&self.table.href_for(name, params)?))
    }

    /// Full href (base included) of a match.
    #[must_use]
    pub fn href(&self, matched: &RouteMatch) -> String {
        self.history.create_href(&matched.location.to_string())
    }

    /// Navigate to `raw`, adding a history entry on a match.
    ///
    /// The entry records the final location after redirects. A no-match
    /// leaves history untouched.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn push(&mut self, raw: &str) -> Result<Resolved, NavigationError> {
        let resolved = self.resolve(raw)?;
        if let Resolved::Matched(matched) = &resolved {
            self.history.push(matched.location.to_string());
            info!(
                location = %matched.location,
                route = %matched.name,
                "Navigated"
            );
        }
        Ok(resolved)
    }

    /// Navigate to `raw`, overwriting the current history entry on a match.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn replace(&mut self, raw: &str) -> Result<Resolved, NavigationError> {
        let resolved = self.resolve(raw)?;
        if let Resolved::Matched(matched) = &resolved {
            self.history.replace(matched.location.to_string());
            info!(
                location = %matched.location,
                route = %matched.name,
                "Navigated (replace)"
            );
        }
        Ok(resolved)
    }

    /// Move `delta` entries through history and resolve the location there.
    ///
    /// Returns `Ok(None)` when the move is out of range. The cursor only moves
    /// once the location there has resolved.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve); the history position is unchanged.
    pub fn go(&mut self, delta: isize) -> Result<Option<Resolved>, NavigationError> {
        let Some(location) = self.history.peek(delta).map(str::to_string) else {
            return Ok(None);
        };
        let resolved = self.resolve(&location)?;
        self.history.go(delta);
        Ok(Some(resolved))
    }

    /// Step back one history entry.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn back(&mut self) -> Result<Option<Resolved>, NavigationError> {
        self.go(-1)
    }

    /// Step forward one history entry.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn forward(&mut self) -> Result<Option<Resolved>, NavigationError> {
        self.go(1)
    }
}

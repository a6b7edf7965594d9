//! # Router Module
//!
//! Route declaration, matching and navigation.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling declared routes into an ordered [`RouteTable`]
//! - Matching request paths against it, first match wins
//! - Extracting named path parameters and deciding whether the view receives them
//! - Following redirects with a bounded hop count
//! - Recording navigation in a base-path-aware [`WebHistory`](crate::history::WebHistory)
//!
//! ## Architecture
//!
//! 1. **Compilation**: at start-up every [`RouteEntry`] is parsed into a
//!    [`PathPattern`] and validated. Malformed patterns, duplicate names and bad
//!    redirect targets fail here, never at navigation time.
//!
//! 2. **Matching**: [`RouteTable::match_location`] walks the entries in
//!    declaration order and returns the first [`Resolution`]: a match, a
//!    redirect instruction, or no match.
//!
//! 3. **Navigation**: [`Router`] restarts matching on redirect targets until a
//!    view matches, nothing matches, or the redirect guard trips.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use viewrouter::history::WebHistory;
//! use viewrouter::router::{RouteEntry, RouteTable, Router};
//!
//! let table = RouteTable::new(vec![
//!     RouteEntry::view("/users", "users", "UsersView"),
//!     RouteEntry::redirect("/", "/users"),
//! ])
//! .unwrap();
//! let router = Router::new(Arc::new(table), WebHistory::new("/"));
//!
//! let resolved = router.resolve("/").unwrap();
//! let matched = resolved.matched().unwrap();
//! assert_eq!(matched.view.as_str(), "UsersView");
//! assert_eq!(matched.redirected_from.as_ref().map(|l| l.path.as_str()), Some("/"));
//! ```

mod entry;
mod navigator;
mod pattern;
mod table;

pub use entry::{RouteEntry, ViewId};
pub use navigator::{Resolved, Router, DEFAULT_MAX_REDIRECTS};
pub use pattern::{ParamVec, PathPattern, Segment, MAX_INLINE_PARAMS};
pub use table::{Redirect, Resolution, Route, RouteMatch, RouteTable};

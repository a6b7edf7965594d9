//! # viewrouter
//!
//! **viewrouter** is the client-side route table for a web front-end: it maps
//! URL paths to page views, extracts named path parameters, follows redirects
//! and keeps a push-state history anchored at a configurable base path.
//!
//! ## Architecture
//!
//! - **[`router`]** - Route declarations, the ordered [`RouteTable`], and the
//!   navigating [`Router`]
//! - **[`history`]** - Base-path-aware push-state history
//! - **[`location`]** - Request targets split into path, query and hash
//! - **[`routes`]** - The application's declared routes
//! - **[`loader`]** - Route declaration files (YAML, TOML, JSON)
//! - **[`runtime_config`]** - Environment configuration
//! - **[`logging`]** - `tracing-subscriber` initialization
//! - **[`cli`]** - The `viewrouter` command-line tool
//!
//! ### Navigation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host (link, address bar, code)
//!     participant Router
//!     participant Table as RouteTable
//!     participant History as WebHistory
//!
//!     Host->>Router: push("/")
//!     Router->>Table: match_location("/")
//!     Table-->>Router: Redirect { to: "/users" }
//!     Router->>Table: match_location("/users")
//!     Table-->>Router: Matched(UsersView)
//!     Router->>History: push("/users")
//!     Router-->>Host: Resolved::Matched
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use viewrouter::{routes, Resolved, Router, RuntimeConfig};
//!
//! let table = routes::app_table().unwrap();
//! let mut router = Router::from_config(Arc::new(table), &RuntimeConfig::default());
//!
//! match router.push("/dashboard/42").unwrap() {
//!     Resolved::Matched(m) => {
//!         assert_eq!(m.view.as_str(), "DashboardView");
//!         assert_eq!(m.props().get("userId").map(String::as_str), Some("42"));
//!     }
//!     Resolved::NoMatch(location) => panic!("no route for {location}"),
//! }
//! assert_eq!(router.current(), "/dashboard/42");
//! ```

pub mod cli;
pub mod error;
pub mod history;
pub mod loader;
pub mod location;
pub mod logging;
pub mod router;
pub mod routes;
pub mod runtime_config;

pub use error::{NavigationError, PatternError, RouteTableError};
pub use history::WebHistory;
pub use loader::{load_routes, LoadedRoutes};
pub use location::Location;
pub use router::{Resolution, Resolved, RouteEntry, RouteMatch, RouteTable, Router, ViewId};
pub use runtime_config::RuntimeConfig;

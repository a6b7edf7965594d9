//! # CLI Module
//!
//! Command-line access to the route table, for checking declarations and
//! resolving paths outside a browser host.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the table in precedence order:
//!
//! ```bash
//! viewrouter routes
//! viewrouter routes --routes routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve a path or address-bar URL, following redirects. Exits with status 1
//! when nothing matches.
//!
//! ```bash
//! viewrouter resolve /dashboard/42
//! viewrouter resolve https://example.com/app/ --base /app --json
//! ```
//!
//! ### `href`
//!
//! Build the href of a named route:
//!
//! ```bash
//! viewrouter href dashboard --param userId=42
//! ```
//!
//! ### `check`
//!
//! Validate a route file:
//!
//! ```bash
//! viewrouter check --routes routes.toml
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};

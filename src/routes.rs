//! The application's declared routes.

use crate::error::RouteTableError;
use crate::router::{RouteEntry, RouteTable};

/// View listing users.
pub const USERS_VIEW: &str = "UsersView";
/// Per-user dashboard view.
pub const DASHBOARD_VIEW: &str = "DashboardView";

/// Route declarations in precedence order.
///
/// | Path pattern | Name | Forwards params |
/// |---|---|---|
/// | `/users` | users | no |
/// | `/dashboard/:userId` | dashboard | yes |
/// | `/` | redirect to `/users` | - |
#[must_use]
pub fn app_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::view("/users", "users", USERS_VIEW),
        RouteEntry::with_params("/dashboard/:userId", "dashboard", DASHBOARD_VIEW),
        RouteEntry::redirect("/", "/users"),
    ]
}

/// Compile [`app_routes`] into a table.
///
/// # Errors
///
/// Only if the declarations above are edited into an invalid state.
pub fn app_table() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(app_routes())
}

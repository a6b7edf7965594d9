//! Route declarations.
//!
//! A [`RouteEntry`] is either a view (static or parameterized) or a redirect.
//! Because it is an enum, an entry can never carry both a view and a redirect
//! target, nor neither.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Identifier of the view a route renders (e.g. `UsersView`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(Arc<str>);

impl ViewId {
    /// Create a view identifier.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Serialize for ViewId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A single declared route, before validation.
///
/// Entries are compiled into a [`RouteTable`](super::RouteTable), which checks
/// patterns, names and redirect targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    /// A fixed path rendering a view. Never has parameters to forward.
    StaticView {
        /// Path pattern, without parameter segments
        path: String,
        /// Unique symbolic name
        name: String,
        /// View to render
        view: ViewId,
    },
    /// A path with named parameter segments rendering a view.
    ParameterizedView {
        /// Path pattern, e.g. `/dashboard/:userId`
        path: String,
        /// Unique symbolic name
        name: String,
        /// View to render
        view: ViewId,
        /// Whether bound parameters are passed to the view
        forward_params: bool,
    },
    /// A path that sends navigation elsewhere.
    Redirect {
        /// Path pattern of the source
        path: String,
        /// Optional unique symbolic name
        name: Option<String>,
        /// Target location; may reference the source's parameters as `:name`
        target: String,
    },
}

impl RouteEntry {
    /// Declare a static view route.
    #[must_use]
    pub fn view(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
        RouteEntry::StaticView {
            path: path.into(),
            name: name.into(),
            view: view.into(),
        }
    }

    /// Declare a parameterized view route that forwards its parameters.
    #[must_use]
    pub fn with_params(
        path: impl Into<String>,
        name: impl Into<String>,
        view: impl Into<ViewId>,
    ) -> Self {
        RouteEntry::ParameterizedView {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            forward_params: true,
        }
    }

    /// Declare a parameterized view route that keeps its parameters to itself.
    #[must_use]
    pub fn without_props(
        path: impl Into<String>,
        name: impl Into<String>,
        view: impl Into<ViewId>,
    ) -> Self {
        RouteEntry::ParameterizedView {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            forward_params: false,
        }
    }

    /// Declare an unnamed redirect.
    #[must_use]
    pub fn redirect(path: impl Into<String>, target: impl Into<String>) -> Self {
        RouteEntry::Redirect {
            path: path.into(),
            name: None,
            target: target.into(),
        }
    }

    /// Give a redirect entry a name. Other entries are returned unchanged.
    #[must_use]
    pub fn named(self, new_name: impl Into<String>) -> Self {
        match self {
            RouteEntry::Redirect { path, target, .. } => RouteEntry::Redirect {
                path,
                name: Some(new_name.into()),
                target,
            },
            other => other,
        }
    }

    /// The declared path pattern.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            RouteEntry::StaticView { path, .. }
            | RouteEntry::ParameterizedView { path, .. }
            | RouteEntry::Redirect { path, .. } => path,
        }
    }

    /// The symbolic name, if any. View routes always have one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            RouteEntry::StaticView { name, .. } | RouteEntry::ParameterizedView { name, .. } => {
                Some(name)
            }
            RouteEntry::Redirect { name, .. } => name.as_deref(),
        }
    }

    /// The view rendered, for view routes.
    #[must_use]
    pub fn view_id(&self) -> Option<&ViewId> {
        match self {
            RouteEntry::StaticView { view, .. } | RouteEntry::ParameterizedView { view, .. } => {
                Some(view)
            }
            RouteEntry::Redirect { .. } => None,
        }
    }

    /// Whether matched parameters are forwarded to the view.
    #[must_use]
    pub fn forwards_params(&self) -> bool {
        matches!(
            self,
            RouteEntry::ParameterizedView {
                forward_params: true,
                ..
            }
        )
    }

    /// The redirect target, for redirect routes.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            RouteEntry::Redirect { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEntry::StaticView { path, name, view } => {
                write!(f, "{path} -> {view} ({name})")
            }
            RouteEntry::ParameterizedView {
                path,
                name,
                view,
                forward_params,
            } => {
                write!(f, "{path} -> {view} ({name}")?;
                if *forward_params {
                    f.write_str(", props")?;
                }
                f.write_str(")")
            }
            RouteEntry::Redirect { path, name, target } => {
                write!(f, "{path} => {target}")?;
                if let Some(name) = name {
                    write!(f, " ({name})")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_per_variant() {
        let users = RouteEntry::view("/users", "users", "UsersView");
        assert_eq!(users.name(), Some("users"));
        assert_eq!(users.view_id().map(ViewId::as_str), Some("UsersView"));
        assert!(!users.forwards_params());
        assert_eq!(users.redirect_target(), None);

        let dashboard = RouteEntry::with_params("/dashboard/:userId", "dashboard", "DashboardView");
        assert!(dashboard.forwards_params());

        let root = RouteEntry::redirect("/", "/users");
        assert_eq!(root.name(), None);
        assert_eq!(root.view_id(), None);
        assert_eq!(root.redirect_target(), Some("/users"));
        assert_eq!(root.named("home").name(), Some("home"));
    }

    #[test]
    fn test_display() {
        let dashboard = RouteEntry::with_params("/dashboard/:userId", "dashboard", "DashboardView");
        assert_eq!(
            dashboard.to_string(),
            "/dashboard/:userId -> DashboardView (dashboard, props)"
        );
        assert_eq!(RouteEntry::redirect("/", "/users").to_string(), "/ => /users");
    }
}

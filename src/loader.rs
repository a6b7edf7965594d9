//! Route declaration files.
//!
//! Routes can be declared in YAML (`.yaml`/`.yml`), TOML (`.toml`) or JSON:
//!
//! ```yaml
//! base: /app
//! max_redirects: 5
//! routes:
//!   - path: /users
//!     name: users
//!     view: UsersView
//!   - path: /dashboard/:userId
//!     name: dashboard
//!     view: DashboardView
//!     props: true
//!   - path: /
//!     redirect: /users
//! ```
//!
//! Each declaration must have exactly one of `view` or `redirect`. A view
//! without parameter segments and without `props` is a static view.

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::router::{PathPattern, RouteEntry, RouteTable, ViewId};

/// One route as written in a file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteDecl {
    /// Path pattern
    pub path: String,
    /// Symbolic name; required for views
    #[serde(default)]
    pub name: Option<String>,
    /// View identifier
    #[serde(default)]
    pub view: Option<String>,
    /// Redirect target
    #[serde(default)]
    pub redirect: Option<String>,
    /// Forward matched parameters to the view
    #[serde(default)]
    pub props: Option<bool>,
}

impl RouteDecl {
    /// Convert into a typed [`RouteEntry`].
    ///
    /// # Errors
    ///
    /// Fails when both or neither of `view`/`redirect` are given, when a view
    /// has no name, when a redirect sets `props`, or when the path is malformed.
    pub fn into_entry(self) -> anyhow::Result<RouteEntry> {
        let RouteDecl {
            path,
            name,
            view,
            redirect,
            props,
        } = self;

        match (view, redirect) {
            (Some(_), Some(_)) => bail!("route '{path}' declares both a view and a redirect"),
            (None, None) => bail!("route '{path}' declares neither a view nor a redirect"),
            (None, Some(target)) => {
                if props.is_some() {
                    bail!("redirect route '{path}' cannot set props");
                }
                Ok(RouteEntry::Redirect {
                    path,
                    name,
                    target,
                })
            }
            (Some(view), None) => {
                let name = name.ok_or_else(|| anyhow!("view route '{path}' has no name"))?;
                let pattern = PathPattern::parse(&path)?;
                let view = ViewId::from(view);
                match props {
                    None if !pattern.has_params() => Ok(RouteEntry::StaticView { path, name, view }),
                    props => Ok(RouteEntry::ParameterizedView {
                        path,
                        name,
                        view,
                        forward_params: props.unwrap_or(false),
                    }),
                }
            }
        }
    }
}

/// Contents of a route file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteFile {
    /// Base path override
    #[serde(default)]
    pub base: Option<String>,
    /// Redirect hop limit override
    #[serde(default)]
    pub max_redirects: Option<usize>,
    /// Declarations in precedence order
    pub routes: Vec<RouteDecl>,
}

impl RouteFile {
    /// Parse file contents, choosing the format from the file extension.
    ///
    /// Unknown extensions are read as YAML.
    ///
    /// # Errors
    ///
    /// Returns the parser's error.
    pub fn parse(content: &str, file_name: &str) -> anyhow::Result<Self> {
        let file = if file_name.ends_with(".toml") {
            toml::from_str(content)?
        } else if file_name.ends_with(".json") {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };
        Ok(file)
    }

    /// Compile the declarations into a table.
    ///
    /// # Errors
    ///
    /// Reports the first invalid declaration with its index.
    pub fn to_table(&self) -> anyhow::Result<RouteTable> {
        let entries = self
            .routes
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, decl)| decl.into_entry().with_context(|| format!("route #{i}")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(RouteTable::new(entries)?)
    }
}

/// A route file compiled and ready to use.
#[derive(Debug, Clone)]
pub struct LoadedRoutes {
    /// The compiled table
    pub table: RouteTable,
    /// Base path from the file, if set
    pub base: Option<String>,
    /// Redirect limit from the file, if set
    pub max_redirects: Option<usize>,
}

/// Read, parse and compile a route file.
///
/// # Errors
///
/// Fails if the file cannot be read, does not parse, or declares an invalid
/// table.
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<LoadedRoutes> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route file {}", path.display()))?;
    let file = RouteFile::parse(&content, &path.to_string_lossy())
        .with_context(|| format!("Failed to parse route file {}", path.display()))?;
    let table = file
        .to_table()
        .with_context(|| format!("Invalid routes in {}", path.display()))?;

    info!(
        file = %path.display(),
        routes_count = table.len(),
        "Route file loaded"
    );

    Ok(LoadedRoutes {
        table,
        base: file.base,
        max_redirects: file.max_redirects,
    })
}

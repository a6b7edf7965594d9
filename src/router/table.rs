//! The route table: ordered, validated, immutable.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::entry::{RouteEntry, ViewId};
use super::pattern::{ParamVec, PathPattern};
use crate::error::RouteTableError;
use crate::location::Location;

/// Where a redirect entry sends navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RedirectTarget {
    pattern: PathPattern,
    query: Option<String>,
    hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Render,
    Redirect(RedirectTarget),
}

/// A compiled table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    index: usize,
    entry: RouteEntry,
    pattern: PathPattern,
    name: Option<Arc<str>>,
    action: Action,
}

impl Route {
    /// Declaration index, which is also matching precedence.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The declaration this route was compiled from.
    #[must_use]
    pub fn entry(&self) -> &RouteEntry {
        &self.entry
    }

    /// The parsed path pattern.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The symbolic name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this route redirects instead of rendering a view.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self.action, Action::Redirect(_))
    }
}

/// A successful match against a view route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Name of the matched route
    #[serde(serialize_with = "serialize_arc_str")]
    pub name: Arc<str>,
    /// View to render
    pub view: ViewId,
    /// Pattern of the matched route
    pub pattern: String,
    /// The location that matched, after any redirects
    pub location: Location,
    /// Bound path parameters in pattern order
    #[serde(serialize_with = "serialize_params")]
    pub params: ParamVec,
    /// Whether `params` are forwarded to the view
    pub forward_params: bool,
    /// The first location that redirected here, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<Location>,
}

impl RouteMatch {
    /// Get a bound parameter by name.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// The parameters handed to the view.
    ///
    /// Empty when the route does not forward parameters, even if its pattern
    /// bound some.
    #[must_use]
    pub fn props(&self) -> HashMap<String, String> {
        if !self.forward_params {
            return HashMap::new();
        }
        self.params_map()
    }

    /// All bound parameters as a map, regardless of forwarding.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

fn serialize_arc_str<S: Serializer>(value: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value)
}

fn serialize_params<S: Serializer>(params: &ParamVec, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (k, v) in params {
        map.serialize_entry(&**k, v)?;
    }
    map.end()
}

/// A single-step redirect instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// The location that was requested
    pub from: Location,
    /// Where to continue matching
    pub to: Location,
    /// Name of the redirect entry, if it has one
    pub route: Option<Arc<str>>,
}

/// Outcome of matching one location against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A view route matched
    Matched(RouteMatch),
    /// A redirect route matched; matching should restart at the target
    Redirect(Redirect),
    /// Nothing matched
    NoMatch(Location),
}

/// Ordered route table. The first matching entry wins.
///
/// Built once from declarations and read-only afterwards; share it with
/// `Arc<RouteTable>`.
///
/// # Example
///
/// ```
/// use viewrouter::router::{Resolution, RouteEntry, RouteTable};
///
/// let table = RouteTable::new(vec![
///     RouteEntry::view("/users", "users", "UsersView"),
///     RouteEntry::with_params("/dashboard/:userId", "dashboard", "DashboardView"),
///     RouteEntry::redirect("/", "/users"),
/// ])
/// .unwrap();
///
/// match table.match_path("/dashboard/42") {
///     Resolution::Matched(m) => assert_eq!(m.param("userId"), Some("42")),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_name: HashMap<Arc<str>, usize>,
}

impl RouteTable {
    /// Validate and compile declarations, preserving their order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed pattern, duplicate or empty name,
    /// parameterized static route, or invalid redirect target.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        let mut routes = Vec::with_capacity(entries.len());
        let mut by_name: HashMap<Arc<str>, usize> = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let route = compile(index, entry)?;

            if let Some(name) = &route.name {
                if let Some(&first) = by_name.get(name) {
                    return Err(RouteTableError::DuplicateName {
                        name: name.to_string(),
                        first,
                        second: index,
                    });
                }
                by_name.insert(Arc::clone(name), index);
            }
            routes.push(route);
        }

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| r.entry.to_string())
            .collect();

        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Route table loaded"
        );

        Ok(Self { routes, by_name })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compiled entries in declaration order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Whether an entry with this name exists.
    #[must_use]
    pub fn has_route(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&i| &self.routes[i])
    }

    /// All path patterns, in declaration order.
    #[must_use]
    pub fn path_patterns(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.pattern.as_str()).collect()
    }

    /// Print all entries to stdout.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!("[route] #{} {}", route.index, route.entry);
        }
    }

    /// Match a raw request target (`path?query#hash`) against the table.
    #[must_use]
    pub fn match_path(&self, raw: &str) -> Resolution {
        self.match_location(&Location::parse(raw))
    }

    /// Match a location against the table.
    ///
    /// Entries are tried in declaration order and the first whose pattern
    /// matches decides the outcome. Redirects are not followed here.
    #[must_use]
    pub fn match_location(&self, location: &Location) -> Resolution {
        debug!(path = %location.path, "Route match attempt");
        let match_start = Instant::now();

        for route in &self.routes {
            let Some(params) = route.pattern.matches(&location.path) else {
                continue;
            };
            let match_duration = match_start.elapsed();

            match &route.action {
                Action::Render => {
                    let (name, view, forward_params) = match &route.entry {
                        RouteEntry::StaticView { view, .. } => (route.name.clone(), view, false),
                        RouteEntry::ParameterizedView {
                            view,
                            forward_params,
                            ..
                        } => (route.name.clone(), view, *forward_params),
                        // Redirect entries always compile to Action::Redirect
                        RouteEntry::Redirect { .. } => continue,
                    };
                    let Some(name) = name else { continue };

                    if match_duration > Duration::from_millis(1) {
                        warn!(
                            path = %location.path,
                            route = %name,
                            duration_us = match_duration.as_micros(),
                            "Slow route matching detected"
                        );
                    }
                    info!(
                        path = %location.path,
                        route = %name,
                        view = %view,
                        route_pattern = %route.pattern,
                        params = ?params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );

                    return Resolution::Matched(RouteMatch {
                        name,
                        view: view.clone(),
                        pattern: route.pattern.as_str().to_string(),
                        location: location.clone(),
                        params,
                        forward_params,
                        redirected_from: None,
                    });
                }
                Action::Redirect(target) => {
                    let lookup = |name: &str| {
                        params
                            .iter()
                            .find(|(k, _)| k.as_ref() == name)
                            .map(|(_, v)| v.clone())
                    };
                    // Target params were checked against the source pattern
                    // at build time, so every lookup succeeds.
                    let path = match target.pattern.build(lookup) {
                        Ok(path) => path,
                        Err(param) => {
                            warn!(
                                path = %location.path,
                                param = %param,
                                "Redirect target parameter unbound"
                            );
                            return Resolution::NoMatch(location.clone());
                        }
                    };
                    let to = Location {
                        path,
                        query: target.query.clone(),
                        hash: target.hash.clone(),
                    }
                    .inherit(location);

                    debug!(
                        from = %location,
                        to = %to,
                        route_pattern = %route.pattern,
                        "Redirect matched"
                    );

                    return Resolution::Redirect(Redirect {
                        from: location.clone(),
                        to,
                        route: route.name.clone(),
                    });
                }
            }
        }

        warn!(
            path = %location.path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        Resolution::NoMatch(location.clone())
    }

    /// Build the path for a named view route.
    ///
    /// # Errors
    ///
    /// Fails if no route has this name, if it is a redirect, or if a
    /// parameter of its pattern has no value in `params`.
    pub fn href_for<I, K, V>(&self, name: &str, params: I) -> Result<String, RouteTableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = self.route(name).ok_or_else(|| RouteTableError::UnknownRoute {
            name: name.to_string(),
        })?;
        if route.is_redirect() {
            return Err(RouteTableError::NamedRedirect {
                name: name.to_string(),
            });
        }

        let params: Vec<(K, V)> = params.into_iter().collect();
        route
            .pattern
            .build(|param| {
                params
                    .iter()
                    .rev()
                    .find(|(k, _)| k.as_ref() == param)
                    .map(|(_, v)| v.as_ref().to_string())
            })
            .map_err(|param| RouteTableError::MissingParam {
                name: name.to_string(),
                param,
            })
    }
}

fn compile(index: usize, entry: RouteEntry) -> Result<Route, RouteTableError> {
    let pattern = PathPattern::parse(entry.path())
        .map_err(|source| RouteTableError::Pattern { index, source })?;

    let name = match entry.name() {
        Some("") => return Err(RouteTableError::EmptyName { index }),
        Some(name) => Some(Arc::<str>::from(name)),
        None => None,
    };

    let action = match &entry {
        RouteEntry::StaticView { name, .. } => {
            if pattern.has_params() {
                return Err(RouteTableError::ParamsInStaticRoute {
                    name: name.clone(),
                    pattern: pattern.as_str().to_string(),
                });
            }
            Action::Render
        }
        RouteEntry::ParameterizedView { .. } => Action::Render,
        RouteEntry::Redirect { target, .. } => {
            Action::Redirect(compile_target(index, &pattern, target)?)
        }
    };

    Ok(Route {
        index,
        entry,
        pattern,
        name,
        action,
    })
}

fn compile_target(
    index: usize,
    source: &PathPattern,
    target: &str,
) -> Result<RedirectTarget, RouteTableError> {
    let invalid = || RouteTableError::InvalidRedirectTarget {
        pattern: source.as_str().to_string(),
        target: target.to_string(),
    };

    if !target.starts_with('/') {
        return Err(invalid());
    }
    let location = Location::parse(target);
    let pattern = PathPattern::parse(&location.path).map_err(|err| {
        debug!(route_index = index, error = %err, "Rejected redirect target");
        invalid()
    })?;

    if let Some(param) = pattern
        .param_names()
        .find(|p| !source.param_names().any(|s| s == *p))
    {
        return Err(RouteTableError::UnknownRedirectParam {
            pattern: source.as_str().to_string(),
            target: target.to_string(),
            param: param.to_string(),
        });
    }

    Ok(RedirectTarget {
        pattern,
        query: location.query,
        hash: location.hash,
    })
}

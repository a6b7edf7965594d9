//! Error types for route declaration and navigation.
//!
//! Configuration defects are reported while the [`RouteTable`](crate::router::RouteTable)
//! is being built so that a bad declaration fails at start-up, never at navigation
//! time. A path that matches nothing is not an error; it is reported as
//! [`Resolution::NoMatch`](crate::router::Resolution::NoMatch).

use thiserror::Error;

/// A path pattern could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Patterns are absolute paths.
    #[error("pattern '{pattern}' must start with '/'")]
    NotAbsolute {
        /// The offending pattern
        pattern: String,
    },

    /// A parameter segment such as `:` or `{}` with no name.
    #[error("pattern '{pattern}' has a parameter segment with an empty name")]
    EmptyParamName {
        /// The offending pattern
        pattern: String,
    },

    /// Parameter names must be identifiers (`[A-Za-z_][A-Za-z0-9_]*`).
    #[error("pattern '{pattern}' has an invalid parameter name '{name}'")]
    InvalidParamName {
        /// The offending pattern
        pattern: String,
        /// The rejected name
        name: String,
    },

    /// The same parameter name appears twice in one pattern.
    #[error("pattern '{pattern}' binds parameter '{name}' more than once")]
    DuplicateParam {
        /// The offending pattern
        pattern: String,
        /// The repeated name
        name: String,
    },
}

/// A route declaration was rejected while building the table, or a named
/// route could not be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    /// The entry's path pattern is malformed.
    #[error("route #{index}: {source}")]
    Pattern {
        /// Declaration index of the entry
        index: usize,
        /// Underlying pattern defect
        #[source]
        source: PatternError,
    },

    /// Two entries share a symbolic name.
    #[error("route name '{name}' is declared more than once (entries #{first} and #{second})")]
    DuplicateName {
        /// The colliding name
        name: String,
        /// Index of the first declaration
        first: usize,
        /// Index of the second declaration
        second: usize,
    },

    /// Route names must not be empty.
    #[error("route #{index} has an empty name")]
    EmptyName {
        /// Declaration index of the entry
        index: usize,
    },

    /// A static view was declared with parameter segments.
    #[error("static route '{name}' has parameter segments in '{pattern}'")]
    ParamsInStaticRoute {
        /// Route name
        name: String,
        /// The pattern that carries parameters
        pattern: String,
    },

    /// Redirect targets must be absolute paths.
    #[error("redirect from '{pattern}' has invalid target '{target}'")]
    InvalidRedirectTarget {
        /// Source pattern
        pattern: String,
        /// Rejected target
        target: String,
    },

    /// A redirect target references a parameter the source pattern does not bind.
    #[error("redirect from '{pattern}' to '{target}' references unknown parameter '{param}'")]
    UnknownRedirectParam {
        /// Source pattern
        pattern: String,
        /// Redirect target
        target: String,
        /// The unbound parameter
        param: String,
    },

    /// No entry carries the requested name.
    #[error("no route named '{name}'")]
    UnknownRoute {
        /// Requested name
        name: String,
    },

    /// A named route was requested without a value for one of its parameters.
    #[error("route '{name}' requires parameter '{param}'")]
    MissingParam {
        /// Route name
        name: String,
        /// Parameter without a value
        param: String,
    },

    /// Redirect entries have no path of their own to build.
    #[error("route '{name}' is a redirect and has no view")]
    NamedRedirect {
        /// Route name
        name: String,
    },
}

/// Resolution of a navigation request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// A redirect led back to a path already visited in the same resolution.
    #[error("redirect loop detected: {}", chain.join(" -> "))]
    RedirectLoop {
        /// Every path visited, ending with the repeated one
        chain: Vec<String>,
    },

    /// The redirect chain exceeded the configured hop limit.
    #[error("more than {limit} redirects while resolving '{path}'")]
    TooManyRedirects {
        /// The path the navigation started from
        path: String,
        /// Configured hop limit
        limit: usize,
    },

    /// Named navigation failed to build a path.
    #[error(transparent)]
    Route(#[from] RouteTableError),
}

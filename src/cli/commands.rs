use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::history::WebHistory;
use crate::loader::load_routes;
use crate::router::{Resolved, RouteTable, Router};
use crate::routes::app_table;
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for viewrouter
///
/// Loads a route table (the built-in application routes unless a route file
/// is given) and resolves paths against it.
#[derive(Parser)]
#[command(name = "viewrouter")]
#[command(about = "Client-side route table inspector", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "VIEWROUTER_LOG_LEVEL")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the route table
    Routes {
        /// Route file (YAML, TOML or JSON); defaults to the built-in routes
        #[arg(short, long)]
        routes: Option<PathBuf>,
    },
    /// Resolve a path or URL, following redirects
    Resolve {
        /// Path (`/dashboard/42`) or URL (`https://host/base/dashboard/42`)
        path: String,

        /// Route file (YAML, TOML or JSON); defaults to the built-in routes
        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Base path; overrides the route file and VIEWROUTER_BASE_URL
        #[arg(short, long)]
        base: Option<String>,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build the href of a named route
    Href {
        /// Route name
        name: String,

        /// Parameter value as `name=value`; repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Route file (YAML, TOML or JSON); defaults to the built-in routes
        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Base path; overrides the route file and VIEWROUTER_BASE_URL
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Validate a route file
    Check {
        /// Route file to validate
        #[arg(short, long)]
        routes: PathBuf,
    },
}

/// Parse a `name=value` pair.
pub(crate) fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

/// Build the router the way a host application's composition root would:
/// route file settings override the environment, flags override both.
pub(crate) fn build_router(routes: Option<&PathBuf>, base: Option<&str>) -> anyhow::Result<Router> {
    let mut config = RuntimeConfig::from_env();

    let table = match routes {
        Some(path) => {
            let loaded = load_routes(path)?;
            if let Some(file_base) = loaded.base {
                config.base_url = file_base;
            }
            if let Some(limit) = loaded.max_redirects {
                config.max_redirects = limit;
            }
            loaded.table
        }
        None => app_table().context("Built-in routes are invalid")?,
    };

    if let Some(base) = base {
        config.base_url = base.to_string();
    }

    Ok(Router::from_config(Arc::new(table), &config))
}

fn print_table(table: &RouteTable, history: &WebHistory) {
    println!(
        "base: {}",
        if history.base().is_empty() {
            "/"
        } else {
            history.base()
        }
    );
    table.dump_routes();
}

/// Run a parsed command.
///
/// Returns [`ExitCode::FAILURE`] when `resolve` finds no match.
///
/// # Errors
///
/// Route file, route table and navigation errors are returned with context.
pub fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Routes { routes } => {
            let router = build_router(routes.as_ref(), None)?;
            print_table(router.table(), router.history());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve {
            path,
            routes,
            base,
            json,
        } => {
            let router = build_router(routes.as_ref(), base.as_deref())?;
            let resolved = router
                .resolve_url(&path)
                .with_context(|| format!("Failed to resolve '{path}'"))?;

            match resolved {
                Resolved::Matched(matched) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&matched)?);
                    } else {
                        println!("view: {}", matched.view);
                        println!("route: {}", matched.name);
                        println!("href: {}", router.href(&matched));
                        if let Some(from) = &matched.redirected_from {
                            println!("redirected_from: {from}");
                        }
                        for (name, value) in &matched.params {
                            println!("param: {name}={value}");
                        }
                        println!("props: {}", matched.forward_params);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Resolved::NoMatch(location) => {
                    if json {
                        println!(
                            "{}",
                            serde_json::json!({ "no_match": location.to_string() })
                        );
                    } else {
                        println!("no match: {location}");
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Href {
            name,
            params,
            routes,
            base,
        } => {
            let router = build_router(routes.as_ref(), base.as_deref())?;
            let href = router.href_for(&name, params)?;
            println!("{href}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { routes } => {
            let loaded = load_routes(&routes)?;
            println!(
                "{}: {} routes OK",
                routes.display(),
                loaded.table.len()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

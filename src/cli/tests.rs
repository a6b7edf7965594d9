//! Unit tests for CLI commands

use crate::cli::commands::{build_router, parse_param};
use crate::cli::{run_cli, Cli, Commands};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tempfile::NamedTempFile;

const ROUTES_WITH_BASE: &str = r#"
base: /app
routes:
  - path: /users
    name: users
    view: UsersView
  - path: /
    redirect: /users
"#;

fn routes_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(ROUTES_WITH_BASE.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> ExitCode {
    run_cli(Cli::try_parse_from(args).unwrap()).unwrap()
}

fn same_code(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{actual:?}") == format!("{expected:?}")
}

#[test]
fn test_resolve_command_with_flags() {
    let cli = Cli::try_parse_from([
        "viewrouter",
        "resolve",
        "/dashboard/42",
        "--base",
        "/app",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            path,
            routes,
            base,
            json,
        } => {
            assert_eq!(path, "/dashboard/42");
            assert!(routes.is_none());
            assert_eq!(base.as_deref(), Some("/app"));
            assert!(json);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_href_command_collects_params() {
    let cli = Cli::try_parse_from([
        "viewrouter",
        "href",
        "dashboard",
        "--param",
        "userId=42",
        "-p",
        "tab=info",
    ])
    .unwrap();

    match cli.command {
        Commands::Href { name, params, .. } => {
            assert_eq!(name, "dashboard");
            assert_eq!(
                params,
                vec![
                    ("userId".to_string(), "42".to_string()),
                    ("tab".to_string(), "info".to_string()),
                ]
            );
        }
        _ => panic!("Expected Href command"),
    }
}

#[test]
fn test_bad_param_rejected() {
    assert!(Cli::try_parse_from(["viewrouter", "href", "dashboard", "--param", "userId"]).is_err());
    assert!(parse_param("=42").is_err());
    assert_eq!(
        parse_param("q=a=b"),
        Ok(("q".to_string(), "a=b".to_string()))
    );
}

#[test]
fn test_check_requires_routes() {
    assert!(Cli::try_parse_from(["viewrouter", "check"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["viewrouter", "routes"],
        vec!["viewrouter", "routes", "--routes", "routes.yaml"],
        vec!["viewrouter", "resolve", "/"],
        vec!["viewrouter", "href", "users"],
        vec!["viewrouter", "check", "--routes", "routes.toml"],
        vec!["viewrouter", "--log-level", "debug", "routes"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_resolve_exit_codes() {
    assert!(same_code(
        run(&["viewrouter", "resolve", "/unknown"]),
        ExitCode::FAILURE
    ));
    assert!(same_code(run(&["viewrouter", "resolve", "/"]), ExitCode::SUCCESS));
    assert!(same_code(
        run(&["viewrouter", "resolve", "/dashboard/42", "--json"]),
        ExitCode::SUCCESS
    ));
}

#[test]
fn test_resolve_against_route_file() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();
    assert!(same_code(
        run(&["viewrouter", "resolve", "/app/users", "--routes", path]),
        ExitCode::SUCCESS
    ));
    assert!(same_code(
        run(&["viewrouter", "resolve", "/users", "--routes", path]),
        ExitCode::FAILURE
    ));
}

#[test]
fn test_base_flag_overrides_route_file() {
    let file = routes_file();

    let from_file = build_router(Some(&file.path().to_path_buf()), None).unwrap();
    assert_eq!(from_file.history().base(), "/app");

    let overridden = build_router(Some(&file.path().to_path_buf()), Some("/x")).unwrap();
    assert_eq!(overridden.history().base(), "/x");
    assert_eq!(overridden.href_for("users", Vec::<(&str, &str)>::new()).unwrap(), "/x/users");
}

#[test]
fn test_href_and_check_commands_succeed() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();
    assert!(same_code(
        run(&["viewrouter", "href", "dashboard", "--param", "userId=42"]),
        ExitCode::SUCCESS
    ));
    assert!(same_code(
        run(&["viewrouter", "check", "--routes", path]),
        ExitCode::SUCCESS
    ));
    assert!(run_cli(Cli::try_parse_from(["viewrouter", "href", "dashboard"]).unwrap()).is_err());
}

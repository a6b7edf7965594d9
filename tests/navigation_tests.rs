use std::sync::Arc;

use viewrouter::router::{Resolved, Router};
use viewrouter::routes::app_table;
use viewrouter::{NavigationError, RouteTableError, RuntimeConfig};

fn router_at(base: &str) -> Router {
    let config = RuntimeConfig {
        base_url: base.to_string(),
        ..RuntimeConfig::default()
    };
    Router::from_config(Arc::new(app_table().unwrap()), &config)
}

fn view_of(resolved: Option<Resolved>) -> Option<String> {
    resolved
        .and_then(Resolved::into_matched)
        .map(|m| m.view.to_string())
}

#[test]
fn test_back_and_forward_reresolve() {
    let mut router = router_at("/");
    router.push("/users").unwrap();
    router.push("/dashboard/1").unwrap();
    router.push("/dashboard/2").unwrap();
    assert_eq!(router.history().len(), 4);

    let back = router.back().unwrap().and_then(Resolved::into_matched).unwrap();
    assert_eq!(back.param("userId"), Some("1"));
    assert_eq!(router.current(), "/dashboard/1");

    assert_eq!(view_of(router.back().unwrap()).as_deref(), Some("UsersView"));
    // initial entry is "/", which redirects to the users view
    assert_eq!(view_of(router.back().unwrap()).as_deref(), Some("UsersView"));
    assert!(router.back().unwrap().is_none());

    let forward = router.go(3).unwrap().and_then(Resolved::into_matched).unwrap();
    assert_eq!(forward.param("userId"), Some("2"));
    assert!(router.forward().unwrap().is_none());
}

#[test]
fn test_push_after_back_drops_forward_entries() {
    let mut router = router_at("/");
    router.push("/dashboard/1").unwrap();
    router.push("/dashboard/2").unwrap();
    router.back().unwrap();
    router.push("/users").unwrap();
    assert!(!router.history().can_go_forward());
    assert_eq!(router.history().len(), 3);
}

#[test]
fn test_replace_overwrites_current_entry() {
    let mut router = router_at("/");
    router.push("/dashboard/1").unwrap();
    router.replace("/").unwrap();
    assert_eq!(router.current(), "/users");
    assert_eq!(router.history().len(), 2);
}

#[test]
fn test_hrefs_include_base() {
    let router = router_at("/app/");
    assert_eq!(router.history().base(), "/app");
    assert_eq!(
        router.href_for("dashboard", [("userId", "42")]).unwrap(),
        "/app/dashboard/42"
    );

    let matched = router.resolve("/").unwrap().into_matched().unwrap();
    assert_eq!(router.href(&matched), "/app/users");
}

#[test]
fn test_direct_url_entry_under_base() {
    let router = router_at("/app");
    let matched = router
        .resolve_url("https://example.com/app/dashboard/42?tab=1")
        .unwrap()
        .into_matched()
        .unwrap();
    assert_eq!(matched.param("userId"), Some("42"));
    assert_eq!(matched.location.query.as_deref(), Some("tab=1"));

    let root = router.resolve_url("/app").unwrap().into_matched().unwrap();
    assert_eq!(root.location.path, "/users");

    assert!(matches!(
        router.resolve_url("/elsewhere/users").unwrap(),
        Resolved::NoMatch(_)
    ));
}

#[test]
fn test_named_navigation_errors() {
    let router = router_at("/");
    assert_eq!(
        router.resolve_named("profile", Vec::<(&str, &str)>::new()),
        Err(NavigationError::Route(RouteTableError::UnknownRoute {
            name: "profile".to_string(),
        }))
    );
    assert!(matches!(
        router.resolve_named("dashboard", [("user", "1")]),
        Err(NavigationError::Route(RouteTableError::MissingParam { .. }))
    ));
}

#[test]
fn test_max_redirects_from_config() {
    let config = RuntimeConfig {
        max_redirects: 0,
        ..RuntimeConfig::default()
    };
    let router = Router::from_config(Arc::new(app_table().unwrap()), &config);
    assert_eq!(router.max_redirects(), 0);
    assert!(matches!(
        router.resolve("/"),
        Err(NavigationError::TooManyRedirects { limit: 0, .. })
    ));
    assert!(router.resolve("/users").unwrap().matched().is_some());
}

use super::{PathHandler, Router, STANDARD_METHODS};
use crate::context::RequestContext;
use crate::handler::handler_fn;
use crate::path::PatternError;
use crate::server::{BufferedResponse, Request, ResponseSink};
use http::{Method, StatusCode};

fn noop() -> impl crate::handler::Handler {
    handler_fn(|_ctx, _req, _res| {})
}

#[test]
fn test_route_registration_order() {
    let mut router = Router::new();
    router.get("/a", noop()).unwrap();
    router.use_middleware(noop());
    router.sub_router("/b").unwrap();
    assert_eq!(router.entries_len(), 3);
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let mut router = Router::new();
    assert_eq!(
        router.get("users", noop()).unwrap_err(),
        PatternError::MissingLeadingSlash
    );
    assert!(router.sub_router("/a(b").is_err());
    assert_eq!(router.entries_len(), 0);
}

#[test]
fn test_local_path() {
    let mut router = Router::new();
    let child = router.sub_router("/api").unwrap();
    assert_eq!(child.local_path("/api/users"), "/users");
    assert_eq!(child.local_path("/api"), "/");
    assert_eq!(child.local_path("/other"), "/other");
}

#[test]
fn test_nested_mount_paths() {
    let mut router = Router::new();
    let api = router.sub_router("/api").unwrap();
    let v1 = api.sub_router("/v1/").unwrap();
    assert_eq!(v1.mount_path(), "/api/v1");
}

#[test]
fn test_children_of_mounted_router_extend_mount_path() {
    let mut inner = Router::new();
    inner.sub_router("/admin").unwrap();

    let mut outer = Router::new();
    let mounted = outer.mount("/api", inner).unwrap();
    assert_eq!(mounted.mount_path(), "/api");

    let users = mounted.sub_router("/users").unwrap();
    assert_eq!(users.mount_path(), "/api/users");
    assert_eq!(users.local_path("/api/users/7"), "/7");
}

#[test]
fn test_sub_router_inherits_strict_slash() {
    let mut router = Router::new();
    router.set_strict_slash(true).set_error_handler(crate::StandardErrorHandler);
    let child = router.sub_router("/api").unwrap();
    assert!(child.strict_slash());
    assert!(!child.has_error_handler());
    assert!(!child.panic_recovery());
}

#[test]
fn test_mounted_router_matches_prefix() {
    let mut router = Router::new();
    let child = router.sub_router("/api").unwrap();
    assert!(PathHandler::is_match(&*child, "/api/anything"));
    assert!(!PathHandler::is_match(&*child, "/web"));
}

#[test]
fn test_route_all_methods() {
    let mut router = Router::new();
    let route = router.all("/x", noop()).unwrap();
    for method in &STANDARD_METHODS {
        assert_eq!(route.handlers_for(method).len(), 1, "{method}");
    }
    assert!(route.handlers_for(&Method::from_bytes(b"PURGE").unwrap()).is_empty());
}

#[test]
fn test_route_rest_fills_only_missing_methods() {
    let mut router = Router::new();
    let route = router.get("/x", noop()).unwrap();
    route.post(noop()).rest(noop());
    assert_eq!(route.handlers_for(&Method::GET).len(), 1);
    assert_eq!(route.handlers_for(&Method::POST).len(), 1);
    for method in [Method::HEAD, Method::TRACE, Method::CONNECT, Method::DELETE] {
        assert_eq!(route.handlers_for(&method).len(), 1, "{method}");
    }

    route.rest(noop());
    for method in &STANDARD_METHODS {
        assert_eq!(route.handlers_for(method).len(), 1, "{method}");
    }
}

#[test]
fn test_route_chains_several_handlers_per_method() {
    let mut router = Router::new();
    let route = router.get("/x", noop()).unwrap();
    route.get(noop()).middleware(noop()).middleware(noop());
    assert_eq!(route.handlers_for(&Method::GET).len(), 2);
    assert_eq!(route.middleware_len(), 2);
    assert!(route.handlers_for(&Method::POST).is_empty());
}

#[test]
fn test_dispatch_without_match_leaves_response_untouched() {
    let router = Router::new();
    let mut ctx = RequestContext::new();
    let mut res = BufferedResponse::new();
    router.dispatch(&mut ctx, &Request::new(Method::GET, "/"), &mut res);
    assert!(!res.has_written());
    assert!(!ctx.has_error());
}

#[test]
fn test_error_handler_receives_not_found() {
    let mut router = Router::new();
    router.set_error_handler(crate::StandardErrorHandler);
    let mut ctx = RequestContext::new();
    let mut res = BufferedResponse::new();
    router.dispatch(&mut ctx, &Request::new(Method::GET, "/missing"), &mut res);
    assert_eq!(res.status(), Some(StatusCode::NOT_FOUND));
    assert!(ctx.is_error_handled());
}

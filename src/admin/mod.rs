//! Introspection endpoints.
//!
//! Read-only views over the compiled route table and process metadata.
//! They are registered ahead of the dispatch fallback, so a `GET` on a
//! document path that collides with `/mocky/*` is shadowed by the built-in.
//! Any other method on these paths still goes to the dispatcher.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::{dispatch_handler, AppState};

/// Built-in routes. `/` is only served when the document has no root route.
pub fn setup_admin_router(serve_root: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/mocky/info", get(get_info).fallback(dispatch_handler))
        .route("/mocky/health", get(get_health).fallback(dispatch_handler))
        .route("/mocky/routes", get(get_routes).fallback(dispatch_handler))
        .route("/mocky/metrics", get(get_metrics).fallback(dispatch_handler));

    if serve_root {
        router.route("/", get(get_root).fallback(dispatch_handler))
    } else {
        router
    }
}

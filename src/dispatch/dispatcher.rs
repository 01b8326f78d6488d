//! Request dispatch.
//!
//! # Responsibilities
//! - Match an inbound method + path against the route table
//! - Select and render the route's response
//! - Map misses to 404 and rendering failures to 500
//!
//! # Design Decisions
//! - Holds the only owned `RouteTable`; everyone else borrows it via `Arc`
//! - Path parameters affect matching only; examples are played back verbatim
//! - Never panics on a bad request: every outcome is a `RenderedResponse`

use std::sync::Arc;

use crate::dispatch::render::{render, RenderedResponse};
use crate::dispatch::selector::select;
use crate::routing::router::RouteTable;

/// Result of one dispatch, with the route it hit for logs and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Path template of the matched route, `None` on a miss.
    pub route: Option<String>,
    pub response: RenderedResponse,
}

impl Dispatched {
    /// Metric label for the matched route.
    pub fn route_label(&self) -> &str {
        self.route.as_deref().unwrap_or("unmatched")
    }
}

/// Stateless dispatcher over an immutable route table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Read-only view of the compiled routes.
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// Dispatch a request using the default selection policy.
    pub fn handle(&self, method: &str, path: &str) -> RenderedResponse {
        self.dispatch(method, path, None).response
    }

    /// Dispatch a request, optionally asking for a specific status key.
    pub fn dispatch(&self, method: &str, path: &str, preferred_status: Option<&str>) -> Dispatched {
        let Some(matched) = self.table.match_request(method, path) else {
            tracing::warn!(method = %method, path = %path, "No route matched");
            return Dispatched {
                route: None,
                response: RenderedResponse::not_found(&method.to_ascii_uppercase(), path),
            };
        };

        let route = matched.route;
        tracing::debug!(
            route = %route.label(),
            params = ?matched.params,
            "Route matched"
        );

        let response = match render(select(route, preferred_status)) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(route = %route.label(), error = %e, "Failed to render response");
                RenderedResponse::internal_error()
            }
        };

        Dispatched {
            route: Some(route.template.to_string()),
            response,
        }
    }
}

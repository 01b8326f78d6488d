//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the introspection endpoints and the dispatch fallback
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener
//! - Hand every non-builtin request to the Dispatcher
//! - Wrap each dispatch with telemetry

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::{InfoConfig, MockyConfig};
use crate::dispatch::Dispatcher;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::lifecycle::shutdown;
use crate::observability::Telemetry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub telemetry: Telemetry,
    pub info: Arc<InfoConfig>,
}

/// HTTP server for the mock API.
pub struct HttpServer {
    router: Router,
    config: MockyConfig,
}

impl HttpServer {
    /// Create a new HTTP server over a compiled dispatcher.
    pub fn new(config: MockyConfig, dispatcher: Dispatcher, telemetry: Telemetry) -> Self {
        let state = AppState {
            dispatcher,
            telemetry,
            info: Arc::new(config.info.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &MockyConfig, state: AppState) -> Router {
        let serve_root = !state.dispatcher.table().has_root();

        setup_admin_router(serve_root)
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &MockyConfig {
        &self.config
    }
}

/// Fallback handler: everything not built in is a mocked operation.
pub(crate) async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let path = uri.path();

    tracing::debug!(
        request_id = %headers.request_id(),
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let dispatched = state
        .dispatcher
        .dispatch(method.as_str(), path, headers.preferred_status());

    state.telemetry.record_dispatch(
        method.as_str(),
        dispatched.route_label(),
        dispatched.response.status,
        started,
    );

    dispatched.response.into_response()
}

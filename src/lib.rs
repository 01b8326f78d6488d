//! Mocky: an OpenAPI 3 mock server.
//!
//! Compiles an OpenAPI document into an immutable route table at startup and
//! plays back the documented examples for matching requests.

pub mod admin;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod spec;

pub use config::MockyConfig;
pub use dispatch::{Dispatcher, RenderedResponse};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{compile, RouteTable};

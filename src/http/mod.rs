//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, status override header)
//!     → admin routes (/, /mocky/*) or Dispatcher fallback
//!     → response.rs (RenderedResponse → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_MOCKY_STATUS, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

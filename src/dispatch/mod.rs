//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! (method, path, optional status override)
//!     → dispatcher.rs (RouteTable lookup)
//!     → selector.rs (pick a ResponseTemplate or the built-in fallback)
//!     → render.rs (status, content type, body bytes)
//!     → RenderedResponse → transport
//! ```
//!
//! # Design Decisions
//! - Pure per-request functions over shared immutable data
//! - No I/O, no locks, no ordering between requests

pub mod dispatcher;
pub mod render;
pub mod selector;

pub use dispatcher::{Dispatched, Dispatcher};
pub use render::{RenderError, RenderedResponse};
pub use selector::{select, Selection};

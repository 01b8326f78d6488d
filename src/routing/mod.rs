//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     OpenAPI document (serde_json::Value)
//!     → compiler.rs (walk `paths`, parse templates, collect responses)
//!     → template.rs (Literal / Param segments)
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (method, path)
//!     → router.rs (route lookup in table order)
//!     → Return: RouteMatch (route + path params) or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (document order)

pub mod compiler;
pub mod route;
pub mod router;
pub mod template;

pub use compiler::{compile, SpecError};
pub use route::{ResponseTemplate, Route};
pub use router::{RouteMatch, RouteTable};
pub use template::{PathTemplate, Segment};

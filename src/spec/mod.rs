//! Spec loading subsystem.
//!
//! # Data Flow
//! ```text
//! spec file (JSON/YAML)
//!     → loader.rs (read, pick format by extension or content, parse)
//!     → serde_json::Value (document order preserved)
//!     → routing::compile
//! ```
//!
//! The document tree is transient: it is dropped once the route table is built.

pub mod loader;

pub use loader::{load_document, SpecFormat, SpecLoadError};

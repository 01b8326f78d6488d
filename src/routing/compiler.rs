//! OpenAPI document → RouteTable compilation.
//!
//! # Responsibilities
//! - Validate the document shape (`openapi` version, `paths` object)
//! - Parse every path key into a [`PathTemplate`]
//! - Build one [`Route`] per method key with its response templates
//!
//! # Design Decisions
//! - Pure function of the document: no I/O, no global state
//! - Paths and methods are visited in document order
//! - Only the first `content` entry of a response is used; there is no
//!   content negotiation
//! - Duplicate `(method, template)` pairs collapse last-wins

use serde_json::{Map, Value};

use crate::routing::route::{is_valid_status_key, normalize_method, ResponseTemplate, Route};
use crate::routing::router::RouteTable;
use crate::routing::template::{PathTemplate, TemplateError};

/// Path-item fields that are not operations.
const PATH_ITEM_FIELDS: [&str; 5] = ["summary", "description", "servers", "parameters", "$ref"];

/// A structurally invalid OpenAPI document.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("document root is not an object")]
    NotAnObject,
    #[error("unsupported OpenAPI version '{0}' (expected 3.x)")]
    UnsupportedVersion(String),
    #[error("document has no 'paths' object")]
    MissingPaths,
    #[error("'paths' is not an object")]
    InvalidPaths,
    #[error("path '{0}' is not an object of operations")]
    InvalidPathItem(String),
    #[error("{method} {path}: {reason}")]
    InvalidOperation {
        method: String,
        path: String,
        reason: String,
    },
    #[error("invalid path template '{path}': {source}")]
    InvalidTemplate {
        path: String,
        #[source]
        source: TemplateError,
    },
    #[error("{method} {path}: invalid response status '{status}'")]
    InvalidStatus {
        method: String,
        path: String,
        status: String,
    },
}

/// Compile a parsed OpenAPI document into a route table.
pub fn compile(document: &Value) -> Result<RouteTable, SpecError> {
    let root = document.as_object().ok_or(SpecError::NotAnObject)?;
    check_version(root)?;

    let paths = root
        .get("paths")
        .ok_or(SpecError::MissingPaths)?
        .as_object()
        .ok_or(SpecError::InvalidPaths)?;

    let mut table = RouteTable::default();
    for (raw_path, item) in paths {
        let template = PathTemplate::parse(raw_path).map_err(|source| SpecError::InvalidTemplate {
            path: raw_path.clone(),
            source,
        })?;
        let item = item
            .as_object()
            .ok_or_else(|| SpecError::InvalidPathItem(raw_path.clone()))?;

        tracing::debug!(path = %raw_path, "Registering path");

        for (key, operation) in item {
            let Some(method) = normalize_method(key) else {
                if !PATH_ITEM_FIELDS.contains(&key.as_str()) && !key.starts_with("x-") {
                    tracing::warn!(path = %raw_path, key = %key, "Skipping unknown path item key");
                }
                continue;
            };

            let route = compile_operation(method, &template, operation)?;
            tracing::debug!(
                method = method,
                path = %raw_path,
                responses = route.responses.len(),
                "Registering method"
            );

            if let Some(replaced) = table.insert(route) {
                tracing::warn!(
                    route = %replaced.label(),
                    "Duplicate route identity; later definition wins"
                );
            }
        }
    }

    Ok(table)
}

fn check_version(root: &Map<String, Value>) -> Result<(), SpecError> {
    if let Some(swagger) = root.get("swagger") {
        return Err(SpecError::UnsupportedVersion(scalar_text(swagger)));
    }
    match root.get("openapi") {
        Some(version) => {
            let version = scalar_text(version);
            if version.starts_with("3.") {
                Ok(())
            } else {
                Err(SpecError::UnsupportedVersion(version))
            }
        }
        None => {
            tracing::warn!("Document has no 'openapi' version field; assuming 3.x");
            Ok(())
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compile_operation(
    method: &str,
    template: &PathTemplate,
    operation: &Value,
) -> Result<Route, SpecError> {
    let invalid = |reason: &str| SpecError::InvalidOperation {
        method: method.to_string(),
        path: template.to_string(),
        reason: reason.to_string(),
    };

    let operation = operation
        .as_object()
        .ok_or_else(|| invalid("operation is not an object"))?;

    let summary = operation
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let responses = match operation.get("responses") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(responses)) => responses
            .iter()
            .map(|(status, response)| compile_response(method, template, status, response))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(invalid("'responses' is not an object")),
    };

    Ok(Route {
        method: method.to_string(),
        template: template.clone(),
        summary,
        responses,
    })
}

fn compile_response(
    method: &str,
    template: &PathTemplate,
    status: &str,
    response: &Value,
) -> Result<ResponseTemplate, SpecError> {
    if !is_valid_status_key(status) {
        return Err(SpecError::InvalidStatus {
            method: method.to_string(),
            path: template.to_string(),
            status: status.to_string(),
        });
    }

    // `$ref` responses and responses without content carry no body.
    let first_content = response
        .get("content")
        .and_then(Value::as_object)
        .and_then(|content| content.iter().next());

    let (content_type, example) = match first_content {
        Some((media_type, media)) => (Some(media_type.clone()), media_example(media)),
        None => (None, None),
    };

    Ok(ResponseTemplate {
        status_code: status.to_string(),
        content_type,
        example,
    })
}

/// `example` wins; otherwise the `value` of the first named example.
fn media_example(media: &Value) -> Option<Value> {
    if let Some(example) = media.get("example") {
        return Some(example.clone());
    }
    media
        .get("examples")
        .and_then(Value::as_object)
        .and_then(|examples| examples.values().next())
        .and_then(|example| example.get("value"))
        .cloned()
}

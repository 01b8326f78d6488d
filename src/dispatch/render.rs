//! Rendering selected templates into transport-neutral responses.

use serde_json::{json, Value};

use crate::dispatch::selector::Selection;
use crate::routing::route::ResponseTemplate;

pub const APPLICATION_JSON: &str = "application/json";

/// A response ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl RenderedResponse {
    /// JSON response with a serialized body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some(APPLICATION_JSON.to_string()),
            body: Some(body.to_string().into_bytes()),
        }
    }

    /// 404 naming the request that missed.
    pub fn not_found(method: &str, path: &str) -> Self {
        Self::json(
            404,
            &json!({ "error": "Not Found", "method": method, "path": path }),
        )
    }

    /// Generic 500; details go to the log, not the client.
    pub fn internal_error() -> Self {
        Self::json(500, &json!({ "error": "Internal Server Error" }))
    }
}

/// A template that could not be turned into a response.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("status key '{0}' does not map to an HTTP status")]
    InvalidStatus(String),
    #[error("failed to serialize example: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render the selector's decision.
pub fn render(selection: Selection<'_>) -> Result<RenderedResponse, RenderError> {
    match selection {
        Selection::Fallback => Ok(RenderedResponse::json(200, &json!({}))),
        Selection::Template(template) => render_template(template),
    }
}

fn render_template(template: &ResponseTemplate) -> Result<RenderedResponse, RenderError> {
    let status = status_from_key(&template.status_code)
        .ok_or_else(|| RenderError::InvalidStatus(template.status_code.clone()))?;

    let body = match &template.example {
        Some(example) => Some(encode_example(example, template.content_type.as_deref())?),
        None => None,
    };

    Ok(RenderedResponse {
        status,
        content_type: template.content_type.clone(),
        body,
    })
}

/// `"404"` → 404, `"4XX"` → 400, `"default"` → 200.
///
/// Informational codes are `None`: they cannot be sent as a final response.
pub fn status_from_key(key: &str) -> Option<u16> {
    if key == "default" {
        return Some(200);
    }
    let status = match key.as_bytes() {
        [class @ b'1'..=b'5', rest @ ..] if rest.eq_ignore_ascii_case(b"XX") => {
            u16::from(class - b'0') * 100
        }
        _ => key.parse().ok()?,
    };
    (200..=599).contains(&status).then_some(status)
}

fn is_json(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == APPLICATION_JSON || essence.ends_with("+json")
}

fn encode_example(example: &Value, content_type: Option<&str>) -> Result<Vec<u8>, RenderError> {
    match example {
        Value::String(text) if !is_json(content_type) => Ok(text.clone().into_bytes()),
        other => Ok(serde_json::to_vec(other)?),
    }
}

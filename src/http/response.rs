//! Response conversion.
//!
//! # Responsibilities
//! - Turn a transport-neutral `RenderedResponse` into an axum `Response`
//!
//! # Design Decisions
//! - Content type header only when the template declared one
//! - An unrepresentable content type is dropped with a warning, not a 500

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::dispatch::RenderedResponse;

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        let body = self.body.map(Body::from).unwrap_or_else(Body::empty);
        let mut response = Response::new(body);
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let Some(content_type) = self.content_type {
            match HeaderValue::from_str(&content_type) {
                Ok(value) => {
                    response.headers_mut().insert(header::CONTENT_TYPE, value);
                }
                Err(_) => {
                    tracing::warn!(content_type = %content_type, "Dropping invalid content type");
                }
            }
        }
        response
    }
}

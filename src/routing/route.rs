//! Compiled route records.

use serde::Serialize;
use serde_json::Value;

use crate::routing::template::PathTemplate;

/// HTTP methods an OpenAPI path item can declare.
pub const HTTP_METHODS: [&str; 8] = [
    "GET", "PUT", "POST", "DELETE", "OPTIONS", "HEAD", "PATCH", "TRACE",
];

/// Normalize a method name to upper case, returning `None` for non-methods.
pub fn normalize_method(name: &str) -> Option<&'static str> {
    HTTP_METHODS
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(name))
}

/// The status code conventionally returned on success for a method.
pub fn success_status(method: &str) -> Option<&'static str> {
    match method {
        "POST" => Some("201"),
        "GET" | "PUT" | "PATCH" | "DELETE" => Some("200"),
        _ => None,
    }
}

/// Whether a `responses` key is one the compiler accepts:
/// a concrete code (100-599), a range (`2XX`), or `default`.
pub fn is_valid_status_key(key: &str) -> bool {
    if key == "default" {
        return true;
    }
    let bytes = key.as_bytes();
    if bytes.len() != 3 || !(b'1'..=b'5').contains(&bytes[0]) {
        return false;
    }
    let rest = &bytes[1..];
    rest.iter().all(u8::is_ascii_digit) || rest.eq_ignore_ascii_case(b"XX")
}

/// A response an operation can play back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTemplate {
    /// Key it was registered under (`"200"`, `"4XX"`, `"default"`).
    pub status_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// One compiled `(method, path template)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub method: String,
    pub template: PathTemplate,
    pub summary: String,
    /// Response templates in document order; keys are unique.
    pub responses: Vec<ResponseTemplate>,
}

impl Route {
    /// Look up a response template by its status key.
    pub fn response(&self, status_code: &str) -> Option<&ResponseTemplate> {
        self.responses.iter().find(|r| r.status_code == status_code)
    }

    /// Whether this route and `other` would answer the same requests.
    pub fn same_identity(&self, other: &Route) -> bool {
        self.method == other.method && self.template.same_shape(&other.template)
    }

    /// Label used in logs and metrics, e.g. `GET /items/{id}`.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method("get"), Some("GET"));
        assert_eq!(normalize_method("Patch"), Some("PATCH"));
        assert_eq!(normalize_method("parameters"), None);
        assert_eq!(normalize_method("x-internal"), None);
    }

    #[test]
    fn test_success_status() {
        assert_eq!(success_status("GET"), Some("200"));
        assert_eq!(success_status("POST"), Some("201"));
        assert_eq!(success_status("DELETE"), Some("200"));
        assert_eq!(success_status("OPTIONS"), None);
    }

    #[test]
    fn test_status_keys() {
        for key in ["200", "201", "404", "599", "2XX", "4xx", "default"] {
            assert!(is_valid_status_key(key), "{key} should be valid");
        }
        for key in ["", "20", "2000", "600", "099", "OK", "DEFAULT", "2X0"] {
            assert!(!is_valid_status_key(key), "{key} should be invalid");
        }
    }
}

//! Path templates.
//!
//! # Responsibilities
//! - Decompose an OpenAPI path (`/items/{id}`) into ordered segments
//! - Reject malformed brace usage at compile time
//! - Match request paths segment by segment, binding parameters
//!
//! # Design Decisions
//! - A segment is a parameter only when it is wrapped in braces as a whole
//! - Literal comparison is verbatim (case-sensitive, no decoding)
//! - The root path has zero segments; `""` and `"/"` are both root

use std::collections::HashMap;
use std::fmt;

/// One piece of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// Reason a raw path could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unmatched '{brace}' in segment '{segment}'")]
    UnmatchedBrace { segment: String, brace: char },
    #[error("nested braces in segment '{0}'")]
    NestedBraces(String),
    #[error("empty parameter name in segment '{0}'")]
    EmptyParam(String),
}

/// A parsed route path. Segments are immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a raw OpenAPI path string.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let segments = split_path(raw)
            .into_iter()
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;

        let raw = if raw.is_empty() { "/".to_string() } else { raw.to_string() };
        Ok(Self { raw, segments })
    }

    /// The path string exactly as declared in the document.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Two templates share a shape when they match exactly the same request paths,
    /// i.e. they differ at most in parameter names.
    pub fn same_shape(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Match a request path, returning parameter bindings on success.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let request = split_path(path);
        if request.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, value) in self.segments.iter().zip(request) {
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a path into its segments after the leading slash.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn parse_segment(segment: &str) -> Result<Segment, TemplateError> {
    let mut depth = 0usize;
    for ch in segment.chars() {
        match ch {
            '{' => {
                if depth > 0 {
                    return Err(TemplateError::NestedBraces(segment.to_string()));
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(TemplateError::UnmatchedBrace {
                        segment: segment.to_string(),
                        brace: '}',
                    });
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TemplateError::UnmatchedBrace {
            segment: segment.to_string(),
            brace: '{',
        });
    }

    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some("") => Err(TemplateError::EmptyParam(segment.to_string())),
        Some(name) if !name.contains(['{', '}']) => Ok(Segment::Param(name.to_string())),
        _ => Ok(Segment::Literal(segment.to_string())),
    }
}

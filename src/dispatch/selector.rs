//! Response selection.
//!
//! Picks which response template of a route to play back. The policy is a
//! pure function of the route and the optional override, so repeated calls
//! always agree.

use crate::routing::route::{success_status, ResponseTemplate, Route};

/// What the selector decided to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Template(&'a ResponseTemplate),
    /// The route declares no responses: 200, `application/json`, `{}`.
    Fallback,
}

/// Select the response template for `route`.
///
/// Order: requested override, the method's success status, the only
/// template, `default`, then the lexicographically smallest key.
pub fn select<'a>(route: &'a Route, preferred_status: Option<&str>) -> Selection<'a> {
    if route.responses.is_empty() {
        return Selection::Fallback;
    }

    if let Some(template) = preferred_status.and_then(|status| route.response(status)) {
        return Selection::Template(template);
    }

    if let Some(template) = success_status(&route.method).and_then(|status| route.response(status)) {
        return Selection::Template(template);
    }

    if let [only] = route.responses.as_slice() {
        return Selection::Template(only);
    }

    if let Some(template) = route.response("default") {
        return Selection::Template(template);
    }

    route
        .responses
        .iter()
        .min_by(|a, b| a.status_code.cmp(&b.status_code))
        .map_or(Selection::Fallback, Selection::Template)
}

//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in table order
//! - Look up the matching route for a method and path
//! - Return the matched route with its parameter bindings, or no match
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, no locks)
//! - O(n) scan in table order; the first structural match wins
//! - No reordering for specificity: declare literal paths before
//!   parameterized ones to prefer them
//! - A path match with the wrong method is an ordinary miss (no 405)

use std::collections::HashMap;

use crate::routing::route::Route;

/// A matched route and the path parameters it bound.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: HashMap<String, String>,
}

/// The ordered, immutable set of compiled routes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, collapsing routes with the same identity.
    ///
    /// A later duplicate replaces the earlier route in the earlier route's slot.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut table = Self::default();
        for route in routes {
            table.insert(route);
        }
        table
    }

    pub(crate) fn insert(&mut self, route: Route) -> Option<Route> {
        match self.routes.iter_mut().find(|r| r.same_identity(&route)) {
            Some(existing) => Some(std::mem::replace(existing, route)),
            None => {
                self.routes.push(route);
                None
            }
        }
    }

    /// Find the first route matching `method` (any case) and `path`.
    pub fn match_request(&self, method: &str, path: &str) -> Option<RouteMatch<'_>> {
        let method = method.to_ascii_uppercase();
        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                route
                    .template
                    .matches(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Whether any route is declared on the root path.
    pub fn has_root(&self) -> bool {
        self.routes.iter().any(|r| r.template.is_root())
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

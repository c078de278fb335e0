//! Route table
//!
//! Routes are registered on a [`RouterBuilder`] during startup and then
//! frozen into a [`Router`], which is read-only for the rest of the process.
//! Matching is exact on both method and path: no prefixes, no wildcards,
//! no trailing-slash normalisation.

use hyper::Method;
use std::collections::HashMap;

use crate::error::RouteError;
use crate::http::Payload;

/// A pure handler producing the body of a matched route
pub type Handler = fn() -> Payload;

/// A registered (method, path) pair bound to a handler
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub handler: Handler,
}

/// Mutable route table used during startup
#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
    // path -> indices into `routes`, one per registered method
    by_path: HashMap<String, Vec<usize>>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an exact (method, path) pair
    ///
    /// Fails with [`RouteError::Configuration`] if the pair is already taken.
    pub fn register(
        &mut self,
        method: Method,
        path: impl Into<String>,
        handler: Handler,
    ) -> Result<&mut Self, RouteError> {
        let path = path.into();
        let slots = self.by_path.entry(path.clone()).or_default();
        if slots.iter().any(|&i| self.routes[i].method == method) {
            return Err(RouteError::Configuration {
                method: method.to_string(),
                path,
            });
        }

        slots.push(self.routes.len());
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        Ok(self)
    }

    /// Freeze the table; no further registration is possible
    pub fn freeze(self) -> Router {
        Router {
            routes: self.routes.into_boxed_slice(),
            by_path: self.by_path,
        }
    }
}

/// Immutable route table shared by all connections
#[derive(Debug)]
pub struct Router {
    routes: Box<[Route]>,
    by_path: HashMap<String, Vec<usize>>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Resolve a request to its handler
    pub fn resolve(&self, method: &Method, path: &str) -> Result<Handler, RouteError> {
        self.by_path
            .get(path)
            .and_then(|slots| {
                slots
                    .iter()
                    .map(|&i| &self.routes[i])
                    .find(|route| route.method == *method)
            })
            .map(|route| route.handler)
            .ok_or_else(|| RouteError::NotFound {
                method: method.to_string(),
                path: path.to_string(),
            })
    }

    /// Registered routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

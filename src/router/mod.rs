//! Client-side routing: resolve a path, run the guard, follow redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views are out of scope; a successful [`Router::navigate`] reports which
//! route would render and the page title it sets.

pub mod guard;
pub mod routes;


use guard::{NavigationDecision, NavigationGuard};
use routes::{Route, RouteTable};

/// Redirect hops followed before a navigation is declared a loop.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches {path}")]
    NotFound { path: String },
    #[error("navigation to {path} exceeded the redirect limit")]
    RedirectLoop { path: String },
}

/// Outcome of a navigation attempt that landed on a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Path originally asked for.
    pub requested: String,
    /// Redirect targets in the order they were followed.
    pub redirects: Vec<String>,
    /// Route that renders.
    pub route: Route,
}

impl Navigation {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.route.meta.title.as_deref()
    }
}

#[derive(Clone, Debug)]
pub struct Router {
    routes: RouteTable,
    guard: NavigationGuard,
}

impl Router {
    #[must_use]
    pub fn new(routes: RouteTable, guard: NavigationGuard) -> Self {
        Self { routes, guard }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Navigate to `path`, following guard redirects.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] when a path (requested or redirect
    /// target) has no route, and [`NavigationError::RedirectLoop`] after
    /// [`MAX_REDIRECTS`] hops.
    pub fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        let mut target = path.to_owned();
        let mut redirects = Vec::new();
        loop {
            let route = self
                .routes
                .resolve(&target)
                .ok_or_else(|| NavigationError::NotFound { path: target.clone() })?;
            match self.guard.check(&route.meta) {
                NavigationDecision::Allow => {
                    tracing::debug!(requested = %path, route = %route.name, "navigation allowed");
                    return Ok(Navigation { requested: path.to_owned(), redirects, route: route.clone() });
                }
                NavigationDecision::Redirect { to, reason } => {
                    if redirects.len() >= MAX_REDIRECTS {
                        tracing::warn!(requested = %path, "redirect loop");
                        return Err(NavigationError::RedirectLoop { path: path.to_owned() });
                    }
                    tracing::debug!(from = %target, %to, ?reason, "navigation redirected");
                    redirects.push(to.clone());
                    target = to;
                }
            }
        }
    }
}

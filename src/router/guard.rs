//! Navigation guard: allow or redirect, decided from route flags and the
//! cached session.
//!
//! POLICY
//! ======
//! Checks run in a fixed order:
//! 1. `requires_auth` without a session redirects to the login route.
//! 2. `requires_admin` redirects to the admin fallback route for everyone,
//!    admins included. Role is not consulted here; such routes are
//!    unreachable until role gating is specified.
//! 3. Anything else is allowed.
//!
//! The guard never talks to the backend. It trusts the local session.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{ADMIN_FALLBACK_ROUTE, LOGIN_ROUTE, RouteMeta};
use crate::session::SharedSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    Unauthenticated,
    AdminOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect { to: String, reason: RedirectReason },
}

#[derive(Clone, Debug)]
pub struct NavigationGuard {
    session: SharedSession,
    login_route: String,
    admin_fallback_route: String,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(session: SharedSession) -> Self {
        Self::with_routes(session, LOGIN_ROUTE, ADMIN_FALLBACK_ROUTE)
    }

    #[must_use]
    pub fn with_routes(session: SharedSession, login_route: &str, admin_fallback_route: &str) -> Self {
        Self {
            session,
            login_route: login_route.to_owned(),
            admin_fallback_route: admin_fallback_route.to_owned(),
        }
    }

    /// Decide a navigation to a route carrying `meta`.
    #[must_use]
    pub fn check(&self, meta: &RouteMeta) -> NavigationDecision {
        self.evaluate(meta, self.session.is_authenticated())
    }

    /// Pure decision for a given authentication state.
    #[must_use]
    pub fn evaluate(&self, meta: &RouteMeta, authenticated: bool) -> NavigationDecision {
        if meta.requires_auth && !authenticated {
            NavigationDecision::Redirect { to: self.login_route.clone(), reason: RedirectReason::Unauthenticated }
        } else if meta.requires_admin {
            NavigationDecision::Redirect {
                to: self.admin_fallback_route.clone(),
                reason: RedirectReason::AdminOnly,
            }
        } else {
            NavigationDecision::Allow
        }
    }
}

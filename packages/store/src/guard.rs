//! Route guards: pure access decisions derived from a [`Session`].

use crate::models::Session;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Outcome of evaluating a guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being resolved; render a placeholder.
    Loading,
    Allow,
    /// Redirect to the given path.
    Deny(&'static str),
}

/// Access rule protecting a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGuard {
    /// Any logged-in user; others go to the login page.
    Authenticated,
    /// Administrators only; others go to the dashboard.
    Admin,
}

impl RouteGuard {
    pub fn evaluate(&self, session: &Session) -> GuardDecision {
        if session.loading {
            return GuardDecision::Loading;
        }
        match (self, &session.user) {
            (Self::Authenticated, None) => GuardDecision::Deny(LOGIN_PATH),
            (Self::Authenticated, Some(_)) => GuardDecision::Allow,
            (Self::Admin, Some(user)) if user.is_admin => GuardDecision::Allow,
            (Self::Admin, _) => GuardDecision::Deny(DASHBOARD_PATH),
        }
    }
}

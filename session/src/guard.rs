//! Route guard decisions shared by every front end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both gates read the same `Session`; they differ only in which side of the
//! authentication boundary they protect. Front ends map the decision to a
//! loading placeholder, the wrapped content, or a history-replacing redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::Session;

pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_HOME_ROUTE: &str = "/dashboard";

/// Redirect targets used by the guards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardRoutes {
    /// Where anonymous visitors are sent from protected pages.
    pub login: String,
    /// Authenticated landing area, where signed-in users are sent from public-only pages.
    pub home: String,
}

impl Default for GuardRoutes {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_ROUTE.to_owned(),
            home: DEFAULT_HOME_ROUTE.to_owned(),
        }
    }
}

/// Which side of the auth boundary a page lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGuard {
    /// Login/register: anonymous visitors only.
    PublicOnly,
    /// Pages that require a session.
    AuthenticatedOnly,
}

/// What a guarded route should show right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    /// Navigate away. `replace` keeps the guarded page out of history.
    Redirect { to: String, replace: bool },
}

impl GuardDecision {
    fn redirect(to: &str) -> Self {
        Self::Redirect {
            to: to.to_owned(),
            replace: true,
        }
    }
}

impl RouteGuard {
    #[must_use]
    pub fn decide(self, session: &Session, routes: &GuardRoutes) -> GuardDecision {
        match self {
            // Public pages are safe to show before startup validation finishes.
            Self::PublicOnly => {
                if session.is_loading {
                    GuardDecision::Loading
                } else if session.is_authenticated() {
                    GuardDecision::redirect(&routes.home)
                } else {
                    GuardDecision::Render
                }
            }
            // Waiting on `is_initialized` avoids flashing /login before a
            // persisted credential has been confirmed.
            Self::AuthenticatedOnly => {
                if session.is_loading || !session.is_initialized {
                    GuardDecision::Loading
                } else if !session.is_authenticated() {
                    GuardDecision::redirect(&routes.login)
                } else {
                    GuardDecision::Render
                }
            }
        }
    }
}

//! Auth-session state for the current client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware views read this snapshot; only the session
//! controller writes it. The token and the user live together in a single
//! `Credential`, so a session can never hold one without the other.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::types::User;

/// A bearer token together with the profile it authenticates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub user: User,
    pub token: String,
}

/// Where the session sits in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Process just started; nothing read from storage yet.
    #[default]
    Uninitialized,
    /// A persisted credential is held provisionally while the gateway confirms it.
    Validating,
    /// Credential confirmed by the gateway or freshly issued by login/register.
    Authenticated,
    /// No credential.
    Anonymous,
}

/// Authentication state published by the session controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub credential: Option<Credential>,
    pub phase: SessionPhase,
    /// An auth operation is in flight.
    pub is_loading: bool,
    /// Startup validation has finished. Never goes back to `false`.
    pub is_initialized: bool,
    /// Last user-visible failure.
    pub error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.credential.as_ref().map(|c| &c.user)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.token.as_str())
    }

    /// True while a credential is held, provisional or confirmed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// True only for the optimistic snapshot published during startup validation.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.phase == SessionPhase::Validating && self.credential.is_some()
    }

    pub(crate) fn sign_in(&mut self, credential: Credential) {
        self.credential = Some(credential);
        self.phase = SessionPhase::Authenticated;
    }

    pub(crate) fn sign_out(&mut self) {
        self.credential = None;
        self.phase = SessionPhase::Anonymous;
    }

    pub(crate) fn settle(&mut self) {
        self.is_loading = false;
        self.is_initialized = true;
    }
}

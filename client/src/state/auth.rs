//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The controller stays the only writer; the
//! signal is a read-only mirror fed by a cell subscription.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{ControllerOptions, GuardRoutes, Notification, Session, SessionConfig, SessionController};

use crate::net::api::BrowserGateway;
use crate::util::storage::BrowserTokenStore;

/// Controller wired to the browser gateway and store.
pub type ClientController = SessionController<BrowserGateway, BrowserTokenStore>;

/// Everything an auth-aware component needs, provided once by `App`.
#[derive(Clone)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    pub controller: ClientController,
    pub routes: GuardRoutes,
}

impl AuthContext {
    /// Build the controller and start mirroring its snapshots into a signal.
    pub fn new(config: &SessionConfig, notifier: impl Fn(Notification) + Send + Sync + 'static) -> Self {
        let options = ControllerOptions {
            notifier: std::sync::Arc::new(notifier),
            stale_results: config.stale_results,
            ..ControllerOptions::default()
        };
        let controller = SessionController::with_options(
            BrowserGateway::new(&config.api_base_url),
            BrowserTokenStore::new(config),
            options,
        );
        let session = RwSignal::new(controller.state());
        mirror(&controller, session);
        Self {
            session,
            controller,
            routes: config.routes.clone(),
        }
    }

    /// Display name of the signed-in user, if any.
    pub fn user_name(&self) -> Option<String> {
        self.session.with(|s| s.user().map(|u| u.name.clone()))
    }
}

// Lives as long as the controller; never unsubscribed.
fn mirror(controller: &ClientController, session: RwSignal<Session>) {
    controller.subscribe(move |snapshot| session.set(snapshot.clone()));
}

/// Read build-time configuration baked in with `AJARIN_*` variables.
pub fn build_config() -> SessionConfig {
    SessionConfig::from_lookup(build_env).unwrap_or_else(|e| {
        leptos::logging::warn!("ignoring invalid build config: {e}");
        SessionConfig::default()
    })
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "AJARIN_API_BASE_URL" => option_env!("AJARIN_API_BASE_URL"),
        "AJARIN_TOKEN_COOKIE" => option_env!("AJARIN_TOKEN_COOKIE"),
        "AJARIN_USER_STORAGE_KEY" => option_env!("AJARIN_USER_STORAGE_KEY"),
        "AJARIN_TOKEN_MAX_AGE_DAYS" => option_env!("AJARIN_TOKEN_MAX_AGE_DAYS"),
        "AJARIN_REQUEST_TIMEOUT_SECS" => option_env!("AJARIN_REQUEST_TIMEOUT_SECS"),
        "AJARIN_LOGIN_ROUTE" => option_env!("AJARIN_LOGIN_ROUTE"),
        "AJARIN_HOME_ROUTE" => option_env!("AJARIN_HOME_ROUTE"),
        "AJARIN_STALE_VALIDATION" => option_env!("AJARIN_STALE_VALIDATION"),
        _ => None,
    };
    value.map(str::to_owned)
}

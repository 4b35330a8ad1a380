//! Session controller: the only writer of `Session` state.
//!
//! ARCHITECTURE
//! ============
//! Operations run against two collaborators: an [`AuthGateway`] for the
//! backend and a [`TokenStore`] for persistence. Each operation publishes a
//! short sequence of snapshots through the [`SessionCell`]; every snapshot
//! holds token and user together or neither.
//!
//! ```text
//! Uninitialized ──initialize_auth──▶ Validating ──ok──▶ Authenticated
//!       │                                 │                 │  ▲
//!       └──────(nothing stored)──────┐    └─fail─┐   logout │  │ login/register
//!                                    ▼           ▼          ▼  │
//!                                  Anonymous ◀──────────── Anonymous
//! ```
//!
//! ERROR HANDLING
//! ==============
//! Gateway and store failures never escape as panics. Login/register hand a
//! user-facing message back; everything else resolves to a consistent state
//! and logs.
//!
//! TRADE-OFFS
//! ==========
//! Operations are not cancellable. A logout racing an in-flight startup
//! validation is last-write-wins unless `StaleResultPolicy::Discard` is
//! configured, which tags validation results with a generation and drops
//! them once a credential-changing operation has run.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cell::{SessionCell, SubscriptionId};
use crate::config::StaleResultPolicy;
use crate::error::{GatewayError, SessionError, StoreError};
use crate::gateway::{AuthGateway, bearer};
use crate::mode::InitializationMode;
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::state::{Credential, Session, SessionPhase};
use crate::store::TokenStore;
use crate::types::{AuthPayload, Credentials, RegisterRequest, User};

pub const LOGIN_SUCCESS: &str = "Login successful";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_SUCCESS: &str = "Registration successful";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully";
pub const INIT_FAILED: &str = "Authentication initialization failed";

/// Optional collaborators for [`SessionController::with_options`].
#[derive(Clone)]
pub struct ControllerOptions {
    pub notifier: Arc<dyn Notifier>,
    pub init_mode: InitializationMode,
    pub stale_results: StaleResultPolicy,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            notifier: Arc::new(LogNotifier),
            init_mode: InitializationMode::new(),
            stale_results: StaleResultPolicy::Apply,
        }
    }
}

struct Inner<G, S> {
    gateway: G,
    store: S,
    cell: SessionCell,
    notifier: Arc<dyn Notifier>,
    init_mode: InitializationMode,
    stale_results: StaleResultPolicy,
    generation: AtomicU64,
}

/// Orchestrates login, registration, logout, startup validation and refresh.
///
/// Cheap to clone; clones drive the same session.
pub struct SessionController<G, S> {
    inner: Arc<Inner<G, S>>,
}

impl<G, S> Clone for SessionController<G, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Which sign-in endpoint an outcome came from.
#[derive(Clone, Copy, Debug)]
enum SignIn {
    Login,
    Register,
}

impl SignIn {
    fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Self::Login => LOGIN_SUCCESS,
            Self::Register => REGISTER_SUCCESS,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FAILED,
            Self::Register => REGISTER_FAILED,
        }
    }
}

impl<G: AuthGateway, S: TokenStore> SessionController<G, S> {
    pub fn new(gateway: G, store: S) -> Self {
        Self::with_options(gateway, store, ControllerOptions::default())
    }

    pub fn with_options(gateway: G, store: S, options: ControllerOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                store,
                cell: SessionCell::new(),
                notifier: options.notifier,
                init_mode: options.init_mode,
                stale_results: options.stale_results,
                generation: AtomicU64::new(0),
            }),
        }
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> Session {
        self.inner.cell.snapshot()
    }

    #[must_use]
    pub fn cell(&self) -> &SessionCell {
        &self.inner.cell
    }

    pub fn subscribe(&self, f: impl Fn(&Session) + Send + Sync + 'static) -> SubscriptionId {
        self.inner.cell.subscribe(f)
    }

    #[must_use]
    pub fn init_mode(&self) -> &InitializationMode {
        &self.inner.init_mode
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// In-memory token, falling back to the Token Store so a freshly
    /// rehydrated client can sign requests before `initialize_auth` finishes.
    #[must_use]
    pub fn get_token(&self) -> Option<String> {
        self.inner
            .cell
            .read(|s| s.token().map(str::to_owned))
            .or_else(|| self.inner.store.get_token())
    }

    /// `Authorization` header value for outbound requests.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.get_token().map(|t| bearer(&t))
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the user-facing rejection message when the gateway refuses or
    /// cannot be reached. Session state is already updated either way.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        self.inner.cell.update(|s| s.is_loading = true);
        let outcome = self.inner.gateway.login(credentials).await;
        self.complete_sign_in(SignIn::Login, outcome)
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Same as [`SessionController::login`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, SessionError> {
        self.inner.cell.update(|s| s.is_loading = true);
        let outcome = self.inner.gateway.register(request).await;
        self.complete_sign_in(SignIn::Register, outcome)
    }

    /// Sign out locally no matter what the backend says.
    pub async fn logout(&self) {
        self.bump_generation();
        self.inner.cell.update(|s| s.is_loading = true);

        let token = self.get_token();
        if let Err(e) = self.inner.gateway.logout(token.as_deref()).await {
            tracing::warn!(error = %e, "remote logout failed; clearing local session anyway");
        }

        self.clear_store();
        self.inner.cell.update(|s| {
            s.sign_out();
            s.error = None;
            s.settle();
        });
        tracing::info!("logged out");
        self.notify(Notification::Success(LOGOUT_SUCCESS.to_owned()));
    }

    /// Restore and confirm a persisted credential. Run once at startup.
    pub async fn initialize_auth(&self) {
        let _mode = self.inner.init_mode.enter();
        self.inner.cell.update(|s| {
            s.is_loading = true;
            s.is_initialized = false;
        });

        if let Err(e) = self.restore_and_validate().await {
            tracing::error!(error = %e, "authentication initialization failed");
            self.clear_store();
            self.inner.cell.update(|s| {
                s.sign_out();
                s.error = Some(INIT_FAILED.to_owned());
                s.settle();
            });
        }
    }

    /// Re-fetch the profile for the current token without ending the session
    /// on failure. Returns whether the profile was refreshed.
    pub async fn refresh_user(&self) -> bool {
        let Some(token) = self.get_token() else {
            return false;
        };

        match self.inner.gateway.validate_token(&token).await {
            Ok(user) => {
                if let Err(e) = self.inner.store.set_user_data(&user) {
                    tracing::warn!(error = %e, "failed to persist refreshed user");
                }
                self.inner.cell.update(|s| {
                    if let Some(credential) = s.credential.as_mut() {
                        credential.user = user;
                    }
                });
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "user refresh failed; keeping current session");
                false
            }
        }
    }

    /// React to a 401 from any authenticated request.
    ///
    /// Clears the session locally and returns `true` so the caller can send
    /// the user to the login route. Suppressed during initialization mode,
    /// where `initialize_auth` owns the outcome.
    pub fn handle_unauthorized(&self) -> bool {
        if self.inner.init_mode.is_active() {
            tracing::debug!("ignoring 401 during initialization");
            return false;
        }

        self.bump_generation();
        self.clear_store();
        self.inner.cell.update(|s| {
            s.sign_out();
            s.settle();
        });
        tracing::info!("session rejected by server; signed out");
        true
    }

    pub fn clear_error(&self) {
        self.inner.cell.update(|s| s.error = None);
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn complete_sign_in(&self, kind: SignIn, outcome: Result<AuthPayload, GatewayError>) -> Result<User, SessionError> {
        self.bump_generation();
        match outcome {
            Ok(AuthPayload { user, token }) => {
                self.persist(&token, &user);
                self.inner.cell.update(|s| {
                    s.sign_in(Credential {
                        user: user.clone(),
                        token,
                    });
                    s.is_loading = false;
                    s.error = None;
                });
                tracing::info!(operation = kind.name(), user_id = %user.id, "signed in");
                self.notify(Notification::Success(kind.success_message().to_owned()));
                Ok(user)
            }
            Err(e) => {
                let message = e.user_message().unwrap_or(kind.failure_message()).to_owned();
                tracing::warn!(operation = kind.name(), error = %e, "sign-in rejected");
                self.inner.cell.update(|s| {
                    s.sign_out();
                    s.is_loading = false;
                    s.error = Some(message.clone());
                });
                self.notify(Notification::Error(message.clone()));
                Err(SessionError::Rejected(message))
            }
        }
    }

    async fn restore_and_validate(&self) -> Result<(), StoreError> {
        let store = &self.inner.store;
        let (token, user) = match (store.get_token(), store.get_user_data()) {
            (Some(token), Some(user)) => (token, user),
            (None, None) => {
                self.settle_anonymous();
                return Ok(());
            }
            _ => {
                tracing::debug!("discarding incomplete persisted credential");
                store.clear_all()?;
                self.settle_anonymous();
                return Ok(());
            }
        };

        let generation = self.current_generation();
        self.inner.cell.update(|s| {
            s.credential = Some(Credential {
                user,
                token: token.clone(),
            });
            s.phase = SessionPhase::Validating;
        });

        let outcome = self.inner.gateway.validate_token(&token).await;
        if self.is_stale(generation) {
            tracing::info!("discarding validation result for superseded credential");
            self.inner.cell.update(Session::settle);
            return Ok(());
        }

        match outcome {
            Ok(server_user) => {
                // Rewrite the pair: a logout may have cleared the store mid-flight.
                store.set_token(&token)?;
                store.set_user_data(&server_user)?;
                self.inner.cell.update(|s| {
                    s.sign_in(Credential {
                        user: server_user,
                        token,
                    });
                    s.settle();
                });
                tracing::debug!("persisted credential confirmed");
            }
            Err(e) => {
                tracing::info!(error = %e, "persisted credential rejected; continuing anonymously");
                store.clear_all()?;
                self.settle_anonymous();
            }
        }
        Ok(())
    }

    fn settle_anonymous(&self) {
        self.inner.cell.update(|s| {
            s.sign_out();
            s.settle();
        });
    }

    /// Token and user are written as a pair; a half-written record is removed.
    fn persist(&self, token: &str, user: &User) {
        let store = &self.inner.store;
        if let Err(e) = store.set_token(token).and_then(|()| store.set_user_data(user)) {
            tracing::warn!(error = %e, "failed to persist credential; session will not survive restart");
            self.clear_store();
        }
    }

    fn clear_store(&self) {
        if let Err(e) = self.inner.store.clear_all() {
            tracing::warn!(error = %e, "failed to clear token store");
        }
    }

    fn notify(&self, notification: Notification) {
        self.inner.notifier.notify(notification);
    }

    fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    fn bump_generation(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.inner.stale_results == StaleResultPolicy::Discard && self.current_generation() != generation
    }
}

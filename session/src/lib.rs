//! Client-side authentication session lifecycle for Ajarin.
//!
//! This crate is UI-framework agnostic so the Leptos client and the CLI share
//! one implementation of token persistence, startup validation, sign-in,
//! sign-out and route guarding.
//!
//! ```text
//! Route guards / pages / CLI commands
//!     ↕  (Session snapshots, operations)
//! SessionController ── SessionCell (observable state)
//!     ↕                      ↕
//! AuthGateway (backend)   TokenStore (persistence)
//! ```

#![allow(async_fn_in_trait)]

pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod guard;
#[cfg(feature = "http")]
pub mod http;
pub mod mode;
pub mod notify;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_support;

pub use cell::{SessionCell, SubscriptionId};
pub use config::{SessionConfig, StaleResultPolicy};
pub use controller::{ControllerOptions, SessionController};
pub use error::{ConfigError, GatewayError, SessionError, StoreError};
pub use gateway::AuthGateway;
pub use guard::{GuardDecision, GuardRoutes, RouteGuard};
#[cfg(feature = "http")]
pub use http::HttpGateway;
pub use mode::{InitModeGuard, InitializationMode};
pub use notify::{LogNotifier, Notification, Notifier};
pub use state::{Credential, Session, SessionPhase};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{AuthPayload, Credentials, RegisterRequest, User};

//! Test doubles shared by unit tests.

use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::error::GatewayError;
use crate::gateway::AuthGateway;
use crate::notify::Notification;
use crate::types::{AuthPayload, Credentials, RegisterRequest, User};

pub(crate) fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        email: None,
        role: None,
        avatar: None,
    }
}

pub(crate) fn budi() -> User {
    user("1", "Budi")
}

/// Scripted gateway. Each endpoint returns its configured result; validation
/// can be held open until `release_validation` is called.
pub(crate) struct FakeGateway {
    pub login: Mutex<Result<AuthPayload, GatewayError>>,
    pub register: Mutex<Result<AuthPayload, GatewayError>>,
    pub logout: Mutex<Result<(), GatewayError>>,
    pub validate: Mutex<Result<User, GatewayError>>,
    pub calls: Mutex<Vec<String>>,
    validation_gate: Option<Arc<Notify>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        let refused = || GatewayError::Transport("connection refused".to_owned());
        Self {
            login: Mutex::new(Err(refused())),
            register: Mutex::new(Err(refused())),
            logout: Mutex::new(Ok(())),
            validate: Mutex::new(Err(refused())),
            calls: Mutex::new(Vec::new()),
            validation_gate: None,
        }
    }
}

impl FakeGateway {
    pub(crate) fn with_validation_gate(gate: Arc<Notify>) -> Self {
        Self {
            validation_gate: Some(gate),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AuthGateway for FakeGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, GatewayError> {
        self.record(format!("login:{}", credentials.email));
        self.login.lock().unwrap().clone()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, GatewayError> {
        self.record(format!("register:{}", request.email));
        self.register.lock().unwrap().clone()
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), GatewayError> {
        self.record(format!("logout:{}", token.unwrap_or("-")));
        self.logout.lock().unwrap().clone()
    }

    async fn validate_token(&self, token: &str) -> Result<User, GatewayError> {
        self.record(format!("validate:{token}"));
        if let Some(gate) = &self.validation_gate {
            gate.notified().await;
        }
        self.validate.lock().unwrap().clone()
    }
}

/// Collects notifications for assertions.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    pub seen: Arc<Mutex<Vec<Notification>>>,
}

impl Recorder {
    pub(crate) fn notifier(&self) -> impl Fn(Notification) + Send + Sync + 'static {
        let seen = Arc::clone(&self.seen);
        move |n: Notification| seen.lock().unwrap().push(n)
    }

    pub(crate) fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

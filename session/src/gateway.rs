//! Remote Auth Gateway contract and response decoding.
//!
//! The backend owns authentication; this crate only consumes four endpoints.
//! [`AuthGateway`] abstracts the transport so the controller runs the same
//! against reqwest (native), gloo-net (browser) or a test double.
//!
//! ERROR HANDLING
//! ==============
//! Decoding is transport-independent: every implementation hands the status
//! code and raw body to the `decode_*` helpers here, so rejection messages
//! and 401 handling read the same everywhere.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use crate::error::GatewayError;
use crate::types::{ApiEnvelope, AuthPayload, Credentials, ErrorBody, RegisterRequest, User, UserData};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const VALIDATE_PATH: &str = "/auth/validate";

/// Remote authentication backend.
///
/// Futures are not required to be `Send`; browser transports are
/// single-threaded.
pub trait AuthGateway {
    /// Exchange credentials for a profile and token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, GatewayError>;

    /// Create an account and sign it in.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, GatewayError>;

    /// Revoke the token server-side. Callers ignore failures.
    async fn logout(&self, token: Option<&str>) -> Result<(), GatewayError>;

    /// Confirm `token` and return the server's current profile.
    async fn validate_token(&self, token: &str) -> Result<User, GatewayError>;
}

impl<T: AuthGateway> AuthGateway for Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, GatewayError> {
        (**self).login(credentials).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, GatewayError> {
        (**self).register(request).await
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), GatewayError> {
        (**self).logout(token).await
    }

    async fn validate_token(&self, token: &str) -> Result<User, GatewayError> {
        (**self).validate_token(token).await
    }
}

/// Join the API base URL and an endpoint path.
#[must_use]
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub(crate) fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a non-2xx response to a gateway error.
#[must_use]
pub fn decode_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);
    if status == 401 {
        return GatewayError::Unauthorized { message };
    }
    GatewayError::Rejected {
        status,
        message: message.unwrap_or_else(|| request_failed_message(status)),
    }
}

/// Decode a login/register response.
///
/// # Errors
///
/// Returns the backend's rejection for non-2xx or `success: false` bodies, and
/// `Decode` when a 2xx body carries no profile/token.
pub fn decode_auth_response(status: u16, body: &str) -> Result<AuthPayload, GatewayError> {
    if !is_success(status) {
        return Err(decode_error(status, body));
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    // Some routes answer with a bare `{ user, token }` instead of the envelope.
    if value.get("success").is_none() {
        return serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()));
    }

    let envelope: ApiEnvelope<AuthPayload> =
        serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(GatewayError::Rejected {
            status,
            message: envelope.message.unwrap_or_else(|| request_failed_message(status)),
        });
    }
    envelope
        .data
        .ok_or_else(|| GatewayError::Decode("response missing data".to_owned()))
}

/// Decode a token-validation response (`{ success, data: user }`).
///
/// # Errors
///
/// Any non-2xx status, `success: false`, or missing profile is an error; the
/// caller treats all of them as an invalid session.
pub fn decode_validate_response(status: u16, body: &str) -> Result<User, GatewayError> {
    if !is_success(status) {
        return Err(decode_error(status, body));
    }
    let envelope: ApiEnvelope<UserData> =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(GatewayError::Rejected {
            status,
            message: envelope.message.unwrap_or_else(|| "token rejected".to_owned()),
        });
    }
    envelope
        .data
        .map(User::from)
        .ok_or_else(|| GatewayError::Decode("response missing user".to_owned()))
}

/// Decode a logout acknowledgement. Any 2xx counts.
///
/// # Errors
///
/// Returns the mapped error for non-2xx statuses.
pub fn decode_ack(status: u16, body: &str) -> Result<(), GatewayError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(decode_error(status, body))
    }
}

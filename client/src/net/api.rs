//! Remote Auth Gateway over the browser's fetch API.
//!
//! In the browser (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: every call fails with `GatewayError::Unavailable`, since
//! credentials only exist in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Responses are decoded by the shared `session::gateway` helpers, so the
//! browser and native clients agree on which messages reach the user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::gateway::{LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH, VALIDATE_PATH, endpoint_url};
#[cfg(feature = "csr")]
use session::gateway::{bearer, decode_ack, decode_auth_response, decode_validate_response};
use session::{AuthGateway, AuthPayload, Credentials, GatewayError, RegisterRequest, User};

/// gloo-net backed gateway rooted at the configured API base URL.
#[derive(Clone, Debug)]
pub struct BrowserGateway {
    base_url: String,
}

impl BrowserGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for one of the `/auth/*` endpoints.
    pub fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }
}

#[cfg(feature = "csr")]
fn transport(e: gloo_net::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

#[cfg(feature = "csr")]
async fn send(request: gloo_net::http::Request) -> Result<(u16, String), GatewayError> {
    let resp = request.send().await.map_err(transport)?;
    let status = resp.status();
    let body = resp.text().await.map_err(transport)?;
    log::debug!("auth gateway response: {status} ({} bytes)", body.len());
    Ok((status, body))
}

impl AuthGateway for BrowserGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, GatewayError> {
        let url = self.endpoint(LOGIN_PATH);
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&url)
                .json(credentials)
                .map_err(transport)?;
            let (status, body) = send(request).await?;
            decode_auth_response(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, credentials);
            Err(GatewayError::Unavailable)
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, GatewayError> {
        let url = self.endpoint(REGISTER_PATH);
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&url)
                .json(request)
                .map_err(transport)?;
            let (status, body) = send(request).await?;
            decode_auth_response(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, request);
            Err(GatewayError::Unavailable)
        }
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), GatewayError> {
        let url = self.endpoint(LOGOUT_PATH);
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::Request::post(&url);
            if let Some(token) = token {
                builder = builder.header("Authorization", &bearer(token));
            }
            let (status, body) = send(builder.build().map_err(transport)?).await?;
            decode_ack(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, token);
            Err(GatewayError::Unavailable)
        }
    }

    async fn validate_token(&self, token: &str) -> Result<User, GatewayError> {
        let url = self.endpoint(VALIDATE_PATH);
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer(token))
                .build()
                .map_err(transport)?;
            let (status, body) = send(request).await?;
            decode_validate_response(status, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, token);
            Err(GatewayError::Unavailable)
        }
    }
}

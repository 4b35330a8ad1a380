//! reqwest-backed Remote Auth Gateway for native clients.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;

use crate::config::SessionConfig;
use crate::error::GatewayError;
use crate::gateway::{
    AuthGateway, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH, VALIDATE_PATH, bearer, decode_ack, decode_auth_response,
    decode_validate_response, endpoint_url,
};
use crate::types::{AuthPayload, Credentials, RegisterRequest, User};

/// HTTP/JSON client for the backend's `/auth/*` endpoints.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a client honoring the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the TLS backend cannot be initialized.
    pub fn new(config: &SessionConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "auth gateway response");
        Ok((status, body))
    }
}

impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, GatewayError> {
        let request = self.client.post(self.url(LOGIN_PATH)).json(credentials);
        let (status, body) = self.send(request).await?;
        decode_auth_response(status, &body)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, GatewayError> {
        let request = self.client.post(self.url(REGISTER_PATH)).json(request);
        let (status, body) = self.send(request).await?;
        decode_auth_response(status, &body)
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), GatewayError> {
        let mut request = self.client.post(self.url(LOGOUT_PATH));
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, bearer(token));
        }
        let (status, body) = self.send(request).await?;
        decode_ack(status, &body)
    }

    async fn validate_token(&self, token: &str) -> Result<User, GatewayError> {
        let request = self
            .client
            .get(self.url(VALIDATE_PATH))
            .header(AUTHORIZATION, bearer(token));
        let (status, body) = self.send(request).await?;
        decode_validate_response(status, &body)
    }
}

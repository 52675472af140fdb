//! HTTP gateway to the ShopSense backend.

use crate::api::config::load_api_config;
use crate::auth::gateway::{AuthGateway, GatewayError};
use crate::auth::types::{AuthenticatedUser, Credential, RegistrationProfile};
use std::time::Duration;

/// Timeout applied to every auth request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the customer auth endpoints of the ShopSense backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client pointed at the configured endpoint (env var, config file or
    /// built-in default).
    pub fn new() -> Self {
        Self {
            base_url: load_api_config().url,
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn http_client() -> Result<reqwest::Client, GatewayError> {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuthGateway for ApiClient {
    async fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<Option<AuthenticatedUser>, GatewayError> {
        let url = format!("{}/customers/signin", self.base_url);

        let resp = Self::http_client()?
            .post(&url)
            .json(credential)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        match resp.status().as_u16() {
            200 => {
                let user = resp
                    .json::<AuthenticatedUser>()
                    .await
                    .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
                tracing::debug!("Backend accepted sign-in for user id {}", user.id);
                Ok(Some(user))
            }
            // The backend answers 401 for a bad password and 404 for an
            // unknown email; both are a rejection, not a failure.
            401 | 404 => Ok(None),
            status => {
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!("Sign-in returned unexpected status {}: {}", status, body);
                Err(GatewayError::UnexpectedStatus { status, body })
            }
        }
    }

    async fn register(&self, profile: &RegistrationProfile) -> Result<bool, GatewayError> {
        let url = format!("{}/customers/signup", self.base_url);

        let resp = Self::http_client()?
            .post(&url)
            .json(profile)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        match resp.status().as_u16() {
            200 | 201 => Ok(true),
            // Duplicate email or rejected field values.
            400 | 409 | 422 => Ok(false),
            status => {
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!("Sign-up returned unexpected status {}: {}", status, body);
                Err(GatewayError::UnexpectedStatus { status, body })
            }
        }
    }
}

//! Contract with the remote authentication service.
//!
//! The flow controller only ever talks through this trait; the HTTP
//! implementation lives in [`crate::api`] and tests substitute in-memory
//! fakes.

use crate::auth::types::{AuthenticatedUser, Credential, RegistrationProfile};

/// Errors from the transport layer of a gateway call.
///
/// A rejection answered by the service is not an error: `authenticate`
/// returns `Ok(None)` and `register` returns `Ok(false)` for those. An `Err`
/// means the request itself failed, and callers must surface that
/// differently from a rejection.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request could not be sent, or timed out.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a status the contract does not cover.
    #[error("server returned status {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    InvalidResponse(String),
}

/// Remote operations the authentication flow depends on.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// Verify a credential pair. `Ok(None)` means the service answered and
    /// rejected the pair.
    async fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<Option<AuthenticatedUser>, GatewayError>;

    /// Create a new account. `Ok(false)` means the service answered and
    /// rejected the registration.
    async fn register(&self, profile: &RegistrationProfile) -> Result<bool, GatewayError>;
}

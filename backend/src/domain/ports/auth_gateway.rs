//! Port abstraction for the external authentication collaborator.
//!
//! The collaborator owns users and tokens. This service only asks it whether
//! a token is currently valid and forwards login attempts.

use async_trait::async_trait;

use crate::domain::{AuthToken, LoginCredentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised by auth gateway adapters.
    pub enum AuthGatewayError {
        /// The collaborator could not be reached or replied unintelligibly.
        Unavailable { message: String } => "auth service unavailable: {message}",
        /// The collaborator rejected the supplied credentials.
        InvalidCredentials => "invalid credentials",
    }
}

/// Client-side view of the auth collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Ask whether `token` is currently valid.
    ///
    /// `Ok(false)` means the collaborator answered and rejected the token.
    /// Transport failures surface as [`AuthGatewayError::Unavailable`].
    async fn validate_token(&self, token: &AuthToken) -> Result<bool, AuthGatewayError>;

    /// Exchange credentials for a fresh token.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthToken, AuthGatewayError>;
}

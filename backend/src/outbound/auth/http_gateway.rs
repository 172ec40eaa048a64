//! Reqwest-backed auth collaborator adapter.
//!
//! Owns transport details only: request encoding, the per-call timeout,
//! status mapping and reply decoding. One [`Client`] is built per process and
//! its connection pool is shared by every request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{AuthReplyDto, LoginRequestDto, ReplyStatusDto, TokenCheckRequestDto};
use crate::domain::ports::{AuthGateway, AuthGatewayError};
use crate::domain::{AuthToken, LoginCredentials};

const TOKEN_PATH: &str = "token/";
const LOGIN_PATH: &str = "login/";

/// Auth gateway that talks JSON over HTTP to the collaborator.
#[derive(Clone)]
pub struct HttpAuthGateway {
    client: Client,
    token_endpoint: Url,
    login_endpoint: Url,
}

impl HttpAuthGateway {
    /// Build a gateway for the collaborator rooted at `base`.
    ///
    /// `timeout` bounds each call end to end, connection setup included.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        let base = with_trailing_slash(base);
        Ok(Self {
            client,
            token_endpoint: join(&base, TOKEN_PATH),
            login_endpoint: join(&base, LOGIN_PATH),
        })
    }

    async fn post<B>(
        &self,
        endpoint: &Url,
        body: &B,
    ) -> Result<(StatusCode, Vec<u8>), AuthGatewayError>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .client
            .post(endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, bytes.to_vec()))
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn join(base: &Url, path: &str) -> Url {
    base.join(path).unwrap_or_else(|_| base.clone())
}

fn map_transport_error(error: reqwest::Error) -> AuthGatewayError {
    debug!(%error, timeout = error.is_timeout(), "auth collaborator call failed");
    if error.is_timeout() {
        AuthGatewayError::unavailable(format!("timed out: {error}"))
    } else {
        AuthGatewayError::unavailable(error.to_string())
    }
}

fn decode_reply(body: &[u8]) -> Result<AuthReplyDto, AuthGatewayError> {
    serde_json::from_slice(body)
        .map_err(|err| AuthGatewayError::unavailable(format!("undecodable reply: {err}")))
}

fn unexpected_status(status: StatusCode) -> AuthGatewayError {
    AuthGatewayError::unavailable(format!("unexpected status {}", status.as_u16()))
}

fn interpret_token_check(status: StatusCode, body: &[u8]) -> Result<bool, AuthGatewayError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
        _ if status.is_success() => {
            let reply = decode_reply(body)?;
            if reply.status == ReplyStatusDto::Error {
                debug!(reason = reply.error.as_deref(), "token rejected by collaborator");
            }
            Ok(reply.status == ReplyStatusDto::Ok)
        }
        _ => Err(unexpected_status(status)),
    }
}

fn interpret_login(status: StatusCode, body: &[u8]) -> Result<AuthToken, AuthGatewayError> {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(AuthGatewayError::invalid_credentials())
        }
        _ if status.is_success() => {
            let reply = decode_reply(body)?;
            match reply.status {
                ReplyStatusDto::Error => Err(AuthGatewayError::invalid_credentials()),
                ReplyStatusDto::Ok => reply
                    .token
                    .ok_or_else(|| AuthGatewayError::unavailable("reply carried no token"))
                    .and_then(|raw| {
                        AuthToken::new(raw)
                            .map_err(|_| AuthGatewayError::unavailable("reply carried a blank token"))
                    }),
            }
        }
        _ => Err(unexpected_status(status)),
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn validate_token(&self, token: &AuthToken) -> Result<bool, AuthGatewayError> {
        let request = TokenCheckRequestDto {
            token: token.as_str(),
        };
        let (status, body) = self.post(&self.token_endpoint, &request).await?;
        interpret_token_check(status, &body)
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthToken, AuthGatewayError> {
        let request = LoginRequestDto {
            username: credentials.username(),
            password: credentials.password(),
        };
        let (status, body) = self.post(&self.login_endpoint, &request).await?;
        interpret_login(status, &body)
    }
}

#[cfg(test)]
#[path = "http_gateway_tests.rs"]
mod tests;

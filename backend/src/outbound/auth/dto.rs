//! Wire DTOs for the auth collaborator's JSON protocol.
//!
//! Requests are borrowed views over domain values; replies decode into a
//! single envelope shared by both calls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct TokenCheckRequestDto<'a> {
    pub(super) token: &'a str,
}

#[derive(Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(super) enum ReplyStatusDto {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthReplyDto {
    pub(super) status: ReplyStatusDto,
    #[serde(default)]
    pub(super) token: Option<String>,
    #[serde(default)]
    pub(super) error: Option<String>,
}

//! JSON response envelopes.
//!
//! Every body carries `status`: `"OK"` with an optional typed payload, or
//! `"Error"` with an error message and no payload.
//!
//! ```text
//! {"status":"OK","post":{"id":1,"title":"t","body":"b","author":7}}
//! {"status":"Error","error":"id is not an integer","code":"invalid_request"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, Post};

/// Outcome marker shared by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ResponseStatus {
    /// The request succeeded.
    #[serde(rename = "OK")]
    Ok,
    /// The request failed; see `error`.
    #[serde(rename = "Error")]
    Error,
}

/// Post as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostBody {
    /// Storage-assigned identifier.
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Author identifier.
    pub author: i64,
}

impl From<Post> for PostBody {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().as_i64(),
            title: post.title().to_owned(),
            body: post.body().to_owned(),
            author: post.author(),
        }
    }
}

/// Bare success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub status: ResponseStatus,
}

impl OkResponse {
    /// `{"status":"OK"}` with no payload.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
        }
    }
}

/// Success envelope for post creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub status: ResponseStatus,
    /// Identifier assigned to the new post.
    pub id: i64,
}

impl CreatedResponse {
    /// Success envelope for the post stored under `id`.
    pub fn ok(id: i64) -> Self {
        Self {
            status: ResponseStatus::Ok,
            id,
        }
    }
}

/// Success envelope carrying one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub status: ResponseStatus,
    pub post: PostBody,
}

impl PostResponse {
    /// Success envelope wrapping a single post.
    pub fn ok(post: Post) -> Self {
        Self {
            status: ResponseStatus::Ok,
            post: post.into(),
        }
    }
}

/// Success envelope carrying every post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostsResponse {
    pub status: ResponseStatus,
    pub posts: Vec<PostBody>,
}

impl PostsResponse {
    /// Success envelope wrapping a listing, preserving its order.
    pub fn ok(posts: Vec<Post>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            posts: posts.into_iter().map(PostBody::from).collect(),
        }
    }
}

/// Success envelope carrying an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub status: ResponseStatus,
    pub token: String,
}

impl TokenResponse {
    /// Success envelope carrying a freshly issued token.
    pub fn ok(token: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            token: token.into(),
        }
    }
}

/// Error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    /// Client-safe error message.
    pub error: String,
    /// Stable machine-readable code.
    pub code: ErrorCode,
    /// Request correlation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Field-level validation information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: error.message().to_owned(),
            code: error.code(),
            trace_id: error.trace_id().map(str::to_owned),
            details: error.details().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostId;
    use rstest::rstest;
    use serde_json::json;

    fn sample_post() -> Post {
        Post::from_storage(PostId::new(1), "t".into(), "b".into(), 7)
    }

    #[rstest]
    fn ok_envelopes_use_uppercase_status() {
        let value = serde_json::to_value(OkResponse::ok()).expect("encode");
        assert_eq!(value, json!({ "status": "OK" }));
    }

    #[rstest]
    fn post_envelope_nests_post() {
        let value = serde_json::to_value(PostResponse::ok(sample_post())).expect("encode");
        assert_eq!(
            value,
            json!({
                "status": "OK",
                "post": { "id": 1, "title": "t", "body": "b", "author": 7 }
            })
        );
    }

    #[rstest]
    fn empty_listing_is_an_empty_array() {
        let value = serde_json::to_value(PostsResponse::ok(Vec::new())).expect("encode");
        assert_eq!(value, json!({ "status": "OK", "posts": [] }));
    }

    #[rstest]
    fn error_envelope_omits_absent_fields() {
        let error = Error::not_found("post 9 not found");
        let value = serde_json::to_value(ErrorResponse::from(&error)).expect("encode");
        assert_eq!(
            value,
            json!({ "status": "Error", "error": "post 9 not found", "code": "not_found" })
        );
    }

    #[rstest]
    fn error_envelope_carries_trace_and_details() {
        let error = Error::invalid_request("title is required")
            .with_trace_id("abc")
            .with_details(json!({ "field": "title" }));
        let value = serde_json::to_value(ErrorResponse::from(&error)).expect("encode");
        assert_eq!(value["traceId"], "abc");
        assert_eq!(value["details"]["field"], "title");
    }
}

//! Post API handlers.
//!
//! ```text
//! POST   /post/       {"title":"t","body":"b","author":7}
//! GET    /post/
//! GET    /post/{id}/
//! DELETE /post/{id}/
//! ```
//!
//! Handlers decode and validate, call the [`PostService`] port, and shape
//! envelopes. Which of these routes need a token is decided by the access
//! policy, not here.
//!
//! [`PostService`]: crate::domain::ports::PostService

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::domain::{Error, ErrorCode, NewPost, PostValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{
    CreatedResponse, ErrorResponse, OkResponse, PostResponse, PostsResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_post_id, post_validation_error};

/// Request body for `POST /post/`.
///
/// Fields are optional at decode time so a missing field yields a
/// field-level validation error rather than a generic decode failure.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreatePostRequest {
    /// Post title; must not be blank.
    pub title: Option<String>,
    /// Post body; must not be blank.
    pub body: Option<String>,
    /// Author identifier; must be non-zero.
    pub author: Option<i64>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = PostValidationError;

    fn try_from(value: CreatePostRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.title, value.body, value.author)
    }
}

fn log_failure(operation: &'static str, err: &Error) {
    if err.code() == ErrorCode::InternalError {
        error!(operation, error = %err, "post operation failed");
    } else {
        warn!(operation, error = %err, "post operation rejected");
    }
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/post/",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Token required when mutations are guarded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/post/")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let new_post = NewPost::try_from(payload.into_inner()).map_err(|err| {
        warn!(field = err.field(), "rejected invalid post");
        post_validation_error(err)
    })?;
    let id = state.posts.create_post(new_post).await.inspect_err(|err| {
        log_failure("create", err);
    })?;
    info!(post_id = %id, "post created");
    Ok(HttpResponse::Ok().json(CreatedResponse::ok(id.as_i64())))
}

/// List every post.
#[utoipa::path(
    get,
    path = "/post/",
    responses(
        (status = 200, description = "All posts", body = PostsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 503, description = "Auth service unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security(("BearerToken" = []))
)]
#[get("/post/")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let posts = state.posts.list_posts().await.inspect_err(|err| {
        log_failure("list", err);
    })?;
    info!(count = posts.len(), "posts listed");
    Ok(HttpResponse::Ok().json(PostsResponse::ok(posts)))
}

/// Fetch one post by id.
#[utoipa::path(
    get,
    path = "/post/{id}/",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No such post", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/post/{id}/")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    let post = state.posts.get_post(id).await.inspect_err(|err| {
        log_failure("get", err);
    })?;
    info!(post_id = %id, "post fetched");
    Ok(HttpResponse::Ok().json(PostResponse::ok(post)))
}

/// Delete one post by id. Absent posts count as deleted.
#[utoipa::path(
    delete,
    path = "/post/{id}/",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = OkResponse),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 401, description = "Token required when mutations are guarded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/post/{id}/")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    state.posts.delete_post(id).await.inspect_err(|err| {
        log_failure("delete", err);
    })?;
    info!(post_id = %id, "post deleted");
    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;

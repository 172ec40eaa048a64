//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed blog entities and the services that
//! operate on them. Nothing here knows about HTTP, SQL or the wire format of
//! the auth collaborator; adapters translate at the edges.
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure payload.
//! - Post / NewPost / PostId — the blog post aggregate.
//! - LoginCredentials / AuthToken — authentication primitives.
//! - PostServiceImpl — the post use-cases behind the `PostService` port.
//! - TraceId — request correlation identifier.

pub mod auth;
pub mod error;
pub mod ports;
pub mod post;
mod post_service;
pub mod trace_id;

pub use self::auth::{AuthToken, EmptyTokenError, LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::post::{NewPost, Post, PostId, PostIdParseError, PostValidationError};
pub use self::post_service::PostServiceImpl;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use blog_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("unauthorized"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

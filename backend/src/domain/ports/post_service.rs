//! Driving port for the post use-cases.
//!
//! HTTP handlers depend on this trait rather than on the concrete service so
//! tests can substitute a mock and assert it was never reached.

use async_trait::async_trait;

use crate::domain::{Error, NewPost, Post, PostId};

/// Post use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostService: Send + Sync {
    /// Store a validated post and return its identifier.
    async fn create_post(&self, post: NewPost) -> Result<PostId, Error>;

    /// Return every post ordered by identifier.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// Return one post, or a `NotFound` error.
    async fn get_post(&self, id: PostId) -> Result<Post, Error>;

    /// Delete a post; absent posts count as deleted.
    async fn delete_post(&self, id: PostId) -> Result<(), Error>;
}

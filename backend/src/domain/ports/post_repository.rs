//! Port abstraction for post persistence adapters.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when persisting or loading posts.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// No post exists with the requested identifier.
        NotFound { id: i64 } => "post {id} not found",
    }
}

/// Storage port for blog posts.
///
/// Implementations assign identifiers on insert and return listings ordered
/// by ascending identifier. Deleting an absent post is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return its assigned identifier.
    async fn create(&self, post: &NewPost) -> Result<PostId, PostRepositoryError>;

    /// Load every stored post.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Load a single post by identifier.
    async fn get(&self, id: PostId) -> Result<Post, PostRepositoryError>;

    /// Remove the post with the given identifier if it exists.
    async fn delete(&self, id: PostId) -> Result<(), PostRepositoryError>;
}

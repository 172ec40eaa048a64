//! Post domain service.
//!
//! Implements the [`PostService`] driving port on top of a
//! [`PostRepository`]. Storage failures become internal errors carrying the
//! operation context; the HTTP adapter redacts them before they leave the
//! process.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostRepositoryError, PostService};
use crate::domain::{Error, NewPost, Post, PostId};

#[derive(Debug, Clone, Copy)]
enum Operation {
    Insert,
    Query,
    Delete,
}

impl Operation {
    fn context(self) -> &'static str {
        match self {
            Self::Insert => "insertion error",
            Self::Query => "query error",
            Self::Delete => "deletion error",
        }
    }
}

fn map_repository_error(operation: Operation, error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::NotFound { id } => Error::not_found(format!("post {id} not found")),
        PostRepositoryError::Connection { .. } | PostRepositoryError::Query { .. } => {
            Error::internal(format!("{}: {error}", operation.context()))
        }
    }
}

/// Post service implementing the [`PostService`] port.
#[derive(Clone)]
pub struct PostServiceImpl<R> {
    post_repo: Arc<R>,
}

impl<R> PostServiceImpl<R> {
    /// Create a new service backed by the given repository.
    pub fn new(post_repo: Arc<R>) -> Self {
        Self { post_repo }
    }
}

#[async_trait]
impl<R> PostService for PostServiceImpl<R>
where
    R: PostRepository,
{
    async fn create_post(&self, post: NewPost) -> Result<PostId, Error> {
        self.post_repo
            .create(&post)
            .await
            .map_err(|err| map_repository_error(Operation::Insert, err))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.post_repo
            .list()
            .await
            .map_err(|err| map_repository_error(Operation::Query, err))
    }

    async fn get_post(&self, id: PostId) -> Result<Post, Error> {
        self.post_repo
            .get(id)
            .await
            .map_err(|err| map_repository_error(Operation::Query, err))
    }

    async fn delete_post(&self, id: PostId) -> Result<(), Error> {
        self.post_repo
            .delete(id)
            .await
            .map_err(|err| map_repository_error(Operation::Delete, err))
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;

//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Each call checks out its own pooled connection, so concurrent requests
//! never share a connection. Dropping a returned future abandons the query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{NewPost, Post, PostId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::post;

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn row_to_post(row: PostRow) -> Post {
    let PostRow {
        id,
        title,
        body,
        author,
    } = row;
    Post::from_storage(PostId::new(id), title, body, author)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, new_post: &NewPost) -> Result<PostId, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            title: new_post.title(),
            body: new_post.body(),
            author: new_post.author(),
        };

        let id: i64 = diesel::insert_into(post::table)
            .values(&row)
            .returning(post::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(PostId::new(id))
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = post::table
            .select(PostRow::as_select())
            .order(post::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_post).collect())
    }

    async fn get(&self, id: PostId) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = post::table
            .filter(post::id.eq(id.as_i64()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post)
            .ok_or_else(|| PostRepositoryError::not_found(id.as_i64()))
    }

    async fn delete(&self, id: PostId) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(post::table.filter(post::id.eq(id.as_i64())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}

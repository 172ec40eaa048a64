//! In-memory doubles for integration tests.
//!
//! Compiled only with the `test-support` feature. The doubles implement the
//! domain ports without I/O and record how often they are called, so tests
//! can assert that rejected requests never reach storage.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AuthGateway, AuthGatewayError, PostRepository, PostRepositoryError,
};
use crate::domain::{AuthToken, LoginCredentials, NewPost, Post, PostId};

#[derive(Default)]
struct PostTable {
    next_id: i64,
    rows: BTreeMap<i64, Post>,
}

/// Post repository keeping rows in a map with sequential ids starting at 1.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: Mutex<PostTable>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl InMemoryPostRepository {
    /// Create an empty repository whose identifiers start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls served so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, PostTable>, PostRepositoryError> {
        self.table
            .lock()
            .map_err(|_| PostRepositoryError::connection("post table lock poisoned"))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &NewPost) -> Result<PostId, PostRepositoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut table = self.lock()?;
        table.next_id += 1;
        let id = PostId::new(table.next_id);
        table.rows.insert(id.as_i64(), post.clone().with_id(id));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn get(&self, id: PostId) -> Result<Post, PostRepositoryError> {
        self.lock()?
            .rows
            .get(&id.as_i64())
            .cloned()
            .ok_or_else(|| PostRepositoryError::not_found(id.as_i64()))
    }

    async fn delete(&self, id: PostId) -> Result<(), PostRepositoryError> {
        self.lock()?.rows.remove(&id.as_i64());
        Ok(())
    }
}

/// How the stub gateway answers token checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    /// Answer normally.
    Online,
    /// Fail every call as if the auth service were unreachable.
    Offline,
}

/// Auth gateway accepting exactly one token and one username/password pair.
pub struct StubAuthGateway {
    token: String,
    username: String,
    password: String,
    mode: StubMode,
    validations: AtomicUsize,
}

impl StubAuthGateway {
    /// Gateway that accepts `token`, and issues it for `admin`/`secret`.
    pub fn accepting(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: "admin".to_owned(),
            password: "secret".to_owned(),
            mode: StubMode::Online,
            validations: AtomicUsize::new(0),
        }
    }

    /// Gateway whose every call fails as unavailable.
    pub fn offline() -> Self {
        Self {
            mode: StubMode::Offline,
            ..Self::accepting("unused")
        }
    }

    /// Number of token checks performed so far.
    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), AuthGatewayError> {
        match self.mode {
            StubMode::Online => Ok(()),
            StubMode::Offline => Err(AuthGatewayError::unavailable("connection refused")),
        }
    }
}

#[async_trait]
impl AuthGateway for StubAuthGateway {
    async fn validate_token(&self, token: &AuthToken) -> Result<bool, AuthGatewayError> {
        self.validations.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        Ok(token.as_str() == self.token)
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthToken, AuthGatewayError> {
        self.ensure_online()?;
        if credentials.username() != self.username || credentials.password() != self.password {
            return Err(AuthGatewayError::invalid_credentials());
        }
        AuthToken::new(self.token.clone())
            .map_err(|err| AuthGatewayError::unavailable(err.to_string()))
    }
}

/// Shared handles to the doubles, for building state and asserting calls.
pub struct Doubles {
    /// In-memory storage behind the post service.
    pub posts: Arc<InMemoryPostRepository>,
    /// Auth collaborator stand-in.
    pub auth: Arc<StubAuthGateway>,
}

impl Doubles {
    /// Pair a fresh in-memory repository with the given auth stub.
    pub fn new(auth: StubAuthGateway) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            auth: Arc::new(auth),
        }
    }
}

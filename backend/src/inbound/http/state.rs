//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthGateway, PostService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Post use-cases.
    pub posts: Arc<dyn PostService>,
    /// Auth collaborator, shared with the token gate.
    pub auth: Arc<dyn AuthGateway>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(posts: Arc<dyn PostService>, auth: Arc<dyn AuthGateway>) -> Self {
        Self { posts, auth }
    }
}

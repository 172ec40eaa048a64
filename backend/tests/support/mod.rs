//! Shared wiring for HTTP integration tests.

use std::sync::Arc;

use actix_web::web;
use blog_api::domain::PostServiceImpl;
use blog_api::inbound::http::access::AccessPolicy;
use blog_api::inbound::http::health::HealthState;
use blog_api::inbound::http::state::HttpState;
use blog_api::server::AppDependencies;
use blog_api::test_support::Doubles;

/// Token accepted by the default stub gateway.
pub const VALID_TOKEN: &str = "tok-valid";

/// App dependencies backed by the in-memory doubles.
pub fn deps(doubles: &Doubles, guard_mutations: bool) -> AppDependencies {
    let posts = PostServiceImpl::new(doubles.posts.clone());
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(Arc::new(posts), doubles.auth.clone())),
        policy: Arc::new(AccessPolicy::for_blog(guard_mutations)),
    }
}

/// `Authorization` header carrying `token` as a bearer credential.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

//! HTTP inbound adapter exposing the blog REST endpoints.

pub mod access;
pub mod envelope;
pub mod error;
pub mod health;
pub mod login;
pub mod posts;
pub mod state;
pub mod validation;

pub use error::ApiResult;

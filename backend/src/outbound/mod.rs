//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed post repository using Diesel ORM
//! - **auth**: HTTP client for the external authentication collaborator
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auth;
pub mod persistence;

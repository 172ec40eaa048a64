//! Blog API library modules.
//!
//! Hexagonal layout: [`domain`] holds types, ports and the post service;
//! [`inbound`] and [`outbound`] adapt HTTP, PostgreSQL and the auth service;
//! [`server`] wires them into an actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

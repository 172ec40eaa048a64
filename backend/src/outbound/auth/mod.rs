//! Auth collaborator outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `AuthGateway`
//! port.

mod dto;
mod http_gateway;

pub use http_gateway::HttpAuthGateway;

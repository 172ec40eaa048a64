//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing and token authentication.

pub mod token_gate;
pub mod trace;

pub use token_gate::TokenGate;
pub use trace::Trace;

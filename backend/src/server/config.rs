//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{AuthGateway, PostService};
use crate::inbound::http::access::AccessPolicy;

const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) posts: Arc<dyn PostService>,
    pub(crate) auth: Arc<dyn AuthGateway>,
    pub(crate) policy: AccessPolicy,
    pub(crate) shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration around the post service and auth
    /// gateway. Only listing posts is guarded until a policy is attached.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        posts: Arc<dyn PostService>,
        auth: Arc<dyn AuthGateway>,
    ) -> Self {
        Self {
            bind_addr,
            posts,
            auth,
            policy: AccessPolicy::for_blog(false),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// Replace the access policy enforced by the token gate.
    #[must_use]
    pub fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound how long in-flight requests may run after shutdown starts.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the access policy the token gate will enforce.
    #[must_use]
    pub fn access_policy(&self) -> &AccessPolicy {
        &self.policy
    }
}

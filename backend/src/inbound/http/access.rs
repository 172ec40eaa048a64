//! Declarative table of routes that require a bearer token.
//!
//! Routes are keyed by HTTP method and the actix route pattern (for example
//! `/post/{id}/`), so one table entry covers every concrete id. Anything not
//! listed is public.

use actix_web::http::Method;

/// Route pattern for the post collection.
pub const POSTS_ROUTE: &str = "/post/";
/// Route pattern for a single post.
pub const POST_ROUTE: &str = "/post/{id}/";
/// Route pattern for the login endpoint.
pub const LOGIN_ROUTE: &str = "/login/";

/// Access requirement for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Served without authentication.
    Public,
    /// Requires a token the auth collaborator accepts.
    TokenRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteAccess {
    method: Method,
    pattern: String,
    access: Access,
}

/// Lookup table from `(method, route pattern)` to [`Access`].
///
/// # Examples
/// ```
/// use actix_web::http::Method;
/// use blog_api::inbound::http::access::{Access, AccessPolicy};
///
/// let policy = AccessPolicy::default().require_token(Method::GET, "/post/");
/// assert_eq!(policy.access_for(&Method::GET, Some("/post/")), Access::TokenRequired);
/// assert_eq!(policy.access_for(&Method::POST, Some("/post/")), Access::Public);
/// assert_eq!(policy.access_for(&Method::GET, None), Access::Public);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    routes: Vec<RouteAccess>,
}

impl AccessPolicy {
    /// Policy for the blog API.
    ///
    /// Listing posts always needs a token. With `guard_mutations`, creating
    /// and deleting posts need one too.
    pub fn for_blog(guard_mutations: bool) -> Self {
        let policy = Self::default().require_token(Method::GET, POSTS_ROUTE);
        if guard_mutations {
            policy
                .require_token(Method::POST, POSTS_ROUTE)
                .require_token(Method::DELETE, POST_ROUTE)
        } else {
            policy
        }
    }

    /// Mark a route as requiring a token, replacing any previous entry.
    #[must_use]
    pub fn require_token(self, method: Method, pattern: &str) -> Self {
        self.with_access(method, pattern, Access::TokenRequired)
    }

    /// Mark a route as public, replacing any previous entry.
    #[must_use]
    pub fn allow(self, method: Method, pattern: &str) -> Self {
        self.with_access(method, pattern, Access::Public)
    }

    fn with_access(mut self, method: Method, pattern: &str, access: Access) -> Self {
        self.routes
            .retain(|route| !(route.method == method && route.pattern == pattern));
        self.routes.push(RouteAccess {
            method,
            pattern: pattern.to_owned(),
            access,
        });
        self
    }

    /// Access required for a request matched to `pattern`.
    ///
    /// Requests that matched no route are public; they end in a 404.
    pub fn access_for(&self, method: &Method, pattern: Option<&str>) -> Access {
        let Some(pattern) = pattern else {
            return Access::Public;
        };
        self.routes
            .iter()
            .find(|route| route.method == *method && route.pattern == pattern)
            .map_or(Access::Public, |route| route.access)
    }

    /// Routes that require a token, as `"METHOD pattern"` strings.
    pub fn guarded_routes(&self) -> Vec<String> {
        self.routes
            .iter()
            .filter(|route| route.access == Access::TokenRequired)
            .map(|route| format!("{} {}", route.method, route.pattern))
            .collect()
    }
}

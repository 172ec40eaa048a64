//! Bearer-token gate backed by the auth collaborator.
//!
//! The gate consults an [`AccessPolicy`] with the request's matched route
//! pattern. Public routes pass straight through. Guarded routes need an
//! `Authorization` header carrying a token the collaborator accepts; anything
//! else is answered here and never reaches the handler.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error, warn};

use crate::domain::ports::{AuthGateway, AuthGatewayError};
use crate::domain::{AuthToken, Error as DomainError};
use crate::inbound::http::access::{Access, AccessPolicy};

const MISSING_TOKEN_MESSAGE: &str = "unauthorized";
const INVALID_TOKEN_MESSAGE: &str = "invalid token";
const UNAVAILABLE_MESSAGE: &str = "auth service unavailable";

/// Middleware factory enforcing an [`AccessPolicy`].
///
/// # Examples
/// ```ignore
/// use std::sync::Arc;
/// use actix_web::App;
/// use blog_api::inbound::http::access::AccessPolicy;
/// use blog_api::middleware::TokenGate;
///
/// let app = App::new().wrap(TokenGate::new(gateway, Arc::new(AccessPolicy::for_blog(false))));
/// ```
#[derive(Clone)]
pub struct TokenGate {
    gateway: Arc<dyn AuthGateway>,
    policy: Arc<AccessPolicy>,
}

impl TokenGate {
    /// Build a gate that asks `gateway` about tokens on routes `policy` guards.
    pub fn new(gateway: Arc<dyn AuthGateway>, policy: Arc<AccessPolicy>) -> Self {
        Self { gateway, policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGateMiddleware {
            service: Rc::new(service),
            gateway: Arc::clone(&self.gateway),
            policy: Arc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`TokenGate`].
pub struct TokenGateMiddleware<S> {
    service: Rc<S>,
    gateway: Arc<dyn AuthGateway>,
    policy: Arc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for TokenGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let pattern = req.match_pattern();
        let access = self.policy.access_for(req.method(), pattern.as_deref());
        if access == Access::Public {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let service = Rc::clone(&self.service);
        let gateway = Arc::clone(&self.gateway);
        Box::pin(async move {
            let verdict = match extract_token(req.headers()) {
                Ok(token) => verify(gateway.as_ref(), &token).await,
                Err(rejection) => Err(rejection),
            };
            match verdict {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(rejection) => Ok(req.error_response(rejection).map_into_right_body()),
            }
        })
    }
}

fn extract_token(headers: &HeaderMap) -> Result<AuthToken, DomainError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        warn!(reason = "missing_token", "rejected request without authorization header");
        return Err(DomainError::unauthorized(MISSING_TOKEN_MESSAGE));
    };
    let Ok(raw) = value.to_str() else {
        warn!(reason = "malformed_token", "rejected request with non-text authorization header");
        return Err(DomainError::unauthorized(MISSING_TOKEN_MESSAGE));
    };
    AuthToken::from_authorization_header(raw).map_err(|_| {
        warn!(reason = "blank_token", "rejected request with blank authorization header");
        DomainError::unauthorized(MISSING_TOKEN_MESSAGE)
    })
}

async fn verify(gateway: &dyn AuthGateway, token: &AuthToken) -> Result<(), DomainError> {
    match gateway.validate_token(token).await {
        Ok(true) => {
            debug!("token accepted");
            Ok(())
        }
        Ok(false) | Err(AuthGatewayError::InvalidCredentials) => {
            warn!(reason = "invalid_token", "rejected request with invalid token");
            Err(DomainError::unauthorized(INVALID_TOKEN_MESSAGE))
        }
        Err(AuthGatewayError::Unavailable { message }) => {
            error!(reason = "auth_unavailable", error = %message, "token check failed");
            Err(DomainError::service_unavailable(UNAVAILABLE_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "token_gate_tests.rs"]
mod tests;

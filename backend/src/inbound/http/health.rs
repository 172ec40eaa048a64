//! Health endpoints: liveness and readiness checks for orchestrators.
//!
//! Both answer with the usual JSON envelopes: `{"status":"OK"}` when the
//! check passes, a `service_unavailable` error body otherwise.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::Error;
use crate::inbound::http::envelope::{ErrorResponse, OkResponse};

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so liveness checks fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether the server has bound its listener and accepts traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the server is still running, i.e. not draining.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn check_response(passed: bool, failure: &str) -> HttpResponse {
        if passed {
            HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .json(OkResponse::ok())
        } else {
            HttpResponse::ServiceUnavailable()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .json(ErrorResponse::from(&Error::service_unavailable(failure)))
        }
    }
}

/// Readiness check. 200 once the server is bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = OkResponse),
        (status = 503, description = "Server is not ready", body = ErrorResponse)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_ready(), "server is not ready")
}

/// Liveness check. 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive", body = OkResponse),
        (status = 503, description = "Server is shutting down", body = ErrorResponse)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::check_response(state.is_alive(), "server is shutting down")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::App;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE, "Error")]
    #[case(true, StatusCode::OK, "OK")]
    #[actix_web::test]
    async fn readiness_follows_state(
        #[case] mark_ready: bool,
        #[case] expected: StatusCode,
        #[case] expected_status: &str,
    ) {
        let state = web::Data::new(HealthState::new());
        if mark_ready {
            state.mark_ready();
        }
        let app = actix_test::init_service(App::new().app_data(state).service(ready)).await;

        let req = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], expected_status);
    }

    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        let app = actix_test::init_service(App::new().app_data(state.clone()).service(live)).await;

        let req = actix_test::TestRequest::get().uri("/health/live").to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);

        state.mark_unhealthy();
        let req = actix_test::TestRequest::get().uri("/health/live").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({
                "status": "Error",
                "error": "server is shutting down",
                "code": "service_unavailable"
            })
        );
    }
}

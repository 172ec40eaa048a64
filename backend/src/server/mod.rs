//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::{DB_URL_FALLBACK_ENV, ResolvedSettings, ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::access::AccessPolicy;
use crate::inbound::http::error::{json_error_handler, not_found};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::login::login;
use crate::inbound::http::posts::{create_post, delete_post, get_post, list_posts};
use crate::inbound::http::state::HttpState;
use crate::middleware::{TokenGate, Trace};

/// Shared values cloned into every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags served by the health routes.
    pub health_state: web::Data<HealthState>,
    /// Post service and auth gateway handed to the handlers.
    pub http_state: web::Data<HttpState>,
    /// Which routes the token gate guards.
    pub policy: Arc<AccessPolicy>,
}

/// Assemble the application: routes, JSON error handling, the token gate
/// and the trace middleware (outermost, so gate rejections are traced too).
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        policy,
    } = deps;
    let gate = TokenGate::new(http_state.auth.clone(), policy);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(create_post)
        .service(list_posts)
        .service(get_post)
        .service(delete_post)
        .service(login)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
        .wrap(gate)
        .wrap(Trace)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        posts,
        auth,
        policy,
        shutdown_timeout,
    } = config;
    let http_state = web::Data::new(HttpState::new(posts, auth));
    info!(guarded = ?policy.guarded_routes(), "token gate configured");
    let policy = Arc::new(policy);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            policy: policy.clone(),
        })
    })
    .shutdown_timeout(shutdown_timeout.as_secs())
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server bound");
    health_state.mark_ready();
    Ok(server)
}

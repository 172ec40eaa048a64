//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer (posts,
//! login, health), the envelope schemas they return, and the bearer token
//! scheme checked by the token gate.
//!
//! The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::envelope::{
    CreatedResponse, ErrorResponse, OkResponse, PostBody, PostResponse, PostsResponse,
    ResponseStatus, TokenResponse,
};
use crate::inbound::http::login::LoginRequest;
use crate::inbound::http::posts::CreatePostRequest;

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Token issued by POST /login/ and verified with the auth service.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog API",
        description = "CRUD over blog posts with token-gated routes backed by an external auth service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::login::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ResponseStatus,
        PostBody,
        OkResponse,
        CreatedResponse,
        PostResponse,
        PostsResponse,
        TokenResponse,
        ErrorResponse,
        CreatePostRequest,
        LoginRequest,
    )),
    tags(
        (name = "posts", description = "Blog post operations"),
        (name = "auth", description = "Token issuance via the auth service"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! Login handler.
//!
//! ```text
//! POST /login/ {"username":"admin","password":"secret"}
//! ```
//!
//! Credentials are forwarded to the auth collaborator; this service never
//! sees user records.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::ports::AuthGatewayError;
use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ErrorResponse, TokenResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Login request body for `POST /login/`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Account name, trimmed before use.
    pub username: Option<String>,
    /// Account password, forwarded verbatim.
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

fn map_gateway_error(err: AuthGatewayError) -> Error {
    match err {
        AuthGatewayError::InvalidCredentials => Error::invalid_request("invalid credentials"),
        AuthGatewayError::Unavailable { message } => {
            warn!(error = %message, "auth collaborator unavailable during login");
            Error::service_unavailable("auth service unavailable")
        }
    }
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request or credentials", body = ErrorResponse),
        (status = 503, description = "Auth service unavailable", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(|err| {
        warn!(field = err.field(), "rejected invalid login payload");
        login_validation_error(err)
    })?;
    let token = state
        .auth
        .authenticate(&credentials)
        .await
        .map_err(map_gateway_error)?;
    info!(username = credentials.username(), "login succeeded");
    Ok(HttpResponse::Ok().json(TokenResponse::ok(token.as_str())))
}

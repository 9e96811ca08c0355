//! Account handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"alice","password":"hunter22"}
//! POST /api/auth/login    {"username":"alice","password":"hunter22"}
//! GET  /api/auth/user
//! ```

use actix_web::{get, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccessToken, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::validation_error;

/// Body for register and login. Missing fields read as empty strings.
#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CredentialsBody {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "hunter22")]
    pub password: String,
}

/// Freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenBody {
    pub token: String,
}

impl From<AccessToken> for TokenBody {
    fn from(token: AccessToken) -> Self {
        Self {
            token: token.expose().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<User> for UserResponseBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_str().to_owned(),
            created_at: user
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Create an account and return its first token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = CredentialsBody,
    responses(
        (status = 200, description = "Account created", body = TokenBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsBody>,
) -> ApiResult<web::Json<TokenBody>> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(&body.username, &body.password)
        .map_err(|errors| validation_error(&errors))?;
    let token = state.auth.register(registration).await?;
    Ok(web::Json(token.into()))
}

/// Exchange credentials for a token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsBody,
    responses(
        (status = 200, description = "Logged in", body = TokenBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsBody>,
) -> ApiResult<web::Json<TokenBody>> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.username, &body.password)
        .map_err(|errors| validation_error(&errors))?;
    let token = state.auth.login(credentials).await?;
    Ok(web::Json(token.into()))
}

/// Profile of the token's owner.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    responses(
        (status = 200, description = "Current user", body = UserResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("AuthToken" = []))
)]
#[get("/auth/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponseBody>> {
    let user = state.auth.current_user(caller.user_id()).await?;
    Ok(web::Json(user.into()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(current_user);
}

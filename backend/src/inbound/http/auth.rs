//! Bearer-token extractor.
//!
//! Handlers that take an [`AuthenticatedUser`] only run once the presented
//! token has been resolved to a caller. The token is read from `x-auth-token`,
//! falling back to `Authorization: Bearer <token>`.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{AccessToken, Error, UserId};
use crate::inbound::http::state::HttpState;

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, established from its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

fn presented_token(headers: &HeaderMap) -> Option<AccessToken> {
    let custom = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());
    let bearer = || {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    };
    custom.or_else(bearer).map(AccessToken::from_presented)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = presented_token(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let Some(token) = token else {
                debug!("request without auth token");
                return Err(Error::unauthorized("No token, authorization denied").into());
            };
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let user_id = state.auth.verify_token(&token).await?;
            Ok(Self(user_id))
        })
    }
}

//! Bearer-token guard for protected handlers.
//!
//! Handlers take an [`AuthenticatedUser`] argument; extraction reads the
//! `Authorization: Bearer <token>` header and resolves it through the
//! [`crate::domain::ports::PrincipalResolver`] port before the handler body
//! runs. Any failure short-circuits with `401`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::auth_service::INVALID_TOKEN_MESSAGE;
use crate::domain::{Error, ErrorCode, Principal};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Principal resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(Principal);

impl AuthenticatedUser {
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    #[must_use]
    pub fn into_principal(self) -> Principal {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::authentication_failed("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::authentication_failed(INVALID_TOKEN_MESSAGE))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| Error::authentication_failed(INVALID_TOKEN_MESSAGE))
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered on the app"))?;
            let principal = state
                .principals
                .resolve(&token)
                .await
                .map_err(|err| match err.code() {
                    // A valid token for a deleted account is still unauthenticated.
                    ErrorCode::NotFound => {
                        debug!(reason = %err.message(), "bearer token rejected");
                        Error::authentication_failed(err.message())
                    }
                    _ => err,
                })?;
            Ok(AuthenticatedUser(principal))
        })
    }
}

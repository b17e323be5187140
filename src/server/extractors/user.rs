use crate::{
    error::Error as KeeperError, security::AuthError, server::app_state::AppState, users::User,
};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use std::{future::Future, pin::Pin};
use tracing::warn;

/// Name of the header that carries the access token.
pub const AUTHORIZATION_HEADER_NAME: &str = "authorization";

const BEARER_SCHEME: &str = "Bearer";

impl FromRequest for User {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = web::Data::<AppState>::extract(&req).await?;

            let Some(token) = req
                .headers()
                .get(AUTHORIZATION_HEADER_NAME)
                .and_then(|value| value.to_str().ok())
                .map(strip_bearer_scheme)
                .filter(|token| !token.is_empty())
            else {
                warn!(request.path = req.path(), "Access token is missing.");
                return Err(KeeperError::from(anyhow::Error::new(AuthError::MissingToken)).into());
            };

            match state.api.security().authenticate(token).await {
                Ok(user) => Ok(user),
                Err(err) => {
                    warn!(request.path = req.path(), "Failed to authenticate user: {err}");
                    Err(KeeperError::from(err).into())
                }
            }
        })
    }
}

/// Strips the optional `Bearer` authentication scheme, the scheme name is case-insensitive.
fn strip_bearer_scheme(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => token.trim(),
        _ => value,
    }
}

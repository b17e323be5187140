mod claims;

use self::claims::Claims;
use crate::users::UserId;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use std::{
    fmt::{Debug, Formatter},
    time::Duration,
};
use time::OffsetDateTime;

/// Reasons an access token can be rejected for. Callers at the boundary must collapse all of
/// them into a single generic "unauthorized" response.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Access token has expired.")]
    Expired,
    #[error("Access token is malformed.")]
    Malformed,
    #[error("Access token is invalid.")]
    BadSignature,
}

/// Issues and validates HS256 signed bearer tokens that carry the ID of the token owner.
#[derive(Clone)]
pub struct AccessTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl AccessTokens {
    pub fn new(signing_key: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            ttl,
        }
    }

    /// Issues a token for the specified user that expires after the configured TTL.
    pub fn issue(&self, user_id: UserId) -> anyhow::Result<String> {
        self.issue_with_expiration(user_id, OffsetDateTime::now_utc() + self.ttl)
    }

    /// Issues a token for the specified user with an absolute expiration time.
    pub fn issue_with_expiration(
        &self,
        user_id: UserId,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                user_id: *user_id,
                exp: expires_at,
            },
            &self.encoding_key,
        )?)
    }

    /// Verifies token signature and then its expiration, and returns the ID of the token owner.
    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed,
            })?
            .claims;

        UserId::try_from(claims.user_id).map_err(|_| TokenError::Malformed)
    }
}

impl Debug for AccessTokens {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokens")
            .field("signing_key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

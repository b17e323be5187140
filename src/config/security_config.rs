use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::{
    fmt::{Debug, Formatter},
    time::Duration,
};

/// Configuration for the security functionality.
#[serde_as]
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct SecurityConfig {
    /// Hex-encoded 32-byte master key used to wrap data keys of the stored secrets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_key: Option<String>,
    /// Secret key used to sign access tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,
    /// Access token time-to-live. Default is 24 hours.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub token_ttl: Duration,
    /// Server-side secret mixed into user password hashes.
    pub password_pepper: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            master_key: None,
            jwt_secret: None,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            password_pepper: String::new(),
        }
    }
}

impl Debug for SecurityConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("SecurityConfig")
            .field("master_key", &redact(&self.master_key))
            .field("jwt_secret", &redact(&self.jwt_secret))
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &"[REDACTED]")
            .finish()
    }
}

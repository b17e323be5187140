use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;

/// Vault account. Every secret is owned by exactly one user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub login: String,
    /// Argon2id PHC string, never exposed to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}

impl AsRef<User> for User {
    fn as_ref(&self) -> &User {
        self
    }
}

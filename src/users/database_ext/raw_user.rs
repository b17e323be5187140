use crate::users::{User, UserId};
use time::OffsetDateTime;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawUser {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<RawUser> for User {
    type Error = anyhow::Error;

    fn try_from(raw_user: RawUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::try_from(raw_user.id)?,
            login: raw_user.login,
            password_hash: raw_user.password_hash,
            created_at: OffsetDateTime::from_unix_timestamp(raw_user.created_at)?,
            updated_at: OffsetDateTime::from_unix_timestamp(raw_user.updated_at)?,
        })
    }
}

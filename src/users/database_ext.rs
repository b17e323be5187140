mod raw_user;

use self::raw_user::RawUser;
use crate::{
    database::Database,
    users::{User, UserId, UserSignupError},
};
use sqlx::{query_as, query_scalar};

/// Extends primary database with the user management-related methods.
impl Database {
    /// Retrieves user from the `users` table using user ID.
    pub async fn get_user(&self, id: UserId) -> anyhow::Result<Option<User>> {
        query_as::<_, RawUser>(
            r#"
SELECT id, login, password_hash, created_at, updated_at
FROM users
WHERE id = ?1
                "#,
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Retrieves user from the `users` table using user login (case-insensitive).
    pub async fn get_user_by_login<T: AsRef<str>>(&self, login: T) -> anyhow::Result<Option<User>> {
        query_as::<_, RawUser>(
            r#"
SELECT id, login, password_hash, created_at, updated_at
FROM users
WHERE login = ?1
                "#,
        )
        .bind(login.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Inserts user to the `users` table, fails with [`UserSignupError::LoginAlreadyRegistered`]
    /// if the login is already taken. The `id` of the provided user is ignored.
    pub async fn insert_user<U: AsRef<User>>(&self, user: U) -> anyhow::Result<UserId> {
        let user = user.as_ref();
        let user_id: i64 = query_scalar(
            r#"
INSERT INTO users (login, password_hash, created_at, updated_at)
VALUES ( ?1, ?2, ?3, ?4 )
RETURNING id
        "#,
        )
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(user.created_at.unix_timestamp())
        .bind(user.updated_at.unix_timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                anyhow::Error::new(UserSignupError::LoginAlreadyRegistered)
            }
            _ => anyhow::Error::new(err),
        })?;

        UserId::try_from(user_id)
    }
}

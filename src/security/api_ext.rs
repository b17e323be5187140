use crate::{
    api::Api,
    security::AuthError,
    users::{User, UserId, UserSignupError},
};
use anyhow::Context;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Keeper security controller: user signup, login and access token verification.
pub struct SecurityApiExt<'a> {
    api: &'a Api,
}

impl<'a> SecurityApiExt<'a> {
    /// Instantiates security API extension.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Registers a new user with the specified login and password. Fails if the login is already
    /// taken.
    pub async fn signup(&self, login: &str, password: &str) -> anyhow::Result<User> {
        let login = login.trim();
        if login.is_empty() {
            return Err(UserSignupError::EmptyLogin.into());
        }

        if password.is_empty() {
            return Err(UserSignupError::EmptyPassword.into());
        }

        let now = OffsetDateTime::now_utc().replace_nanosecond(0)?;
        let mut user = User {
            id: UserId::default(),
            login: login.to_string(),
            password_hash: self.api.passwords.hash(password).await?,
            created_at: now,
            updated_at: now,
        };

        user.id = self
            .api
            .db
            .insert_user(&user)
            .await
            .with_context(|| "Cannot signup user, failed to insert a new user.")?;
        info!(user.id = %user.id, "Successfully signed up a new user.");

        Ok(user)
    }

    /// Checks the user credentials and issues a new access token.
    pub async fn login(&self, login: &str, password: &str) -> anyhow::Result<String> {
        let user = self.api.db.get_user_by_login(login.trim()).await?;
        let password_matches = self
            .api
            .passwords
            .verify(password, user.as_ref().map(|user| user.password_hash.as_str()))
            .await?;

        match user {
            Some(user) if password_matches => self.api.tokens.issue(user.id),
            Some(user) => {
                warn!(user.id = %user.id, "Failed login attempt with invalid password.");
                Err(AuthError::InvalidCredentials.into())
            }
            None => {
                warn!("Failed login attempt for unknown user.");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Resolves the user the access token was issued to.
    pub async fn authenticate(&self, token: &str) -> anyhow::Result<User> {
        let user_id = self.api.tokens.validate(token)?;
        match self.api.db.get_user(user_id).await? {
            Some(user) => Ok(user),
            None => {
                warn!(user.id = %user_id, "Access token was issued to a user that doesn't exist.");
                Err(AuthError::UnknownUser.into())
            }
        }
    }
}

impl Api {
    /// Returns an API to work with users security.
    pub fn security(&self) -> SecurityApiExt<'_> {
        SecurityApiExt::new(self)
    }
}

use crate::{
    config::Config,
    database::Database,
    secrets::FileStorage,
    security::{AccessTokens, EnvelopeCipher, PasswordHasherWithPepper},
};
use anyhow::Context;

/// Collection of the Keeper services shared by all requests. Module-specific APIs are implemented
/// as extensions in every module.
pub struct Api {
    pub db: Database,
    pub cipher: EnvelopeCipher,
    pub tokens: AccessTokens,
    pub passwords: PasswordHasherWithPepper,
    pub file_storage: FileStorage,
}

impl Api {
    /// Instantiates APIs collection with the specified config and database. Fails if the keys
    /// aren't configured properly.
    pub fn new(config: &Config, db: Database) -> anyhow::Result<Self> {
        let master_key = config
            .security
            .master_key
            .as_deref()
            .context("Master key (`security.master_key`) isn't configured.")?;
        let jwt_secret = config
            .security
            .jwt_secret
            .as_deref()
            .context("JWT secret (`security.jwt_secret`) isn't configured.")?;

        Ok(Self {
            cipher: EnvelopeCipher::from_hex(master_key)?,
            tokens: AccessTokens::new(jwt_secret.as_bytes(), config.security.token_ttl),
            passwords: PasswordHasherWithPepper::new(config.security.password_pepper.as_bytes()),
            file_storage: FileStorage::new(config.storage.root.clone()),
            db,
        })
    }
}

impl AsRef<Api> for Api {
    fn as_ref(&self) -> &Self {
        self
    }
}

mod secret_create_params;

pub use self::secret_create_params::SecretCreateParams;
use crate::{
    api::Api,
    secrets::{BinaryData, CardData, PasswordData, Secret, SecretType, SecretsError},
    users::User,
};
use std::str::FromStr;
use tracing::info;

/// API to manage secrets of the specific user.
pub struct SecretsApiExt<'a> {
    api: &'a Api,
    user: &'a User,
}

impl<'a> SecretsApiExt<'a> {
    /// Creates Secrets API.
    pub fn new(api: &'a Api, user: &'a User) -> Self {
        Self { api, user }
    }

    /// Encrypts and stores a new secret, returns the stored (still encrypted) secret.
    pub async fn create_secret(&self, params: SecretCreateParams) -> anyhow::Result<Secret> {
        // Validate type before anything is encrypted.
        let secret_type = SecretType::from_str(&params.secret_type)?;
        let meta_data = params
            .meta_data
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()?
            .unwrap_or_default();

        let owner_id = self.user.id;
        let cipher = &self.api.cipher;
        let mut secret = match secret_type {
            SecretType::Password => {
                let password = params
                    .password
                    .ok_or(SecretsError::EmptyField("password"))?;
                Secret::new_password_secret(
                    owner_id,
                    &params.name,
                    PasswordData::new(
                        password.username,
                        password.password,
                        password.url,
                        params.notes,
                        meta_data,
                    )?,
                    cipher,
                )?
            }
            SecretType::Card => {
                let card = params.card.ok_or(SecretsError::EmptyField("card"))?;
                Secret::new_card_secret(
                    owner_id,
                    &params.name,
                    CardData::new(
                        card.number,
                        card.owner,
                        card.expire_date,
                        card.cvv,
                        params.notes,
                        meta_data,
                    )?,
                    cipher,
                )?
            }
            SecretType::Binary => {
                let binary = params.binary.ok_or(SecretsError::EmptyField("binary"))?;
                Secret::new_file_secret(
                    owner_id,
                    &params.name,
                    BinaryData::new(binary.name, binary.content, params.notes, meta_data)?,
                    cipher,
                )?
            }
        };

        self.api
            .db
            .save_secret(&mut secret, &self.api.file_storage)
            .await?;
        info!(user.id = %owner_id, secret.id = secret.id, "Created a new secret.");

        Ok(secret)
    }

    /// Retrieves and decrypts secrets with the specified name, or all user secrets if the name
    /// isn't specified.
    pub async fn get_secrets(&self, name: Option<&str>) -> anyhow::Result<Vec<Secret>> {
        let mut secrets = match name {
            Some(name) => {
                self.api
                    .db
                    .get_secrets_by_name(self.user.id, name, &self.api.file_storage)
                    .await?
            }
            None => {
                self.api
                    .db
                    .get_all_user_secrets(self.user.id, &self.api.file_storage)
                    .await?
            }
        };

        for secret in secrets.iter_mut() {
            secret.decrypt_data(&self.api.cipher)?;
        }

        Ok(secrets)
    }
}

impl Api {
    /// Returns an API to work with user secrets.
    pub fn secrets<'a>(&'a self, user: &'a User) -> SecretsApiExt<'a> {
        SecretsApiExt::new(self, user)
    }
}

mod raw_secret;
mod raw_secret_data;

use crate::{
    database::Database,
    secrets::{
        FILE_STORAGE_TYPE, FileStorage, Secret, SecretData, SecretType, SecretsError,
        normalize_meta_data,
    },
    users::UserId,
};
use anyhow::Context;
use raw_secret::RawSecret;
use raw_secret_data::{RawCardData, RawExternalStorage, RawPasswordData};
use sqlx::{query, query_as, query_scalar};
use tracing::debug;

/// Extends primary database with the secrets-related methods.
impl Database {
    /// Stores the secret together with its encrypted data in a single transaction and assigns
    /// the storage ID to the secret. Content of the binary secrets is written to the external
    /// storage, and if the data insert fails, neither the secret nor its content remain stored.
    pub async fn save_secret(
        &self,
        secret: &mut Secret,
        file_storage: &FileStorage,
    ) -> anyhow::Result<i64> {
        if secret.is_saved() {
            return Err(SecretsError::AlreadyStored(secret.id).into());
        }

        let data = secret
            .data()
            .ok_or(SecretsError::MissingData(secret.id))?;
        if !data.is_encrypted() {
            return Err(SecretsError::NotEncrypted.into());
        }
        let meta_data = normalize_meta_data(data.base().meta_data.clone())?;

        let mut tx = self.pool.begin().await?;
        let secret_id: i64 = query_scalar(
            r#"
INSERT INTO secrets (user_id, name, type, created_at, updated_at, deleted_at, version)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7 )
RETURNING id
        "#,
        )
        .bind(*secret.owner_id)
        .bind(&secret.name)
        .bind(secret.secret_type().as_str())
        .bind(secret.created_at.unix_timestamp())
        .bind(secret.updated_at.unix_timestamp())
        .bind(secret.deleted_at.map(|deleted_at| deleted_at.unix_timestamp()))
        .bind(i64::from(secret.version))
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert secret for user ({}).", secret.owner_id))?;

        let stored_path = match data {
            SecretData::Password(data) => {
                query(
                    r#"
INSERT INTO password_data (secret_id, username, password, url, notes, metadata)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?6 )
        "#,
                )
                .bind(secret_id)
                .bind(&data.username)
                .bind(&data.password)
                .bind(&data.url)
                .bind(&data.base.notes)
                .bind(&meta_data)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to insert password data ({secret_id})."))?;
                None
            }
            SecretData::Card(data) => {
                query(
                    r#"
INSERT INTO card_data (secret_id, number, owner, expire_date, cvv, notes, metadata)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7 )
        "#,
                )
                .bind(secret_id)
                .bind(&data.number)
                .bind(&data.owner)
                .bind(&data.expire_date)
                .bind(&data.cvv)
                .bind(&data.base.notes)
                .bind(&meta_data)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to insert card data ({secret_id})."))?;
                None
            }
            SecretData::Binary(data) => {
                let stored_file = file_storage
                    .write(secret.owner_id, &data.content)
                    .await
                    .with_context(|| format!("Failed to store binary content ({secret_id})."))?;

                let insert_result = query(
                    r#"
INSERT INTO external_storage (secret_id, storage_type, storage_path, file_name, checksum, notes, metadata)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7 )
        "#,
                )
                .bind(secret_id)
                .bind(FILE_STORAGE_TYPE)
                .bind(&stored_file.path)
                .bind(&data.name)
                .bind(&stored_file.checksum)
                .bind(&data.base.notes)
                .bind(&meta_data)
                .execute(&mut *tx)
                .await;
                if let Err(err) = insert_result {
                    file_storage.remove(&stored_file.path).await;
                    return Err(anyhow::Error::new(err)
                        .context(format!("Failed to insert binary data ({secret_id}).")));
                }

                Some(stored_file.path)
            }
        };

        if let Err(err) = tx.commit().await {
            if let Some(path) = stored_path {
                file_storage.remove(&path).await;
            }
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to commit secret ({secret_id}).")));
        }

        secret.id = secret_id;
        if let Some(path) = stored_path {
            secret.set_storage_path(path);
        }
        debug!(secret.id = secret_id, user.id = %secret.owner_id, "Stored secret.");

        Ok(secret_id)
    }

    /// Retrieves non-deleted user secrets with the specified name, data isn't decrypted. Fails
    /// with `SecretsError::NotFound` if there are no such secrets.
    pub async fn get_secrets_by_name(
        &self,
        owner_id: UserId,
        name: &str,
        file_storage: &FileStorage,
    ) -> anyhow::Result<Vec<Secret>> {
        let raw_secrets = query_as::<_, RawSecret>(
            r#"
SELECT id, user_id, name, type AS secret_type, created_at, updated_at, deleted_at, version
FROM secrets
WHERE user_id = ?1 AND name = ?2 AND deleted_at IS NULL
ORDER BY id
        "#,
        )
        .bind(*owner_id)
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        if raw_secrets.is_empty() {
            return Err(SecretsError::NotFound.into());
        }

        self.attach_secrets_data(raw_secrets, file_storage).await
    }

    /// Retrieves all non-deleted user secrets, data isn't decrypted.
    pub async fn get_all_user_secrets(
        &self,
        owner_id: UserId,
        file_storage: &FileStorage,
    ) -> anyhow::Result<Vec<Secret>> {
        let raw_secrets = query_as::<_, RawSecret>(
            r#"
SELECT id, user_id, name, type AS secret_type, created_at, updated_at, deleted_at, version
FROM secrets
WHERE user_id = ?1 AND deleted_at IS NULL
ORDER BY id
        "#,
        )
        .bind(*owner_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_secrets_data(raw_secrets, file_storage).await
    }

    async fn attach_secrets_data(
        &self,
        raw_secrets: Vec<RawSecret>,
        file_storage: &FileStorage,
    ) -> anyhow::Result<Vec<Secret>> {
        let mut secrets = Vec::with_capacity(raw_secrets.len());
        for raw_secret in raw_secrets {
            let mut secret = Secret::try_from(raw_secret)?;
            let data = self
                .get_secret_data(&secret, file_storage)
                .await?
                .ok_or(SecretsError::MissingData(secret.id))?;
            secret.set_data(data)?;
            secrets.push(secret);
        }

        Ok(secrets)
    }

    async fn get_secret_data(
        &self,
        secret: &Secret,
        file_storage: &FileStorage,
    ) -> anyhow::Result<Option<SecretData>> {
        let data = match secret.secret_type() {
            SecretType::Password => query_as::<_, RawPasswordData>(
                r#"
SELECT username, password, url, notes, metadata
FROM password_data
WHERE secret_id = ?1
        "#,
            )
            .bind(secret.id)
            .fetch_optional(&self.pool)
            .await?
            .map(|raw| SecretData::Password(raw.into())),
            SecretType::Card => query_as::<_, RawCardData>(
                r#"
SELECT number, owner, expire_date, cvv, notes, metadata
FROM card_data
WHERE secret_id = ?1
        "#,
            )
            .bind(secret.id)
            .fetch_optional(&self.pool)
            .await?
            .map(|raw| SecretData::Card(raw.into())),
            SecretType::Binary => {
                let Some(raw) = query_as::<_, RawExternalStorage>(
                    r#"
SELECT storage_type, storage_path, file_name, checksum, notes, metadata
FROM external_storage
WHERE secret_id = ?1
        "#,
                )
                .bind(secret.id)
                .fetch_optional(&self.pool)
                .await?
                else {
                    return Ok(None);
                };

                if raw.storage_type != FILE_STORAGE_TYPE {
                    return Err(SecretsError::InvalidStorage(format!(
                        "secret ({}) uses unsupported storage type `{}`.",
                        secret.id, raw.storage_type
                    ))
                    .into());
                }

                let content = file_storage
                    .read(&raw.storage_path, &raw.checksum)
                    .await
                    .with_context(|| format!("Failed to load binary content ({}).", secret.id))?;
                Some(SecretData::Binary(raw.into_binary_data(content)))
            }
        };

        Ok(data)
    }
}

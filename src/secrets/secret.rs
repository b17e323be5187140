use crate::{
    secrets::{BinaryData, CardData, PasswordData, SecretData, SecretType, SecretsError},
    security::EnvelopeCipher,
    users::UserId,
};
use serde::Serialize;
use std::str::FromStr;
use time::OffsetDateTime;

/// ID of the secret that hasn't been stored yet.
pub const UNSAVED_SECRET_ID: i64 = -1;

/// Represents a user secret with its typed payload.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Storage-assigned ID, `UNSAVED_SECRET_ID` until the secret is stored.
    pub id: i64,
    #[serde(skip)]
    pub owner_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    secret_type: SecretType,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
    #[serde(skip)]
    pub deleted_at: Option<OffsetDateTime>,
    #[serde(skip)]
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<SecretData>,
}

impl Secret {
    /// Creates a secret without data, the type is validated against the supported ones.
    pub fn new(owner_id: UserId, name: &str, secret_type: &str) -> Result<Self, SecretsError> {
        Self::with_type(owner_id, name, SecretType::from_str(secret_type)?)
    }

    /// Creates a secret of the specified type without data.
    pub fn with_type(
        owner_id: UserId,
        name: &str,
        secret_type: SecretType,
    ) -> Result<Self, SecretsError> {
        if name.trim().is_empty() {
            return Err(SecretsError::EmptyField("name"));
        }

        let now = OffsetDateTime::now_utc()
            .replace_nanosecond(0)
            .unwrap_or_else(|_| OffsetDateTime::now_utc());
        Ok(Self {
            id: UNSAVED_SECRET_ID,
            owner_id,
            name: name.to_string(),
            secret_type,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            version: 1,
            data: None,
        })
    }

    /// Creates a password secret with encrypted data.
    pub fn new_password_secret(
        owner_id: UserId,
        name: &str,
        data: PasswordData,
        cipher: &EnvelopeCipher,
    ) -> anyhow::Result<Self> {
        Self::with_encrypted_data(owner_id, name, data.into(), cipher)
    }

    /// Creates a card secret with encrypted data.
    pub fn new_card_secret(
        owner_id: UserId,
        name: &str,
        data: CardData,
        cipher: &EnvelopeCipher,
    ) -> anyhow::Result<Self> {
        Self::with_encrypted_data(owner_id, name, data.into(), cipher)
    }

    /// Creates a binary secret with encrypted data.
    pub fn new_file_secret(
        owner_id: UserId,
        name: &str,
        data: BinaryData,
        cipher: &EnvelopeCipher,
    ) -> anyhow::Result<Self> {
        Self::with_encrypted_data(owner_id, name, data.into(), cipher)
    }

    fn with_encrypted_data(
        owner_id: UserId,
        name: &str,
        mut data: SecretData,
        cipher: &EnvelopeCipher,
    ) -> anyhow::Result<Self> {
        let mut secret = Self::with_type(owner_id, name, data.secret_type())?;
        data.encrypt(cipher)?;
        secret.data = Some(data);
        Ok(secret)
    }

    pub fn secret_type(&self) -> SecretType {
        self.secret_type
    }

    pub fn data(&self) -> Option<&SecretData> {
        self.data.as_ref()
    }

    pub fn is_saved(&self) -> bool {
        self.id != UNSAVED_SECRET_ID
    }

    /// Attaches data to the secret, data variant must match the secret type.
    pub fn set_data(&mut self, data: SecretData) -> Result<(), SecretsError> {
        if data.secret_type() != self.secret_type {
            return Err(SecretsError::TypeMismatch(self.secret_type));
        }

        self.data = Some(data);
        Ok(())
    }

    /// Records the external storage location of the binary content.
    pub(crate) fn set_storage_path(&mut self, path: String) {
        if let Some(SecretData::Binary(data)) = self.data.as_mut() {
            data.path = Some(path);
        }
    }

    /// Decrypts the attached data. Must be called before sensitive fields are read.
    pub fn decrypt_data(&mut self, cipher: &EnvelopeCipher) -> anyhow::Result<()> {
        let id = self.id;
        self.data
            .as_mut()
            .ok_or(SecretsError::MissingData(id))?
            .decrypt(cipher)?;
        Ok(())
    }
}

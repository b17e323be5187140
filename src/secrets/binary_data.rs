use crate::{
    secrets::{BaseSecretData, SecretsError},
    security::{EncryptionError, EnvelopeCipher},
};
use serde::Serialize;
use serde_with::{base64::Base64, serde_as};

/// Arbitrary binary content, the content itself is stored outside of the database.
#[serde_as]
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    /// Location of the content in the external storage, assigned once the secret is stored.
    #[serde(skip)]
    pub path: Option<String>,
    /// Original name of the file.
    pub name: String,
    #[serde_as(as = "Base64")]
    pub content: Vec<u8>,
    #[serde(flatten)]
    pub base: BaseSecretData,
}

impl BinaryData {
    pub fn new(
        name: impl Into<String>,
        content: Vec<u8>,
        notes: impl Into<String>,
        meta_data: Vec<u8>,
    ) -> Result<Self, SecretsError> {
        Ok(Self {
            path: None,
            name: name.into(),
            content,
            base: BaseSecretData::new(notes, meta_data)?,
        })
    }

    /// Reads the content from the file, file name is used as the data name.
    #[cfg(test)]
    pub async fn from_file(
        path: &std::path::Path,
        notes: impl Into<String>,
        meta_data: Vec<u8>,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read secret content from {}.", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(name, content, notes, meta_data)?)
    }

    pub(super) fn encrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        if self.base.encrypted {
            return Ok(());
        }

        let content = cipher.encrypt(&self.content)?.into_bytes();
        let notes = self.base.encrypt_notes(cipher)?;

        self.content = content;
        self.base.notes = notes;
        self.base.encrypted = true;

        Ok(())
    }

    pub(super) fn decrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        if !self.base.encrypted {
            return Ok(());
        }

        let content = cipher.decrypt(&self.content)?;
        let notes = self.base.decrypt_notes(cipher)?;

        self.content = content;
        self.base.notes = notes;
        self.base.encrypted = false;

        Ok(())
    }
}

use crate::{
    secrets::{BaseSecretData, SecretsError},
    security::{EncryptionError, EnvelopeCipher},
};
use serde::Serialize;

/// Credentials for a website or a service, only `password` and `notes` are encrypted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordData {
    pub username: String,
    pub password: String,
    pub url: String,
    #[serde(flatten)]
    pub base: BaseSecretData,
}

impl PasswordData {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
        meta_data: Vec<u8>,
    ) -> Result<Self, SecretsError> {
        Ok(Self {
            username: username.into(),
            password: password.into(),
            url: url.into(),
            base: BaseSecretData::new(notes, meta_data)?,
        })
    }

    pub(super) fn encrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        if self.base.encrypted {
            return Ok(());
        }

        let password = cipher.encrypt(self.password.as_bytes())?;
        let notes = self.base.encrypt_notes(cipher)?;

        self.password = password;
        self.base.notes = notes;
        self.base.encrypted = true;

        Ok(())
    }

    pub(super) fn decrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        if !self.base.encrypted {
            return Ok(());
        }

        let password = cipher.decrypt_to_string(&self.password)?;
        let notes = self.base.decrypt_notes(cipher)?;

        self.password = password;
        self.base.notes = notes;
        self.base.encrypted = false;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        secrets::PasswordData,
        security::{EncryptionError, EnvelopeCipher},
        tests::mock_cipher,
    };
    use insta::assert_json_snapshot;

    fn mock_data() -> anyhow::Result<PasswordData> {
        Ok(PasswordData::new(
            "a",
            "p@ss",
            "https://x",
            "work",
            vec![],
        )?)
    }

    #[test]
    fn serialization() -> anyhow::Result<()> {
        assert_json_snapshot!(mock_data()?, @r###"
        {
          "username": "a",
          "password": "p@ss",
          "url": "https://x",
          "notes": "work",
          "metaData": {}
        }
        "###);

        Ok(())
    }

    #[test]
    fn encrypts_sensitive_fields_only() -> anyhow::Result<()> {
        let cipher = mock_cipher()?;
        let plain = mock_data()?;

        let mut data = plain.clone();
        data.encrypt(&cipher)?;

        assert!(data.base.encrypted);
        assert_eq!(data.username, plain.username);
        assert_eq!(data.url, plain.url);
        assert_eq!(data.base.meta_data, plain.base.meta_data);
        assert_ne!(data.password, plain.password);
        assert_ne!(data.base.notes, plain.base.notes);
        assert_ne!(data.password, data.base.notes);

        // Already encrypted data isn't encrypted twice.
        let encrypted = data.clone();
        data.encrypt(&cipher)?;
        assert_eq!(data, encrypted);

        data.decrypt(&cipher)?;
        assert_eq!(data, plain);

        // Plaintext data isn't decrypted.
        data.decrypt(&cipher)?;
        assert_eq!(data, plain);

        Ok(())
    }

    #[test]
    fn keeps_state_if_decryption_fails() -> anyhow::Result<()> {
        let mut data = mock_data()?;
        data.encrypt(&mock_cipher()?)?;

        let encrypted = data.clone();
        let other_cipher = EnvelopeCipher::new(&[7; 32])?;
        assert_eq!(
            data.decrypt(&other_cipher),
            Err(EncryptionError::DecryptionFailed)
        );
        assert_eq!(data, encrypted);

        Ok(())
    }
}

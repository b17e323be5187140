use crate::{
    secrets::{BaseSecretData, BinaryData, CardData, PasswordData, SecretType},
    security::{EncryptionError, EnvelopeCipher},
};
use serde::Serialize;

/// Typed secret payload, the variant always matches the type of the secret that owns it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SecretData {
    Password(PasswordData),
    Card(CardData),
    Binary(BinaryData),
}

impl SecretData {
    /// Type of the secret this payload belongs to.
    pub fn secret_type(&self) -> SecretType {
        match self {
            Self::Password(_) => SecretType::Password,
            Self::Card(_) => SecretType::Card,
            Self::Binary(_) => SecretType::Binary,
        }
    }

    pub fn base(&self) -> &BaseSecretData {
        match self {
            Self::Password(data) => &data.base,
            Self::Card(data) => &data.base,
            Self::Binary(data) => &data.base,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.base().encrypted
    }

    /// Encrypts every sensitive field and notes. Either all fields are encrypted or none.
    pub fn encrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        match self {
            Self::Password(data) => data.encrypt(cipher),
            Self::Card(data) => data.encrypt(cipher),
            Self::Binary(data) => data.encrypt(cipher),
        }
    }

    /// Decrypts every sensitive field and notes. Either all fields are decrypted or none.
    pub fn decrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        match self {
            Self::Password(data) => data.decrypt(cipher),
            Self::Card(data) => data.decrypt(cipher),
            Self::Binary(data) => data.decrypt(cipher),
        }
    }
}

impl From<PasswordData> for SecretData {
    fn from(data: PasswordData) -> Self {
        Self::Password(data)
    }
}

impl From<CardData> for SecretData {
    fn from(data: CardData) -> Self {
        Self::Card(data)
    }
}

impl From<BinaryData> for SecretData {
    fn from(data: BinaryData) -> Self {
        Self::Binary(data)
    }
}

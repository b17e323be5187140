use crate::{
    secrets::{BaseSecretData, SecretsError},
    security::{EncryptionError, EnvelopeCipher},
};
use serde::Serialize;

/// Payment card details, every field except metadata is encrypted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number: String,
    pub owner: String,
    pub expire_date: String,
    pub cvv: String,
    #[serde(flatten)]
    pub base: BaseSecretData,
}

impl CardData {
    pub fn new(
        number: impl Into<String>,
        owner: impl Into<String>,
        expire_date: impl Into<String>,
        cvv: impl Into<String>,
        notes: impl Into<String>,
        meta_data: Vec<u8>,
    ) -> Result<Self, SecretsError> {
        Ok(Self {
            number: number.into(),
            owner: owner.into(),
            expire_date: expire_date.into(),
            cvv: cvv.into(),
            base: BaseSecretData::new(notes, meta_data)?,
        })
    }

    pub(super) fn encrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        if self.base.encrypted {
            return Ok(());
        }

        let number = cipher.encrypt(self.number.as_bytes())?;
        let owner = cipher.encrypt(self.owner.as_bytes())?;
        let expire_date = cipher.encrypt(self.expire_date.as_bytes())?;
        let cvv = cipher.encrypt(self.cvv.as_bytes())?;
        let notes = self.base.encrypt_notes(cipher)?;

        self.number = number;
        self.owner = owner;
        self.expire_date = expire_date;
        self.cvv = cvv;
        self.base.notes = notes;
        self.base.encrypted = true;

        Ok(())
    }

    pub(super) fn decrypt(&mut self, cipher: &EnvelopeCipher) -> Result<(), EncryptionError> {
        if !self.base.encrypted {
            return Ok(());
        }

        let number = cipher.decrypt_to_string(&self.number)?;
        let owner = cipher.decrypt_to_string(&self.owner)?;
        let expire_date = cipher.decrypt_to_string(&self.expire_date)?;
        let cvv = cipher.decrypt_to_string(&self.cvv)?;
        let notes = self.base.decrypt_notes(cipher)?;

        self.number = number;
        self.owner = owner;
        self.expire_date = expire_date;
        self.cvv = cvv;
        self.base.notes = notes;
        self.base.encrypted = false;

        Ok(())
    }
}

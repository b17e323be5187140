use crate::{
    secrets::SecretsError,
    security::{EncryptionError, EnvelopeCipher},
};
use serde::{Serialize, Serializer};

const EMPTY_META_DATA: &[u8] = b"{}";

/// Data shared by all secret payloads. Every payload owns its own copy.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BaseSecretData {
    /// Free-form notes, stored encrypted.
    pub notes: String,
    /// Arbitrary JSON metadata, stored as plaintext.
    #[serde(serialize_with = "serialize_meta_data")]
    pub meta_data: Vec<u8>,
    /// Indicates whether the sensitive fields hold wrapped ciphertext.
    #[serde(skip)]
    pub encrypted: bool,
}

impl BaseSecretData {
    /// Creates plaintext base data, empty metadata is replaced with an empty JSON object.
    pub fn new(notes: impl Into<String>, meta_data: Vec<u8>) -> Result<Self, SecretsError> {
        Ok(Self {
            notes: notes.into(),
            meta_data: normalize_meta_data(meta_data)?,
            encrypted: false,
        })
    }

    /// Base data as loaded from the storage.
    pub(crate) fn encrypted(notes: String, meta_data: Vec<u8>) -> Self {
        Self {
            notes,
            meta_data,
            encrypted: true,
        }
    }

    pub(super) fn encrypt_notes(&self, cipher: &EnvelopeCipher) -> Result<String, EncryptionError> {
        cipher.encrypt(self.notes.as_bytes())
    }

    pub(super) fn decrypt_notes(&self, cipher: &EnvelopeCipher) -> Result<String, EncryptionError> {
        cipher.decrypt_to_string(&self.notes)
    }
}

/// Replaces empty metadata with an empty JSON object and rejects malformed JSON.
pub fn normalize_meta_data(meta_data: Vec<u8>) -> Result<Vec<u8>, SecretsError> {
    if meta_data.is_empty() {
        return Ok(EMPTY_META_DATA.to_vec());
    }

    serde_json::from_slice::<serde_json::Value>(&meta_data)
        .map_err(|_| SecretsError::InvalidMetaData)?;
    Ok(meta_data)
}

fn serialize_meta_data<S: Serializer>(meta_data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serde_json::from_slice::<serde_json::Value>(meta_data)
        .map_err(serde::ser::Error::custom)?
        .serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::{BaseSecretData, normalize_meta_data};
    use crate::secrets::SecretsError;
    use insta::assert_json_snapshot;

    #[test]
    fn normalizes_meta_data() -> anyhow::Result<()> {
        assert_eq!(normalize_meta_data(vec![])?, b"{}");
        assert_eq!(
            normalize_meta_data(br#"{"tags":["work"]}"#.to_vec())?,
            br#"{"tags":["work"]}"#
        );
        assert_eq!(
            normalize_meta_data(b"{not-json".to_vec()),
            Err(SecretsError::InvalidMetaData)
        );
        assert_eq!(
            normalize_meta_data(b"   ".to_vec()),
            Err(SecretsError::InvalidMetaData)
        );

        Ok(())
    }

    #[test]
    fn serialization() -> anyhow::Result<()> {
        let data = BaseSecretData::new("work", br#"{"tags":["work"]}"#.to_vec())?;
        assert!(!data.encrypted);
        assert_json_snapshot!(data, @r###"
        {
          "notes": "work",
          "metaData": {
            "tags": [
              "work"
            ]
          }
        }
        "###);

        Ok(())
    }
}

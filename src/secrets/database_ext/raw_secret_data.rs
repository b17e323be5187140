use crate::secrets::{BaseSecretData, BinaryData, CardData, PasswordData};

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawPasswordData {
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
    pub metadata: Vec<u8>,
}

impl From<RawPasswordData> for PasswordData {
    fn from(raw: RawPasswordData) -> Self {
        PasswordData {
            username: raw.username,
            password: raw.password,
            url: raw.url,
            base: BaseSecretData::encrypted(raw.notes, raw.metadata),
        }
    }
}

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawCardData {
    pub number: String,
    pub owner: String,
    pub expire_date: String,
    pub cvv: String,
    pub notes: String,
    pub metadata: Vec<u8>,
}

impl From<RawCardData> for CardData {
    fn from(raw: RawCardData) -> Self {
        CardData {
            number: raw.number,
            owner: raw.owner,
            expire_date: raw.expire_date,
            cvv: raw.cvv,
            base: BaseSecretData::encrypted(raw.notes, raw.metadata),
        }
    }
}

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawExternalStorage {
    pub storage_type: String,
    pub storage_path: String,
    pub file_name: String,
    pub checksum: String,
    pub notes: String,
    pub metadata: Vec<u8>,
}

impl RawExternalStorage {
    /// Converts the row into binary data with the content loaded from the storage.
    pub fn into_binary_data(self, content: Vec<u8>) -> BinaryData {
        BinaryData {
            path: Some(self.storage_path),
            name: self.file_name,
            content,
            base: BaseSecretData::encrypted(self.notes, self.metadata),
        }
    }
}

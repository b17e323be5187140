mod api_ext;
mod base_secret_data;
mod binary_data;
mod card_data;
mod database_ext;
mod file_storage;
mod password_data;
mod secret;
mod secret_data;
mod secret_type;
mod secrets_error;

pub use self::{
    api_ext::SecretCreateParams,
    base_secret_data::{BaseSecretData, normalize_meta_data},
    binary_data::BinaryData,
    card_data::CardData,
    file_storage::{FILE_STORAGE_TYPE, FileStorage},
    password_data::PasswordData,
    secret::Secret,
    secret_data::SecretData,
    secret_type::SecretType,
    secrets_error::SecretsError,
};

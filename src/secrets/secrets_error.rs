use crate::secrets::SecretType;

/// Errors of the secret domain model and its persistence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretsError {
    #[error("Unknown secret type `{0}`.")]
    InvalidSecretType(String),
    #[error("Secret `{0}` cannot be empty.")]
    EmptyField(&'static str),
    #[error("Secret metadata must be a valid JSON.")]
    InvalidMetaData,
    #[error("Secret data doesn't match `{0}` secret type.")]
    TypeMismatch(SecretType),
    #[error("Secret not found.")]
    NotFound,
    #[error("Secret ({0}) doesn't have data attached.")]
    MissingData(i64),
    #[error("Stored secret content is corrupted.")]
    ChecksumMismatch,
    #[error("Secret data must be encrypted before it's stored.")]
    NotEncrypted,
    #[error("Secret ({0}) is already stored.")]
    AlreadyStored(i64),
    #[error("Secret content storage is unusable: {0}")]
    InvalidStorage(String),
}

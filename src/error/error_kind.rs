use crate::{
    secrets::SecretsError,
    security::{AuthError, EncryptionError, TokenError},
    users::UserSignupError,
};

/// Describes a Keeper specific error types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Error caused by the invalid input on the client side.
    ValidationError,
    /// Error caused by missing, invalid or expired credentials.
    AuthError,
    /// Requested entity doesn't exist.
    NotFoundError,
    /// Error caused by a failed cryptographic operation.
    CryptoError,
    /// Error caused by a failed storage operation or corrupted data.
    PersistenceError,
    /// Unknown error.
    Unknown,
}

impl ErrorKind {
    /// Classifies the error using the first typed error found in the error chain.
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<SecretsError>() {
                return match err {
                    SecretsError::NotFound => Self::NotFoundError,
                    SecretsError::MissingData(_)
                    | SecretsError::ChecksumMismatch
                    | SecretsError::NotEncrypted
                    | SecretsError::AlreadyStored(_)
                    | SecretsError::InvalidStorage(_) => Self::PersistenceError,
                    SecretsError::InvalidSecretType(_)
                    | SecretsError::EmptyField(_)
                    | SecretsError::InvalidMetaData
                    | SecretsError::TypeMismatch(_) => Self::ValidationError,
                };
            }

            if cause.is::<UserSignupError>() {
                return Self::ValidationError;
            }

            if cause.is::<AuthError>() || cause.is::<TokenError>() {
                return Self::AuthError;
            }

            if cause.is::<EncryptionError>() {
                return Self::CryptoError;
            }

            if cause.is::<sqlx::Error>()
                || cause.is::<sqlx::migrate::MigrateError>()
                || cause.is::<std::io::Error>()
            {
                return Self::PersistenceError;
            }
        }

        Self::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use crate::{
        secrets::{FileStorage, SecretType, SecretsError},
        security::{AuthError, EncryptionError, TokenError},
        users::{UserId, UserSignupError},
    };
    use anyhow::anyhow;

    #[test]
    fn classifies_typed_errors() {
        let cases = [
            (
                anyhow!(SecretsError::InvalidSecretType("otp".to_string())),
                ErrorKind::ValidationError,
            ),
            (
                anyhow!(SecretsError::TypeMismatch(SecretType::Card)),
                ErrorKind::ValidationError,
            ),
            (
                anyhow!(UserSignupError::LoginAlreadyRegistered),
                ErrorKind::ValidationError,
            ),
            (anyhow!(SecretsError::NotFound), ErrorKind::NotFoundError),
            (anyhow!(SecretsError::MissingData(1)), ErrorKind::PersistenceError),
            (anyhow!(SecretsError::ChecksumMismatch), ErrorKind::PersistenceError),
            (anyhow!(AuthError::InvalidCredentials), ErrorKind::AuthError),
            (anyhow!(TokenError::BadSignature), ErrorKind::AuthError),
            (anyhow!(EncryptionError::DecryptionFailed), ErrorKind::CryptoError),
            (anyhow!(SecretsError::AlreadyStored(1)), ErrorKind::PersistenceError),
            (
                anyhow!(SecretsError::InvalidStorage("root".to_string())),
                ErrorKind::PersistenceError,
            ),
            (anyhow!(sqlx::Error::PoolClosed), ErrorKind::PersistenceError),
            (
                anyhow!(std::io::Error::from(std::io::ErrorKind::NotFound)),
                ErrorKind::PersistenceError,
            ),
            (anyhow!("Something else"), ErrorKind::Unknown),
        ];

        for (err, kind) in cases {
            assert_eq!(ErrorKind::classify(&err), kind, "{err:?}");
        }
    }

    #[tokio::test]
    async fn classifies_storage_failures() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let err = FileStorage::new(root.path().join("missing"))
            .write(UserId::try_from(1)?, b"content")
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::classify(&err), ErrorKind::PersistenceError);

        Ok(())
    }

    #[test]
    fn classifies_errors_with_context() {
        let err = anyhow!(TokenError::Expired)
            .context("Failed to authenticate")
            .context("Request failed");
        assert_eq!(ErrorKind::classify(&err), ErrorKind::AuthError);

        let err = anyhow!(SecretsError::NotFound).context("Failed to retrieve secrets");
        assert_eq!(ErrorKind::classify(&err), ErrorKind::NotFoundError);
    }
}

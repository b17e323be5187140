mod error_kind;

use crate::{secrets::SecretsError, users::UserSignupError};
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use anyhow::anyhow;
use serde_json::json;
use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// Keeper native error type.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates a validation error instance with the given message.
    pub fn validation<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::ValidationError,
        }
    }

    /// Returns the kind of the error.
    #[cfg(test)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message of the typed error closest to the root cause, if it can be shown to the client.
    fn client_message(&self) -> String {
        self.root_cause
            .chain()
            .find_map(|cause| {
                cause
                    .downcast_ref::<SecretsError>()
                    .map(|err| err.to_string())
                    .or_else(|| {
                        cause
                            .downcast_ref::<UserSignupError>()
                            .map(|err| err.to_string())
                    })
            })
            .unwrap_or_else(|| self.root_cause.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::AuthError => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFoundError => StatusCode::NOT_FOUND,
            ErrorKind::CryptoError | ErrorKind::PersistenceError | ErrorKind::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).json(json!({
            "message": match self.kind {
                ErrorKind::ValidationError | ErrorKind::NotFoundError => self.client_message(),
                ErrorKind::AuthError => "Unauthorized".to_string(),
                ErrorKind::CryptoError | ErrorKind::PersistenceError | ErrorKind::Unknown => {
                    "Internal Server Error".to_string()
                }
            }
        }))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            kind: ErrorKind::classify(&root_cause),
            root_cause,
        })
    }
}

/// Authentication failures. All of them are reported to clients as a generic "unauthorized"
/// response without revealing the exact reason.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid login or password.")]
    InvalidCredentials,
    #[error("Access token is missing.")]
    MissingToken,
    #[error("User doesn't exist.")]
    UnknownUser,
}

/// Represents possible errors that can happen during signup.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserSignupError {
    #[error("Login cannot be empty.")]
    EmptyLogin,
    #[error("Password cannot be empty.")]
    EmptyPassword,
    #[error("The login is already registered.")]
    LoginAlreadyRegistered,
}

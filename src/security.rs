mod api_ext;
mod auth_error;
mod credentials;
mod encryption;
mod jwt;

pub use self::{
    auth_error::AuthError,
    credentials::PasswordHasherWithPepper,
    encryption::{EncryptionError, EnvelopeCipher},
    jwt::{AccessTokens, TokenError},
};

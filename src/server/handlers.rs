mod secrets_create;
mod secrets_get;
mod security_login;
mod security_signup;

pub use self::{
    secrets_create::secrets_create, secrets_get::secrets_get, security_login::security_login,
    security_signup::security_signup,
};

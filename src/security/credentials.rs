use anyhow::anyhow;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};

const SALT_LENGTH: usize = 16;

/// Argon2id hash with the default cost parameters that no password matches. Verified instead of
/// a real hash when the login is unknown.
const UNKNOWN_USER_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$YN017/qlpCKY2xdgezLKmA$BkPtjN5jV8/evUuYA1JZiVQv1nTDP6mfNWg0CPXfVKM";

/// Hashes user passwords with Argon2id keyed with a server-side pepper. Hashing runs on the
/// blocking thread pool.
#[derive(Clone)]
pub struct PasswordHasherWithPepper {
    pepper: Vec<u8>,
}

impl PasswordHasherWithPepper {
    pub fn new(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Generates a PHC formatted hash for the provided password.
    pub async fn hash(&self, password: &str) -> anyhow::Result<String> {
        let hasher = self.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password)).await?
    }

    /// Checks whether the password matches the previously generated hash. If there is no hash,
    /// the password is checked against a placeholder hash of the same cost and never matches.
    pub async fn verify(&self, password: &str, hash: Option<&str>) -> anyhow::Result<bool> {
        let hasher = self.clone();
        let password = password.to_string();
        let hash = hash.map(str::to_string);
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => hasher.verify_blocking(&password, &hash),
            None => hasher
                .verify_blocking(&password, UNKNOWN_USER_PASSWORD_HASH)
                .map(|_| false),
        })
        .await?
    }

    fn hash_blocking(&self, password: &str) -> anyhow::Result<String> {
        let mut salt = [0u8; SALT_LENGTH];
        openssl::rand::rand_bytes(&mut salt)?;
        let salt = SaltString::encode_b64(&salt)
            .map_err(|err| anyhow!("Failed to generate a password salt: {err}"))?;

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| anyhow!("Failed to generate a password hash: {err}"))
    }

    fn verify_blocking(&self, password: &str, hash: &str) -> anyhow::Result<bool> {
        let hash = PasswordHash::new(hash)
            .map_err(|err| anyhow!("Failed to parse a password hash: {err}"))?;
        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    }

    fn argon2(&self) -> anyhow::Result<Argon2<'_>> {
        Argon2::new_with_secret(
            &self.pepper,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|err| anyhow!("Failed to initialize password hasher: {err}"))
    }
}

impl std::fmt::Debug for PasswordHasherWithPepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasherWithPepper")
            .field("pepper", &"[REDACTED]")
            .finish()
    }
}

use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use openssl::symm::{Cipher, Crypter, Mode};
use std::fmt::{Debug, Formatter};

/// Length of the master key and of every generated data key, in bytes.
pub const KEY_LENGTH: usize = 32;
/// AES-256-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;
/// AES-256-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;
/// Separates the wrapped data key from the encrypted payload.
const WRAPPED_VALUE_SEPARATOR: char = ':';

/// Errors produced by the envelope cipher. Messages are intentionally generic and never
/// describe which part of the wrapped value failed verification.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("Invalid key length.")]
    InvalidKeyLength,
    #[error("Encryption failed.")]
    EncryptionFailed,
    #[error("Decryption failed.")]
    DecryptionFailed,
}

/// Envelope encryption of arbitrary payloads: every call generates a fresh data key, seals the
/// payload with it using AES-256-GCM and then seals (wraps) the data key itself under the master
/// key. The result is `base64(nonce || wrapped key || tag):base64(nonce || payload || tag)`.
#[derive(Clone)]
pub struct EnvelopeCipher {
    master_key: [u8; KEY_LENGTH],
}

impl EnvelopeCipher {
    /// Creates a cipher bound to the specified 32-byte master key.
    pub fn new(master_key: &[u8]) -> Result<Self, EncryptionError> {
        Ok(Self {
            master_key: master_key
                .try_into()
                .map_err(|_| EncryptionError::InvalidKeyLength)?,
        })
    }

    /// Creates a cipher from a hex-encoded 32-byte master key.
    pub fn from_hex(hex_key: &str) -> anyhow::Result<Self> {
        let key = hex::decode(hex_key).with_context(|| "Master key is not valid hex.")?;
        Self::new(&key).with_context(|| {
            format!(
                "Master key must be {KEY_LENGTH} bytes (256 bits), got {} bytes.",
                key.len()
            )
        })
    }

    /// Encrypts plaintext under a freshly generated data key and returns the wrapped value.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, EncryptionError> {
        let mut data_key = [0u8; KEY_LENGTH];
        random_bytes(&mut data_key)?;

        let encrypted_payload = seal(&data_key, plaintext)?;
        let encrypted_data_key = seal(&self.master_key, &data_key)?;

        Ok(format!(
            "{encrypted_data_key}{WRAPPED_VALUE_SEPARATOR}{encrypted_payload}"
        ))
    }

    /// Decrypts a value previously produced by [`EnvelopeCipher::encrypt`].
    pub fn decrypt(&self, wrapped: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        let wrapped =
            std::str::from_utf8(wrapped).map_err(|_| EncryptionError::DecryptionFailed)?;

        let parts = wrapped.split(WRAPPED_VALUE_SEPARATOR).collect::<Vec<_>>();
        let [encrypted_data_key, encrypted_payload] = parts.as_slice() else {
            return Err(EncryptionError::DecryptionFailed);
        };

        let data_key = open(&self.master_key, encrypted_data_key)?;
        if data_key.len() != KEY_LENGTH {
            return Err(EncryptionError::InvalidKeyLength);
        }

        open(&data_key, encrypted_payload)
    }

    /// Same as [`EnvelopeCipher::decrypt`], but expects the plaintext to be a UTF-8 string.
    pub fn decrypt_to_string(&self, wrapped: &str) -> Result<String, EncryptionError> {
        String::from_utf8(self.decrypt(wrapped.as_bytes())?)
            .map_err(|_| EncryptionError::DecryptionFailed)
    }
}

impl Debug for EnvelopeCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCipher")
            .field("master_key", &"[REDACTED]")
            .finish()
    }
}

/// Encrypts plaintext using AES-256-GCM with a random nonce.
/// Returns base64 encoded `nonce || ciphertext || tag`.
fn seal(key: &[u8], plaintext: &[u8]) -> Result<String, EncryptionError> {
    let cipher = Cipher::aes_256_gcm();
    let mut nonce = [0u8; NONCE_SIZE];
    random_bytes(&mut nonce)?;

    let mut crypter = Crypter::new(cipher, Mode::Encrypt, key, Some(&nonce))
        .map_err(|_| EncryptionError::EncryptionFailed)?;
    let mut ciphertext = vec![0u8; plaintext.len() + cipher.block_size()];
    let mut count = crypter
        .update(plaintext, &mut ciphertext)
        .map_err(|_| EncryptionError::EncryptionFailed)?;
    count += crypter
        .finalize(&mut ciphertext[count..])
        .map_err(|_| EncryptionError::EncryptionFailed)?;
    ciphertext.truncate(count);

    let mut tag = [0u8; TAG_SIZE];
    crypter
        .get_tag(&mut tag)
        .map_err(|_| EncryptionError::EncryptionFailed)?;

    let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    output.extend_from_slice(&tag);

    Ok(BASE64.encode(output))
}

/// Decrypts data previously produced by [`seal`].
fn open(key: &[u8], encoded: &str) -> Result<Vec<u8>, EncryptionError> {
    let data = BASE64
        .decode(encoded)
        .map_err(|_| EncryptionError::DecryptionFailed)?;
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(EncryptionError::DecryptionFailed);
    }

    let cipher = Cipher::aes_256_gcm();
    let nonce = &data[..NONCE_SIZE];
    let tag = &data[data.len() - TAG_SIZE..];
    let ciphertext = &data[NONCE_SIZE..data.len() - TAG_SIZE];

    let decrypt = || -> Result<Vec<u8>, openssl::error::ErrorStack> {
        let mut crypter = Crypter::new(cipher, Mode::Decrypt, key, Some(nonce))?;
        crypter.set_tag(tag)?;

        let mut plaintext = vec![0u8; ciphertext.len() + cipher.block_size()];
        let mut count = crypter.update(ciphertext, &mut plaintext)?;
        count += crypter.finalize(&mut plaintext[count..])?;
        plaintext.truncate(count);

        Ok(plaintext)
    };

    decrypt().map_err(|_| EncryptionError::DecryptionFailed)
}

fn random_bytes(buf: &mut [u8]) -> Result<(), EncryptionError> {
    openssl::rand::rand_bytes(buf).map_err(|_| EncryptionError::EncryptionFailed)
}

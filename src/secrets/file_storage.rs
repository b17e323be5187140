use crate::{secrets::SecretsError, users::UserId};
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Type of the storage recorded for the binary secrets stored on the local file system.
pub const FILE_STORAGE_TYPE: &str = "file";

/// Location and checksum of the stored content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the storage root.
    pub path: String,
    /// Hex-encoded SHA-256 digest of the stored bytes.
    pub checksum: String,
}

/// Stores the (already encrypted) content of binary secrets on the local file system.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes content to a new file in the owner's folder, the folder is only accessible by the
    /// owner of the process. The storage root must exist.
    pub async fn write(&self, owner_id: UserId, content: &[u8]) -> anyhow::Result<StoredFile> {
        let root_metadata = tokio::fs::metadata(&self.root).await.with_context(|| {
            format!("Storage root ({}) isn't accessible.", self.root.display())
        })?;
        if !root_metadata.is_dir() {
            return Err(SecretsError::InvalidStorage(format!(
                "root ({}) isn't a directory.",
                self.root.display()
            ))
            .into());
        }

        let owner_folder = format!("user_{owner_id}");
        let mut dir_builder = tokio::fs::DirBuilder::new();
        dir_builder.recursive(true);
        #[cfg(unix)]
        dir_builder.mode(0o700);
        dir_builder
            .create(self.root.join(&owner_folder))
            .await
            .with_context(|| format!("Failed to create storage folder for user ({owner_id})."))?;

        let path = format!("{owner_folder}/{}", Uuid::now_v7());
        tokio::fs::write(self.root.join(&path), content)
            .await
            .with_context(|| format!("Failed to write content to {path}."))?;

        Ok(StoredFile {
            path,
            checksum: checksum(content),
        })
    }

    /// Reads content of the file and verifies its checksum.
    pub async fn read(&self, path: &str, expected_checksum: &str) -> anyhow::Result<Vec<u8>> {
        let content = tokio::fs::read(self.resolve(path)?)
            .await
            .with_context(|| format!("Failed to read content from {path}."))?;
        if checksum(&content) != expected_checksum {
            return Err(SecretsError::ChecksumMismatch.into());
        }

        Ok(content)
    }

    /// Removes the file, failures are only logged.
    pub async fn remove(&self, path: &str) {
        let result: anyhow::Result<()> = match self.resolve(path) {
            Ok(full_path) => tokio::fs::remove_file(full_path).await.map_err(Into::into),
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            warn!("Failed to remove stored content ({path}): {err:?}");
        }
    }

    fn resolve(&self, path: &str) -> anyhow::Result<PathBuf> {
        let relative_path = Path::new(path);
        if path.is_empty()
            || !relative_path
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(SecretsError::InvalidStorage(format!(
                "path ({path}) is outside of the storage root."
            ))
            .into());
        }

        Ok(self.root.join(relative_path))
    }
}

fn checksum(content: &[u8]) -> String {
    hex::encode(openssl::sha::sha256(content))
}

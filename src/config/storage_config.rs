use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the external storage of the binary secrets.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Root folder for the encrypted content of the binary secrets. Must exist.
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./data/storage"),
        }
    }
}

mod database_config;
mod raw_config;
mod security_config;
mod storage_config;

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, security_config::SecurityConfig,
    storage_config::StorageConfig,
};

/// Main server config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Version of the Keeper binary.
    pub version: String,
    /// HTTP port to bind API server to.
    pub http_port: u16,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration.
    pub security: SecurityConfig,
    /// Configuration of the external storage for binary secrets.
    pub storage: StorageConfig,
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            http_port: raw_config.port,
            db: raw_config.db,
            security: raw_config.security,
            storage: raw_config.storage,
        }
    }
}

use crate::config::{DatabaseConfig, SecurityConfig, StorageConfig};
use figment::{Figment, Metadata, Profile, Provider, providers, providers::Format, value};
use serde_derive::{Deserialize, Serialize};

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawConfig {
    /// Defines a TCP port to listen on.
    pub port: u16,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (master key, access tokens, passwords).
    pub security: SecurityConfig,
    /// Configuration of the external storage for binary secrets.
    pub storage: StorageConfig,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values and
    /// environment variables.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Figment::from(RawConfig::default())
            .merge(providers::Toml::file(path))
            .merge(providers::Env::prefixed("KEEPER_").split("__"))
            .extract()?)
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            port: 7070,
            db: DatabaseConfig::default(),
            security: SecurityConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Provider for RawConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Keeper main configuration")
    }

    fn data(&self) -> Result<value::Map<Profile, value::Dict>, figment::Error> {
        providers::Serialized::defaults(Self::default()).data()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RawConfig;
    use insta::{assert_debug_snapshot, assert_toml_snapshot};
    use std::io::Write;

    #[test]
    fn serialization_and_default() {
        assert_toml_snapshot!(RawConfig::default(), @r###"
        port = 7070

        [db]
        url = 'sqlite:./data/keeper.db?mode=rwc'
        max_connections = 20

        [security]
        token_ttl = 86400
        password_pepper = ''

        [storage]
        root = './data/storage'
        "###);
    }

    #[test]
    fn deserialization() {
        let config: RawConfig = toml::from_str(
            r#"
        port = 7171

        [db]
        url = 'sqlite::memory:'
        max_connections = 5

        [security]
        master_key = '0000000000000000000000000000000000000000000000000000000000000000'
        jwt_secret = 'secret'
        token_ttl = 60
        password_pepper = 'pepper'

        [storage]
        root = '/tmp/keeper'
    "#,
        )
        .unwrap();

        assert_debug_snapshot!(config, @r###"
        RawConfig {
            port: 7171,
            db: DatabaseConfig {
                url: "sqlite::memory:",
                max_connections: 5,
            },
            security: SecurityConfig {
                master_key: Some(
                    "[REDACTED]",
                ),
                jwt_secret: Some(
                    "[REDACTED]",
                ),
                token_ttl: 60s,
                password_pepper: "[REDACTED]",
            },
            storage: StorageConfig {
                root: "/tmp/keeper",
            },
        }
        "###);
    }

    #[test]
    fn reads_partial_file_with_defaults() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            r#"
port = 7272
[security]
jwt_secret = 'secret'
"#
        )?;

        let config = RawConfig::read_from_file(file.path().to_str().unwrap())?;
        assert_eq!(config.port, 7272);
        assert_eq!(config.security.jwt_secret.as_deref(), Some("secret"));
        assert_eq!(config.db, RawConfig::default().db);
        assert_eq!(config.storage, RawConfig::default().storage);

        Ok(())
    }
}

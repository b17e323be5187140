#![deny(warnings)]

mod api;
mod config;
mod database;
mod error;
mod secrets;
mod security;
mod server;
mod users;

use crate::config::{Config, RawConfig};
use anyhow::anyhow;
use clap::{Arg, Command, crate_authors, crate_description, crate_version, value_parser};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let matches = Command::new("Keeper API server")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("KEEPER_CONFIG")
                .short('c')
                .long("config")
                .default_value("keeper.toml")
                .help("Path to the application configuration file."),
        )
        .arg(
            Arg::new("PORT")
                .env("KEEPER_PORT")
                .short('p')
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Defines a TCP port to listen on."),
        )
        .get_matches();

    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!("Keeper raw configuration: {raw_config:?}.");

    // CLI argument takes precedence.
    let http_port = matches
        .get_one::<u16>("PORT")
        .copied()
        .unwrap_or(raw_config.port);
    server::run(Config::from(raw_config), http_port)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::Api,
        config::{Config, DatabaseConfig, SecurityConfig, StorageConfig},
        database::Database,
        security::EnvelopeCipher,
        users::{User, UserId},
    };
    use std::{path::Path, time::Duration};
    use time::OffsetDateTime;

    pub const MOCK_MASTER_KEY: &str =
        "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2";

    pub fn mock_user() -> anyhow::Result<User> {
        Ok(User {
            id: UserId::try_from(1)?,
            login: "dev@keeper.dev".to_string(),
            password_hash: "hash".to_string(),
            // January 1, 2010 10:00:00 UTC
            created_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
            updated_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
        })
    }

    pub fn mock_cipher() -> anyhow::Result<EnvelopeCipher> {
        EnvelopeCipher::from_hex(MOCK_MASTER_KEY)
    }

    pub async fn mock_db() -> anyhow::Result<Database> {
        Database::open(|| Ok("sqlite::memory:".to_string())).await
    }

    pub fn mock_config(storage_root: &Path) -> Config {
        Config {
            version: "1.0.0".to_string(),
            http_port: 1234,
            db: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 5,
            },
            security: SecurityConfig {
                master_key: Some(MOCK_MASTER_KEY.to_string()),
                jwt_secret: Some("3024bf8975b03b84e405f36a7bacd1c1".to_string()),
                token_ttl: Duration::from_secs(3600),
                password_pepper: "pepper".to_string(),
            },
            storage: StorageConfig {
                root: storage_root.to_path_buf(),
            },
        }
    }

    pub async fn mock_api(storage_root: &Path) -> anyhow::Result<Api> {
        Api::new(&mock_config(storage_root), mock_db().await?)
    }
}

use serde_derive::{Deserialize, Serialize};

/// Configuration for the database connection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Connection URL of the SQLite database.
    pub url: String,
    /// Maximum number of connections in the pool. Default is 20.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:./data/keeper.db?mode=rwc".to_string(),
            max_connections: 20,
        }
    }
}

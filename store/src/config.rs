use serde::{Deserialize, Serialize};

/// Price store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database connection configuration
    pub database: DatabaseConfig,

    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,

    /// Database port
    pub port: u16,

    /// Database name
    pub database: String,

    /// Database user
    pub user: String,

    /// Database password
    pub password: String,

    /// Maximum number of connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout_sec")]
    pub connection_timeout_sec: u64,
}

impl DatabaseConfig {
    /// Build PostgreSQL connection string
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={} connect_timeout={}",
            self.host,
            self.port,
            self.database,
            self.user,
            self.password,
            self.connection_timeout_sec
        )
    }
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum number of closes a single point-in-time query may return
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

// Default value functions
fn default_max_connections() -> usize {
    10
}

fn default_connection_timeout_sec() -> u64 {
    5
}

fn default_max_results() -> usize {
    10_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                database: "mcvar".to_string(),
                user: "postgres".to_string(),
                password: "postgres".to_string(),
                max_connections: default_max_connections(),
                connection_timeout_sec: default_connection_timeout_sec(),
            },
            query: QueryConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, crate::error::StoreError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::error::StoreError::ConfigError(e.to_string()))?;

        let config: StoreConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, crate::error::StoreError> {
        let config: StoreConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

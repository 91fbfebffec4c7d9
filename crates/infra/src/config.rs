//! Environment configuration.
//!
//! Read once at startup and passed down explicitly; nothing here is global.

use stockrelay_core::{RelayError, RelayResult};

pub const ENV_QUEUE_URL: &str = "SQS_URL";
pub const ENV_TOPIC_ARN: &str = "SNS_ARN";
pub const ENV_DB_USER: &str = "MASTER_DB_USER";
pub const ENV_DB_PASSWORD: &str = "MASTER_DB_PASSWORD";
pub const ENV_DB_ADDRESS: &str = "MASTER_DB_ADDRESS";
pub const ENV_DB_NAME: &str = "MASTER_DB_NAME";
pub const ENV_DB_PORT: &str = "MASTER_DB_PORT";
pub const ENV_REGION: &str = "AWS_REGION";

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection parameters for the inventory database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub database: String,
    pub port: u16,
}

impl core::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

/// Full relay configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub queue_url: String,
    pub topic_arn: String,
    pub region: String,
    pub database: DatabaseConfig,
}

impl RelayConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> RelayResult<String> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(RelayError::config(format!("{} is not set", key))),
            }
        };

        let port_raw = required(ENV_DB_PORT)?;
        let port = port_raw.trim().parse::<u16>().map_err(|e| {
            RelayError::config(format!("{} must be a port number ({}): {}", ENV_DB_PORT, port_raw, e))
        })?;

        let database = DatabaseConfig {
            user: required(ENV_DB_USER)?,
            password: required(ENV_DB_PASSWORD)?,
            host: required(ENV_DB_ADDRESS)?,
            database: required(ENV_DB_NAME)?,
            port,
        };

        let region = lookup(ENV_REGION)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            queue_url: required(ENV_QUEUE_URL)?,
            topic_arn: required(ENV_TOPIC_ARN)?,
            region,
            database,
        })
    }
}

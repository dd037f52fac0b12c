use database::db::DatabaseConfig;
use std::env;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let mut database = DatabaseConfig::new(url);

        if let Some(value) = lookup("DATABASE_MAX_CONNECTIONS") {
            database.max_connections = value
                .trim()
                .parse()
                .ok()
                .filter(|&max| max > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    value,
                })?;
        }

        if let Some(value) = lookup("DATABASE_SQL_LOGGING") {
            database.sql_logging = flag("DATABASE_SQL_LOGGING", value)?;
        }

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(value) => flag("RUN_MIGRATIONS", value)?,
            None => false,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database,
            run_migrations,
        })
    }
}

fn flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}

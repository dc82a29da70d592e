//! Runtime settings from environment variables (and `.env` via dotenvy).

use crate::config::is_identifier;
use crate::error::ConfigError;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

pub const ENV_BIND_ADDR: &str = "PEOPLE_BIND_ADDR";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DB_SCHEMA: &str = "PEOPLE_DB_SCHEMA";
pub const ENV_DB_MAX_CONNECTIONS: &str = "PEOPLE_DB_MAX_CONNECTIONS";
pub const ENV_STORE: &str = "PEOPLE_STORE";
pub const ENV_AUTO_MIGRATE: &str = "PEOPLE_AUTO_MIGRATE";
pub const ENV_BODY_LIMIT_BYTES: &str = "PEOPLE_BODY_LIMIT_BYTES";
pub const ENV_LOG_FORMAT: &str = "PEOPLE_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "PEOPLE_LOG_LEVEL";

/// Which `PersonStore` implementation backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err("expected postgres or memory".into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err("expected text or json".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Schema holding the people table. Must be a plain identifier.
    pub db_schema: String,
    pub db_max_connections: u32,
    pub store: StoreBackend,
    /// Create schema and table on startup when missing.
    pub auto_migrate: bool,
    pub body_limit_bytes: usize,
    pub log_format: LogFormat,
    /// Default tracing filter, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: "postgres://localhost/people".into(),
            db_schema: "public".into(),
            db_max_connections: 5,
            store: StoreBackend::Postgres,
            auto_migrate: true,
            body_limit_bytes: 64 * 1024,
            log_format: LogFormat::Text,
            log_level: "people_api=info,tower_http=info".into(),
        }
    }
}

impl Settings {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Settings::default();

        if let Some(v) = get(ENV_BIND_ADDR) {
            settings.bind_addr = parse(ENV_BIND_ADDR, &v)?;
        }
        if let Some(v) = get(ENV_DATABASE_URL) {
            settings.database_url = v;
        }
        if let Some(v) = get(ENV_DB_SCHEMA) {
            if !is_identifier(&v) {
                return Err(ConfigError::Invalid {
                    key: ENV_DB_SCHEMA,
                    value: v,
                    reason: "must be a lowercase identifier".into(),
                });
            }
            settings.db_schema = v;
        }
        if let Some(v) = get(ENV_DB_MAX_CONNECTIONS) {
            settings.db_max_connections = parse(ENV_DB_MAX_CONNECTIONS, &v)?;
            if settings.db_max_connections == 0 {
                return Err(ConfigError::Invalid {
                    key: ENV_DB_MAX_CONNECTIONS,
                    value: v,
                    reason: "must be at least 1".into(),
                });
            }
        }
        if let Some(v) = get(ENV_STORE) {
            settings.store = parse(ENV_STORE, &v)?;
        }
        if let Some(v) = get(ENV_AUTO_MIGRATE) {
            settings.auto_migrate = parse_bool(ENV_AUTO_MIGRATE, &v)?;
        }
        if let Some(v) = get(ENV_BODY_LIMIT_BYTES) {
            settings.body_limit_bytes = parse(ENV_BODY_LIMIT_BYTES, &v)?;
        }
        if let Some(v) = get(ENV_LOG_FORMAT) {
            settings.log_format = parse(ENV_LOG_FORMAT, &v)?;
        }
        if let Some(v) = get(ENV_LOG_LEVEL) {
            settings.log_level = v;
        }
        Ok(settings)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.db_schema, "public");
        assert_eq!(s.store, StoreBackend::Postgres);
        assert!(s.auto_migrate);
        assert_eq!(s.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_from_lookup() {
        let s = settings(&[
            (ENV_BIND_ADDR, "127.0.0.1:8080"),
            (ENV_STORE, "Memory"),
            (ENV_AUTO_MIGRATE, "no"),
            (ENV_DB_SCHEMA, "people_app"),
            (ENV_DB_MAX_CONNECTIONS, "12"),
            (ENV_LOG_FORMAT, "json"),
        ])
        .unwrap();
        assert_eq!(s.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(s.store, StoreBackend::Memory);
        assert!(!s.auto_migrate);
        assert_eq!(s.db_schema, "people_app");
        assert_eq!(s.db_max_connections, 12);
        assert_eq!(s.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_values_keep_defaults() {
        let s = settings(&[(ENV_STORE, "  ")]).unwrap();
        assert_eq!(s.store, StoreBackend::Postgres);
    }

    #[test]
    fn rejects_bad_values() {
        let err = settings(&[(ENV_STORE, "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_STORE, .. }));

        let err = settings(&[(ENV_DB_SCHEMA, "public; drop")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DB_SCHEMA, .. }));

        let err = settings(&[(ENV_DB_MAX_CONNECTIONS, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DB_MAX_CONNECTIONS, .. }));

        assert!(settings(&[(ENV_BIND_ADDR, "nowhere")]).is_err());
        assert!(settings(&[(ENV_AUTO_MIGRATE, "maybe")]).is_err());
    }
}

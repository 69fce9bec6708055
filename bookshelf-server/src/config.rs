//! Server configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: PostgreSQL connection string (default: postgres://localhost/books)
//! - `PORT`: Port to listen on (default: 8080)
//! - `BIND_HOST`: Address to bind to (default: 0.0.0.0)
//! - `RESET_DATABASE`: Seed the database at startup when truthy (see [`parse_flag`])
//! - `HEALTH_CHECK_INTERVAL_SECS`: Readiness ping interval (default: 5)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/books";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u64 = 5;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Run the seeder once at startup
    pub reset_database: bool,
    /// How often the readiness monitor pings the database
    pub health_check_interval: Duration,
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup (for testing)
    ///
    /// Unset or empty variables take their defaults; anything else must parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| lookup(key).filter(|v| !v.is_empty()).map(|v| (key, v));
        let defaults = Self::default();

        let host = get("BIND_HOST")
            .map(|(key, v)| parse_value(key, &v))
            .transpose()?
            .unwrap_or(DEFAULT_HOST);
        let port = get("PORT")
            .map(|(key, v)| parse_value(key, &v))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let interval = get("HEALTH_CHECK_INTERVAL_SECS")
            .map(|(key, v)| parse_value::<u64>(key, &v))
            .transpose()?
            .map(health_check_interval)
            .unwrap_or(defaults.health_check_interval);

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_url: get("DATABASE_URL")
                .map(|(_, v)| v)
                .unwrap_or(defaults.database_url),
            reset_database: get("RESET_DATABASE").is_some_and(|(_, v)| parse_flag(&v)),
            health_check_interval: interval,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            reset_database: false,
            health_check_interval: Duration::from_secs(DEFAULT_HEALTH_CHECK_INTERVAL_SECS),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Interpret a boolean-ish value. Used for `RESET_DATABASE` on every path.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "t" | "true" | "y" | "yes" | "on"
    )
}

/// Readiness ping interval from a number of seconds, never below one second.
pub fn health_check_interval(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url, "postgres://localhost/books");
        assert!(!config.reset_database);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("BIND_HOST", "127.0.0.1"),
            ("DATABASE_URL", "postgres://db/library"),
            ("RESET_DATABASE", "true"),
            ("HEALTH_CHECK_INTERVAL_SECS", "1"),
        ]);

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.database_url, "postgres://db/library");
        assert!(config.reset_database);
        assert_eq!(config.health_check_interval, Duration::from_secs(1));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = config_from(&[("HEALTH_CHECK_INTERVAL_SECS", "0")]);
        assert_eq!(config.health_check_interval, Duration::from_secs(1));
    }

    #[test]
    fn empty_values_take_defaults() {
        let config = config_from(&[("PORT", ""), ("RESET_DATABASE", "")]);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flag_parsing() {
        for truthy in ["1", "t", "true", "TRUE", "y", "yes", "on", " true "] {
            assert!(parse_flag(truthy), "{truthy:?} should be truthy");
        }
        for falsy in ["", "0", "false", "no", "off", "maybe"] {
            assert!(!parse_flag(falsy), "{falsy:?} should be falsy");
        }
    }
}

//! Server configuration read from the environment.

use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PAYLOAD_LIMIT: usize = 256 * 1024;
const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// Worker count; actix picks one per core when unset.
    pub workers: Option<usize>,
    /// Maximum request body size in bytes.
    pub payload_limit: usize,
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `ALLOWED_ORIGINS`, `WORKERS` and `PAYLOAD_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var("PORT", var("PORT"))?.unwrap_or(DEFAULT_PORT);
        let workers = parse_var::<usize>("WORKERS", var("WORKERS"))?;
        if workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                name: "WORKERS",
                value: "0".to_string(),
            });
        }
        let payload_limit =
            parse_var("PAYLOAD_LIMIT", var("PAYLOAD_LIMIT"))?.unwrap_or(DEFAULT_PAYLOAD_LIMIT);

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            host,
            port,
            allowed_origins,
            workers,
            payload_limit,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            workers: None,
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { name, value })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 8080));
    }

    #[test]
    fn test_reads_all_values() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("ALLOWED_ORIGINS", "https://a.pt, https://b.pt,"),
            ("WORKERS", "4"),
            ("PAYLOAD_LIMIT", "1048576"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.allowed_origins, vec!["https://a.pt", "https://b.pt"]);
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.payload_limit, 1_048_576);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("HOST", "")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidValue {
                name: "PORT",
                value: "http".to_string()
            })
        );
        assert!(ServerConfig::from_lookup(lookup(&[("WORKERS", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("PAYLOAD_LIMIT", "-1")])).is_err());
    }
}

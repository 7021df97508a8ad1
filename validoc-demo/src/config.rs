use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use validoc::DocsConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("REJECT_RATE must be within [0, 1], got {0}")]
    RejectRate(f64),
    #[error("{host}:{port} is not a valid listen address")]
    Address { host: String, port: u16 },
}

/// Demo server configuration loaded from environment variables.
///
/// | Env Var       | Default                |
/// |---------------|------------------------|
/// | `HOST`        | `127.0.0.1`            |
/// | `PORT`        | `8000`                 |
/// | `REJECT_RATE` | `0.5`                  |
/// | `DOCS_PATH`   | `apidoc`               |
/// | `DOCS_TITLE`  | `Service API Document` |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Probability that the predict endpoint answers 403.
    pub reject_rate: f64,
    pub docs: DocsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            reject_rate: 0.5,
            docs: DocsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "port number")?.unwrap_or(defaults.port);
        let reject_rate =
            parse_var(&lookup, "REJECT_RATE", "probability")?.unwrap_or(defaults.reject_rate);
        if !(0.0..=1.0).contains(&reject_rate) {
            return Err(ConfigError::RejectRate(reject_rate));
        }

        let mut docs = defaults.docs;
        if let Some(path) = lookup("DOCS_PATH") {
            docs.path = path;
        }
        if let Some(title) = lookup("DOCS_TITLE") {
            docs.title = title;
        }
        docs.version = env!("CARGO_PKG_VERSION").to_string();

        Ok(Self {
            host,
            port,
            reject_rate,
            docs,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Address {
                host: self.host.clone(),
                port: self.port,
            })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            })
        })
        .transpose()
}

//! Server configuration.
//!
//! Settings are resolved in three layers: built-in defaults, then an optional
//! TOML file, then environment variables.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 5000
//! environment = "development"
//! duplicate_conflict = false
//! ```
//!
//! # Environment Variables
//!
//! - `PERSONAS_CONFIG`: path of the TOML file (default: `personas.toml` if present)
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8080)
//! - `APP_ENV`: `development` or `production` (default: production)
//! - `DUPLICATE_CONFLICT`: answer duplicate document numbers with 409 (default: false)

use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_ENV: &str = "PERSONAS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "personas.toml";

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Deployment environment. Development mounts the API documentation routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Answer duplicate document numbers with 409 Conflict instead of 200.
    pub duplicate_conflict: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Production,
            duplicate_conflict: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the full configuration: defaults, then file, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match Self::config_path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    /// The TOML file to read, if any.
    ///
    /// An explicit `PERSONAS_CONFIG` is returned even when the file is absent,
    /// so a mistyped path is reported rather than silently ignored.
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }

    /// Apply `HOST`, `PORT`, `APP_ENV` and `DUPLICATE_CONFLICT` on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Ok(environment) = env::var("APP_ENV") {
            self.environment = environment.parse().map_err(|_| ConfigError::InvalidValue {
                key: "APP_ENV",
                value: environment.clone(),
            })?;
        }
        if let Ok(flag) = env::var("DUPLICATE_CONFLICT") {
            self.duplicate_conflict = parse_flag(&flag).ok_or_else(|| ConfigError::InvalidValue {
                key: "DUPLICATE_CONFLICT",
                value: flag.clone(),
            })?;
        }
        Ok(self)
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "host",
            value: raw,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

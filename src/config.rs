use crate::storage::resolve_data_path;
use std::{env, net::SocketAddr, path::PathBuf};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub remote: Option<RemoteConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let remote = match non_empty_var("REBOOT_REMOTE_URL") {
            Some(url) => Some(RemoteConfig {
                url,
                api_key: non_empty_var("REBOOT_REMOTE_KEY").unwrap_or_default(),
                timeout_secs: parse_var("REBOOT_REMOTE_TIMEOUT_SECS", DEFAULT_REMOTE_TIMEOUT_SECS)?,
            }),
            None => None,
        };

        Ok(Self {
            host: non_empty_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
            data_path: resolve_data_path(),
            remote,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

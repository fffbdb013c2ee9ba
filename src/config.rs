use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::fetch::FetchConfig;

const DEFAULT_DICTIONARY_PATH: &str = "data/cmudict.dict";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub dictionary_path: PathBuf,
    pub fetch: FetchConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let dictionary_path = lookup("DICTIONARY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY_PATH));

        let defaults = FetchConfig::default();
        let timeout = seconds(&lookup, "FETCH_TIMEOUT_SECS")?.unwrap_or(defaults.timeout);
        let connect_timeout =
            seconds(&lookup, "CONNECT_TIMEOUT_SECS")?.unwrap_or(defaults.connect_timeout);

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            dictionary_path,
            fetch: FetchConfig {
                timeout,
                connect_timeout,
                ..defaults
            },
        })
    }
}

fn seconds<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e)))?;
            if secs == 0 {
                return Err(AppError::ConfigError(format!("{} must be positive", key)));
            }
            Ok(Some(Duration::from_secs(secs)))
        }
    }
}

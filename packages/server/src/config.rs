//! Server configuration.
//!
//! Values come from command-line flags first, then environment variables
//! (`STRESS_MAP_DATA`, `BIND_ADDR`, `PORT`), then built-in defaults.

use std::path::PathBuf;

/// Dataset path used when neither a flag nor `STRESS_MAP_DATA` is set.
pub const DEFAULT_DATA_PATH: &str = "data/pune_environmental_data.csv";

/// Bind address used when neither a flag nor `BIND_ADDR` is set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Port used when neither a flag nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved settings for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// CSV file to load at startup.
    pub data_path: PathBuf,
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Resolves the configuration against the process environment.
    #[must_use]
    pub fn resolve(
        data_path: Option<PathBuf>,
        bind_addr: Option<String>,
        port: Option<u16>,
    ) -> Self {
        Self::resolve_with(data_path, bind_addr, port, |key| std::env::var(key).ok())
    }

    /// Resolves the configuration using `env` to look up variables.
    #[must_use]
    pub fn resolve_with(
        data_path: Option<PathBuf>,
        bind_addr: Option<String>,
        port: Option<u16>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let defaults = Self::default();

        let port = port.or_else(|| {
            let raw = env("PORT")?;
            raw.parse()
                .map_err(|e| log::warn!("Ignoring invalid PORT '{raw}': {e}"))
                .ok()
        });

        Self {
            data_path: data_path
                .or_else(|| env("STRESS_MAP_DATA").map(PathBuf::from))
                .unwrap_or(defaults.data_path),
            bind_addr: bind_addr
                .or_else(|| env("BIND_ADDR"))
                .unwrap_or(defaults.bind_addr),
            port: port.unwrap_or(defaults.port),
        }
    }
}

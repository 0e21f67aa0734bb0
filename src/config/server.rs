//! HTTP server settings.
//!
//! The bind address is read from `SERVER_HOST` and `SERVER_PORT`, usually set in
//! the `.env` file, with local-development defaults.

use crate::errors::{Error, Result};

/// Where the HTTP listener binds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl ServerConfig {
    /// Reads the server settings from the environment.
    ///
    /// # Errors
    /// Returns an error if `SERVER_PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("SERVER_HOST").ok(),
            std::env::var("SERVER_PORT").ok(),
        )
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = host.unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match port {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| Error::Config {
                message: format!("Invalid SERVER_PORT '{raw}': {e}"),
            })?,
            None => 8000,
        };
        Ok(Self { host, port })
    }

    /// The `host:port` string handed to the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Path of the catalog seed file, from `CATALOG_PATH` or `./catalog.toml`
#[must_use]
pub fn get_catalog_path() -> String {
    std::env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.toml".to_string())
}

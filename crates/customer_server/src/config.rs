//! Server configuration.
//!
//! Host, port, store location and logging settings for one process.
//! Values come from the command line (or its `CUSTOMER_*` env fallbacks);
//! anything left unset keeps the defaults below.

use customer_core::InitMode;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "customers.db";

/// Runtime configuration for the customer server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 8080)
    pub port: u16,

    /// SQLite store file (default: "customers.db")
    pub db_path: PathBuf,

    pub init_mode: InitMode,

    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            init_mode: InitMode::default(),
            log_level: None,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Create a config bound to `port` with everything else defaulted.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` string handed to the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Effective log level after applying the build-mode default.
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(customer_core::default_log_level())
    }
}

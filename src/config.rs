use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_PATH: &str = "./data/contacts.json";
pub const DEFAULT_PUBLIC_DIR: &str = "./public";
pub const DEFAULT_FLASH_TTL: Duration = Duration::from_secs(6);

/// Runtime configuration of the contact book server.
///
/// Values come from the environment (a `.env` file is honoured) and can be overridden
/// with the builder methods, which the binary drives from its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to bind
    pub port: u16,

    /// JSON document holding the contacts
    pub data_path: PathBuf,

    /// Directory served under `/static`
    pub public_dir: PathBuf,

    /// Lifetime of an unread flash message
    pub flash_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            flash_ttl: DEFAULT_FLASH_TTL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("APP_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("APP_PORT") {
            config.port = port
                .trim()
                .parse::<u16>()
                .context("APP_PORT must be a valid u16")?;
        }
        if let Some(path) = lookup("CONTACTS_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("CONTACTS_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(ttl) = lookup("FLASH_TTL_SECS") {
            let secs = ttl
                .trim()
                .parse::<u64>()
                .context("FLASH_TTL_SECS must be a whole number of seconds")?;
            config.flash_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

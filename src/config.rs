//! Server configuration.
//!
//! Settings come from an optional YAML file, then the `STATICD_LISTEN`
//! environment variable, then the command line (see [`crate::cli`]).
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:8080"
//!   mode: fork
//! files:
//!   root: /srv/www
//! limits:
//!   read_timeout_secs: 5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const LISTEN_ENV: &str = "STATICD_LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub limits: LimitsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub mode: Mode,
}

/// How each accepted connection is isolated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One forked process per connection
    Fork,
    /// One OS thread per connection
    #[default]
    Thread,
    /// One tokio task per connection
    Task,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory targets are resolved against
    pub root: PathBuf,
    /// Document served for `/`
    pub index: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_header_bytes: usize,
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            mode: Mode::default(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: "index.html".to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_header_bytes: 8192,
            read_timeout_secs: 15,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Everything a single connection handler needs.
///
/// Cloned into every execution context; never mutated after startup.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    pub root: PathBuf,
    pub index: String,
    pub max_header_bytes: usize,
    pub read_timeout: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Config::default().handler()
    }
}

impl Config {
    /// Loads the YAML file at `path` if given, then applies the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = listen_addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.limits.max_header_bytes < 4 {
            anyhow::bail!("limits.max_header_bytes must be at least 4");
        }
        if self.limits.read_timeout_secs == 0 {
            anyhow::bail!("limits.read_timeout_secs must be greater than 0");
        }
        if self.files.index.is_empty() || self.files.index.contains('/') {
            anyhow::bail!("files.index must be a plain file name");
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.log
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.log.level))
    }

    pub fn handler(&self) -> HandlerConfig {
        HandlerConfig {
            root: self.files.root.clone(),
            index: self.files.index.clone(),
            max_header_bytes: self.limits.max_header_bytes,
            read_timeout: Duration::from_secs(self.limits.read_timeout_secs),
        }
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::http::writer::Framing;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "DOCSERVE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Base for redirect `Location` headers; derived from `listen_addr` when unset.
    pub public_url: Option<String>,
    /// Upper bound on bytes read for the request line.
    pub read_limit: usize,
    /// Idle wait for the rest of an unterminated request line.
    pub line_timeout_ms: u64,
    pub framing: Framing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    pub index: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "localhost:8080".to_string(),
            public_url: None,
            read_limit: 1024,
            line_timeout_ms: 250,
            framing: Framing::default(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./www"),
            index: "index.html".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads defaults, then the YAML file named by `DOCSERVE_CONFIG` if set,
    /// then environment overrides, and validates the result.
    pub fn load() -> Result<Self> {
        let cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        let cfg = cfg.with_env_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as null rather than an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies `LISTEN`, `DOCSERVE_ROOT` and `DOCSERVE_LOG` from `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup("DOCSERVE_ROOT") {
            self.static_files.root = PathBuf::from(root);
        }
        if let Some(level) = lookup("DOCSERVE_LOG") {
            self.logging.level = level;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.read_limit == 0 {
            anyhow::bail!("server.read_limit must be greater than zero");
        }
        if self.server.line_timeout_ms == 0 {
            anyhow::bail!("server.line_timeout_ms must be greater than zero");
        }

        let index = &self.static_files.index;
        if index.is_empty() || index.contains('/') || index == "." || index == ".." {
            anyhow::bail!("static_files.index must be a plain file name, got {:?}", index);
        }

        self.public_url()?;
        self.log_level()?;
        Ok(())
    }

    /// The absolute URL redirects are built from.
    pub fn public_url(&self) -> Result<Url> {
        let raw = match &self.server.public_url {
            Some(url) => url.clone(),
            None => format!("http://{}", self.server.listen_addr),
        };

        let url = Url::parse(&raw).with_context(|| format!("Invalid public URL {:?}", raw))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("Unsupported public URL scheme {:?}", other),
        }
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level {:?}", self.logging.level))
    }
}

// src/server/config.rs
//! Configuration file parsing for the Gourmet server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address
//! - [storage] - Database location
//! - [auth] - Token signing key and lifetime

use crate::server::ServerConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// TOML configuration file structure
#[derive(Debug, Deserialize)]
pub struct GourmetConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSection,

    /// Authentication settings
    #[serde(default)]
    pub auth: AuthSection,
}

impl Default for GourmetConfig {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            storage: StorageSection::default(),
            auth: AuthSection::default(),
        }
    }
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Public API bind address
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Storage configuration section
#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// Path to the gourmet database
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/var/lib/gourmet/gourmet.db")
}

/// Authentication configuration section
#[derive(Debug, Deserialize)]
pub struct AuthSection {
    /// File holding the token signing secret
    ///
    /// When unset, an ephemeral secret is generated at startup and all
    /// tokens become invalid on restart.
    pub token_key_file: Option<PathBuf>,

    /// Token lifetime (e.g., "1h", "30m")
    #[serde(default = "default_token_ttl")]
    pub token_ttl: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            token_key_file: None,
            token_ttl: default_token_ttl(),
        }
    }
}

fn default_token_ttl() -> String {
    "1h".to_string()
}

impl GourmetConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: GourmetConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate bind address
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        // Validate token lifetime
        let ttl = parse_duration(&self.auth.token_ttl)
            .with_context(|| format!("Invalid auth.token_ttl: {}", self.auth.token_ttl))?;
        if ttl.is_zero() {
            anyhow::bail!("auth.token_ttl must be positive, got {}", self.auth.token_ttl);
        }

        Ok(())
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = self.server.bind.parse()?;
        let token_ttl = parse_duration(&self.auth.token_ttl)?;
        let token_secret = self.read_token_secret()?;

        Ok(ServerConfig {
            bind_addr,
            db_path: self.storage.db_path.clone(),
            token_secret,
            token_ttl,
        })
    }

    /// Read the token signing secret
    ///
    /// A configured key file must exist and be non-empty. Without one,
    /// a random secret is generated for this process only.
    fn read_token_secret(&self) -> Result<Vec<u8>> {
        if let Some(ref key_file) = self.auth.token_key_file {
            let secret = std::fs::read(key_file)
                .with_context(|| format!("Failed to read token key file: {}", key_file.display()))?;

            if secret.is_empty() {
                anyhow::bail!("Token key file is empty: {}", key_file.display());
            }

            return Ok(secret);
        }

        warn!("No auth.token_key_file configured; using an ephemeral signing secret, tokens will not survive a restart");
        Ok(rand::random::<[u8; 32]>().to_vec())
    }
}

/// Parse a human-readable duration string (e.g., "15m", "1h", "30s")
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with('d') {
        (&s[..s.len() - 1], 24 * 60 * 60)
    } else if s.ends_with('h') {
        (&s[..s.len() - 1], 60 * 60)
    } else if s.ends_with('m') {
        (&s[..s.len() - 1], 60)
    } else if s.ends_with('s') {
        (&s[..s.len() - 1], 1)
    } else {
        // Assume seconds
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration number: {}", num_str))?;

    Ok(Duration::from_secs(num * multiplier))
}

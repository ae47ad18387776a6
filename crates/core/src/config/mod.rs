//! Configuration for the permission bridge
//!
//! TOML-backed settings controlling caching and resolution. The host
//! owns the file layout and passes a path in; this layer does no path
//! discovery of its own.
//!
//! ```toml
//! version = 1
//!
//! [cache]
//! enabled = true
//! window_ms = 30000
//!
//! [resolution]
//! native_fallback = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Check-result caching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Wrap the resolved provider in the caching decorator
    pub enabled: bool,

    /// Staleness window for cached check results, in milliseconds
    pub window_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: 30_000,
        }
    }
}

/// Backend resolution settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Fall back to the host's native permission surface when no real
    /// backend is installed. Off by default: the native surface is
    /// online-only, group-less and unpersisted.
    pub native_fallback: bool,
}

/// Top-level permission bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Config version for future migration support
    pub version: u32,

    pub cache: CacheConfig,

    pub resolution: ResolutionConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            cache: CacheConfig::default(),
            resolution: ResolutionConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Load config from file, creating a default one if missing
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!(?path, "loaded permission bridge config");
            Ok(config)
        } else {
            let default = Self::default();
            default.save(path)?;
            tracing::info!(?path, "created default permission bridge config");
            Ok(default)
        }
    }

    /// Save config to file, creating parent directories if needed
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!(?path, "saved permission bridge config");
        Ok(())
    }

    /// Reload config from file, replacing self with the file contents
    pub fn reload(&mut self, path: &Path) -> ConfigResult<()> {
        let content = std::fs::read_to_string(path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!(?path, "reloaded permission bridge config");
        Ok(())
    }
}

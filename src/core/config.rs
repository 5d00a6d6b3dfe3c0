//! Application configuration management
//!
//! Credentials and per-provider overrides live in a TOML file with one
//! section per provider id. The file is loaded at startup into a shared
//! store; the credential editor rewrites the whole file on save so disk and
//! memory stay in step.

use crate::core::constants;
use crate::core::provider::ChatProviderId;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One provider section: credential plus optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Request timeouts in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_chat_timeout")]
    pub chat_timeout: u64,
    #[serde(default = "default_geo_timeout")]
    pub geo_timeout: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            chat_timeout: default_chat_timeout(),
            geo_timeout: default_geo_timeout(),
        }
    }
}

fn default_chat_timeout() -> u64 {
    constants::DEFAULT_CHAT_TIMEOUT
}

fn default_geo_timeout() -> u64 {
    constants::DEFAULT_GEO_TIMEOUT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub openrouter: ProviderConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub cerebras: ProviderConfig,
    #[serde(default)]
    pub ocrspace: ProviderConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            openrouter: ProviderConfig::default(),
            gemini: ProviderConfig::default(),
            cerebras: ProviderConfig::default(),
            ocrspace: ProviderConfig::default(),
            request: RequestConfig::default(),
        }
    }
}

impl Config {
    /// Section for a chat provider. A missing section deserialized to its
    /// default carries an empty api key; the request is still attempted and
    /// the provider's rejection collapses like any other failure.
    pub fn chat_section(&self, id: ChatProviderId) -> &ProviderConfig {
        match id {
            ChatProviderId::OpenRouter => &self.openrouter,
            ChatProviderId::Gemini => &self.gemini,
            ChatProviderId::Cerebras => &self.cerebras,
        }
    }

    fn section_mut(&mut self, name: &str) -> Option<&mut ProviderConfig> {
        match name.to_lowercase().as_str() {
            "openrouter" => Some(&mut self.openrouter),
            "gemini" => Some(&mut self.gemini),
            "cerebras" => Some(&mut self.cerebras),
            "ocrspace" | "ocr.space" => Some(&mut self.ocrspace),
            _ => None,
        }
    }
}

/// Shared handle to the live configuration
///
/// Cloning is cheap; all clones observe the same state. The gateway reads
/// credentials through this handle on every call, so an edit-and-save from
/// the credential workflow is visible to consumers immediately.
#[derive(Clone)]
pub struct ConfigStore {
    path: PathBuf,
    inner: Arc<RwLock<Config>>,
}

impl ConfigStore {
    /// Load the store, writing a default config file when none exists.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let config = if path.exists() {
            Self::read(&path)?
        } else {
            let config = Config::default();
            Self::write(&path, &config)?;
            config
        };

        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(config)),
        })
    }

    fn read(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse TOML configuration")
    }

    fn write(path: &Path, config: &Config) -> Result<()> {
        let content =
            toml::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Current configuration by value, so callers never hold the lock
    /// across an await point.
    pub fn snapshot(&self) -> Config {
        self.inner.read().clone()
    }

    /// Re-read the file, replacing in-memory state.
    pub fn reload(&self) -> Result<()> {
        let config = Self::read(&self.path)?;
        *self.inner.write() = config;
        Ok(())
    }

    /// Update one provider's credential and rewrite the whole file.
    pub fn set_api_key(&self, provider: &str, api_key: &str) -> Result<()> {
        let mut config = self.inner.write();
        let section = config
            .section_mut(provider)
            .with_context(|| format!("Unknown provider section: {provider}"))?;
        section.api_key = api_key.to_string();
        Self::write(&self.path, &config)
    }
}

use crate::category::Category;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub default_category: Category,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "auto".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl ProviderConfig {
    pub fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            self.base_url = default_base_url();
        }

        self.model = clean_optional(Some(self.model)).unwrap_or_else(default_model);
        self.api_key_env =
            clean_optional(Some(self.api_key_env)).unwrap_or_else(default_api_key_env);

        self
    }

    pub fn credential_source(&self) -> CredentialSource {
        CredentialSource::Env(self.api_key_env.clone())
    }
}

/// Where the access credential comes from. Resolved on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Env(String),
    Fixed(Option<String>),
}

impl CredentialSource {
    pub fn resolve(&self) -> Option<String> {
        match self {
            CredentialSource::Env(var) => clean_optional(std::env::var(var).ok()),
            CredentialSource::Fixed(value) => clean_optional(value.clone()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CredentialSource::Env(var) => var,
            CredentialSource::Fixed(_) => DEFAULT_API_KEY_ENV,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            default_category: Category::default(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("quill")
            .join("config.toml"))
    }

    pub async fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path()?).await
    }

    pub async fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .await
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", config_path.display()))?;
        config.provider = config.provider.normalized();

        Ok(config)
    }
}

fn clean_optional(input: Option<String>) -> Option<String> {
    input.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

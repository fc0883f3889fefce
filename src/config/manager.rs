use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::paths;

/// Settings in the `[openai]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiSection {
    /// API key stored directly in config (prefer `OPENAI_API_KEY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Instruction appended to every system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_prompt: Option<String>,
    /// OpenAI-compatible API root, e.g. `https://api.openai.com/v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/gptl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub openai: OpenAiSection,
    /// Locale codes mapped to the names used in prompts.
    #[serde(default)]
    pub locales: HashMap<String, String>,
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for `$XDG_CONFIG_HOME/gptl/config.toml`
    /// or `~/.config/gptl/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    /// Loads the file, treating a missing file as empty. A file that exists
    /// but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("gptl").join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = ConfigFile {
            openai: OpenAiSection {
                model: Some("gpt-4o".to_string()),
                max_tokens: Some(1024),
                general_prompt: Some("Keep product names.".to_string()),
                ..Default::default()
            },
            locales: HashMap::from([("en".to_string(), "English".to_string())]),
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.openai.model.as_deref(), Some("gpt-4o"));
        assert_eq!(loaded.openai.max_tokens, Some(1024));
        assert_eq!(loaded.openai.general_prompt.as_deref(), Some("Keep product names."));
        assert!(loaded.openai.api_key.is_none());
        assert_eq!(loaded.locales.get("en").map(String::as_str), Some("English"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        let config = manager.load_or_default().unwrap();
        assert!(config.openai.model.is_none());
        assert!(config.locales.is_empty());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
        fs::write(manager.config_path(), "[openai\nmodel = ").unwrap();

        let err = manager.load_or_default().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_partial_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [locales]
            de = "German"
            "#,
        )
        .unwrap();
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.locales.len(), 1);
    }
}

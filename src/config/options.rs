use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, TranslateError};

use super::manager::ConfigFile;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";
pub const ENV_GENERAL_PROMPT: &str = "OPENAI_GENERAL_PROMPT";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "OPENAI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Explicit provider settings, the highest-priority source.
///
/// Every field is optional; unset fields fall back to the environment,
/// then the config file, then built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub locale_map: Option<HashMap<String, String>>,
    pub max_tokens: Option<u32>,
    pub general_prompt: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Immutable provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub api_key: String,
    pub model: String,
    /// Locale code to the name used in prompts.
    pub locale_map: HashMap<String, String>,
    pub max_tokens: u32,
    /// Extra instruction appended to every system prompt.
    pub general_prompt: Option<String>,
    pub base_url: String,
    /// Upper bound for one completion call, connect to last byte.
    pub request_timeout: Duration,
}

impl ProviderOptions {
    /// Creates options with defaults for everything but the credentials.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let options = Self {
            api_key: api_key.into(),
            model: model.into(),
            locale_map: HashMap::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            general_prompt: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(TranslateError::Validation("apiKey is not defined".to_string()));
        }
        if self.model.is_empty() {
            return Err(TranslateError::Validation("model is not defined".to_string()));
        }
        Ok(())
    }

    /// Name used for `code` in prompts: the mapped name, or the code itself.
    pub fn locale_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.locale_map.get(code).map_or(code, String::as_str)
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            api_key: "sk-test".to_string(),
            model: DEFAULT_MODEL.to_string(),
            locale_map: HashMap::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            general_prompt: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Resolves options from `settings`, the process environment and `file`.
pub fn resolve_options(settings: &ProviderSettings, file: &ConfigFile) -> Result<ProviderOptions> {
    resolve_options_with(settings, file, |name| std::env::var(name).ok())
}

/// Resolves options with an injectable environment lookup.
///
/// Priority for each value: explicit setting, environment variable, config
/// file, built-in default. Empty strings count as unset.
pub fn resolve_options_with<F>(
    settings: &ProviderSettings,
    file: &ConfigFile,
    env: F,
) -> Result<ProviderOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |name: &str| env(name).filter(|value| !value.is_empty());
    let section = &file.openai;

    let api_key = first_non_empty([
        settings.api_key.clone(),
        env(ENV_API_KEY),
        section.api_key.clone(),
    ])
    .unwrap_or_default();

    let model = first_non_empty([
        settings.model.clone(),
        env(ENV_MODEL),
        section.model.clone(),
    ])
    .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let max_tokens = settings
        .max_tokens
        .filter(|n| *n > 0)
        .or_else(|| parse_positive(ENV_MAX_TOKENS, env(ENV_MAX_TOKENS)))
        .or(section.max_tokens.filter(|n| *n > 0))
        .unwrap_or(DEFAULT_MAX_TOKENS);

    let general_prompt = first_non_empty([
        settings.general_prompt.clone(),
        env(ENV_GENERAL_PROMPT),
        section.general_prompt.clone(),
    ]);

    let base_url = first_non_empty([
        settings.base_url.clone(),
        env(ENV_BASE_URL),
        section.base_url.clone(),
    ])
    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = settings
        .timeout_secs
        .filter(|n| *n > 0)
        .or_else(|| parse_positive(ENV_TIMEOUT_SECS, env(ENV_TIMEOUT_SECS)))
        .or(section.timeout_secs.filter(|n| *n > 0))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let mut locale_map = file.locales.clone();
    if let Some(explicit) = &settings.locale_map {
        locale_map.extend(explicit.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let options = ProviderOptions {
        api_key,
        model,
        locale_map,
        max_tokens,
        general_prompt,
        base_url,
        request_timeout: Duration::from_secs(timeout_secs),
    };
    options.validate()?;
    Ok(options)
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|value| !value.is_empty())
}

fn parse_positive<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Some(value),
        _ => {
            tracing::warn!(variable = name, value = %raw, "ignoring invalid value");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::manager::OpenAiSection;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn settings_with_key() -> ProviderSettings {
        ProviderSettings {
            api_key: Some("sk-explicit".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let options =
            resolve_options_with(&settings_with_key(), &ConfigFile::default(), no_env).unwrap();
        assert_eq!(options.model, DEFAULT_MODEL);
        assert_eq!(options.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(options.general_prompt.is_none());
        assert!(options.locale_map.is_empty());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = resolve_options_with(&ProviderSettings::default(), &ConfigFile::default(), no_env)
            .unwrap_err();
        assert!(matches!(err, TranslateError::Validation(_)));
        assert!(err.to_string().contains("apiKey"));
    }

    #[test]
    fn test_empty_model_falls_back_to_default() {
        let settings = ProviderSettings {
            model: Some(String::new()),
            ..settings_with_key()
        };
        let options = resolve_options_with(&settings, &ConfigFile::default(), no_env).unwrap();
        assert_eq!(options.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_env_values_used() {
        let env = |name: &str| match name {
            ENV_API_KEY => Some("sk-env".to_string()),
            ENV_MODEL => Some("gpt-4o".to_string()),
            ENV_MAX_TOKENS => Some("2048".to_string()),
            ENV_GENERAL_PROMPT => Some("Be concise.".to_string()),
            _ => None,
        };
        let options =
            resolve_options_with(&ProviderSettings::default(), &ConfigFile::default(), env)
                .unwrap();
        assert_eq!(options.api_key, "sk-env");
        assert_eq!(options.model, "gpt-4o");
        assert_eq!(options.max_tokens, 2048);
        assert_eq!(options.general_prompt.as_deref(), Some("Be concise."));
    }

    #[test]
    fn test_invalid_max_tokens_falls_through() {
        for raw in ["lots", "0", "-5"] {
            let env = |name: &str| (name == ENV_MAX_TOKENS).then(|| raw.to_string());
            let options =
                resolve_options_with(&settings_with_key(), &ConfigFile::default(), env).unwrap();
            assert_eq!(options.max_tokens, DEFAULT_MAX_TOKENS, "{raw}");
        }
    }

    #[test]
    fn test_locale_map_merges_file_and_settings() {
        let mut file = ConfigFile::default();
        file.locales.insert("en".to_string(), "English".to_string());
        file.locales.insert("ja".to_string(), "Japanese".to_string());

        let settings = ProviderSettings {
            locale_map: Some(HashMap::from([("ja".to_string(), "日本語".to_string())])),
            ..settings_with_key()
        };
        let options = resolve_options_with(&settings, &file, no_env).unwrap();
        assert_eq!(options.locale_name("en"), "English");
        assert_eq!(options.locale_name("ja"), "日本語");
        assert_eq!(options.locale_name("de"), "de");
    }

    #[test]
    fn test_file_section_used_below_env() {
        let file = ConfigFile {
            openai: OpenAiSection {
                api_key: Some("sk-file".to_string()),
                model: Some("file-model".to_string()),
                timeout_secs: Some(30),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |name: &str| (name == ENV_MODEL).then(|| "env-model".to_string());
        let options = resolve_options_with(&ProviderSettings::default(), &file, env).unwrap();
        assert_eq!(options.api_key, "sk-file");
        assert_eq!(options.model, "env-model");
        assert_eq!(options.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_new_validates() {
        assert!(ProviderOptions::new("", "gpt-4").is_err());
        let err = ProviderOptions::new("sk", "").unwrap_err();
        assert!(err.to_string().contains("model is not defined"));
        assert!(ProviderOptions::new("sk", "gpt-4").is_ok());
    }

    #[test]
    fn test_masked_api_key() {
        let mut options = ProviderOptions::for_tests();
        options.api_key = "sk-1234567890abcd".to_string();
        assert_eq!(options.masked_api_key(), "****abcd");
        options.api_key = "short".to_string();
        assert_eq!(options.masked_api_key(), "****");
    }
}

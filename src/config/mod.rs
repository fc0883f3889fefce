mod manager;
mod options;

pub use manager::{ConfigFile, ConfigManager, OpenAiSection};
pub use options::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, ENV_API_KEY,
    ENV_BASE_URL, ENV_GENERAL_PROMPT, ENV_MAX_TOKENS, ENV_MODEL, ENV_TIMEOUT_SECS,
    ProviderOptions, ProviderSettings, resolve_options, resolve_options_with,
};

//! Config command handler.

use anyhow::Result;
use std::collections::HashMap;

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS, OpenAiSection, ProviderSettings, resolve_options,
};
use crate::ui::Style;

/// Prints the resolved configuration, or writes a starter file with `init`.
pub fn run_config(init: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if init {
        return write_starter(&manager);
    }

    let file_config = manager.load_or_default()?;
    let options = resolve_options(&ProviderSettings::default(), &file_config)?;

    println!("{}", Style::header("Configuration"));
    print_row("config file", manager.config_path().display());
    print_row("api_key", options.masked_api_key());
    print_row("model", Style::value(&options.model));
    print_row("max_tokens", options.max_tokens);
    print_row("base_url", &options.base_url);
    print_row("timeout", format!("{}s", options.request_timeout.as_secs()));
    print_row(
        "general_prompt",
        options.general_prompt.as_deref().unwrap_or("(none)"),
    );

    if !options.locale_map.is_empty() {
        println!("  {}", Style::label("locales"));
        let mut locales: Vec<_> = options.locale_map.iter().collect();
        locales.sort();
        for (code, name) in locales {
            println!("    {code} = {name}");
        }
    }

    Ok(())
}

fn print_row(label: &str, value: impl std::fmt::Display) {
    println!("  {}{value}", Style::label(format!("{label:<16}")));
}

fn write_starter(manager: &ConfigManager) -> Result<()> {
    let path = manager.config_path();
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    let starter = ConfigFile {
        openai: OpenAiSection {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            general_prompt: None,
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        },
        locales: HashMap::new(),
    };
    manager.save(&starter)?;

    println!("Wrote {}", path.display());
    println!(
        "{}",
        Style::hint("Set OPENAI_API_KEY in your environment to start translating.")
    );
    Ok(())
}

//! Usage report command handler.

use anyhow::Result;

use crate::config::{ConfigManager, ProviderSettings};
use crate::translation::{ChatGptProvider, NAME};
use crate::ui::Style;

/// Prints the provider's `{count, limit}` usage report.
pub async fn print_usage() -> Result<()> {
    let file_config = ConfigManager::new()?.load_or_default()?;
    let provider = ChatGptProvider::init(&ProviderSettings::default(), &file_config)?;
    let usage = provider.usage().await?;

    println!("{}", Style::header(format!("{NAME} usage")));
    println!("  {}  {}", Style::label("count"), Style::value(usage.count));
    println!("  {}  {}", Style::label("limit"), Style::value(usage.limit));
    println!(
        "{}",
        Style::hint("Usage is a fixed placeholder; no quota endpoint is queried.")
    );
    Ok(())
}

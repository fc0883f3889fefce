use anyhow::Result;

use crate::config::{ConfigManager, ProviderSettings};
use crate::input::InputReader;
use crate::translation::{ChatGptProvider, Format, SourceText, TranslationRequest};
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub file: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub format: Format,
    pub batch: bool,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub general_prompt: Option<String>,
    pub quiet: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let file_config = ConfigManager::new()?.load_or_default()?;

    let settings = ProviderSettings {
        model: options.model,
        max_tokens: options.max_tokens,
        general_prompt: options.general_prompt,
        ..Default::default()
    };
    let provider = ChatGptProvider::init(&settings, &file_config)?;

    let raw = InputReader::read(options.file.as_deref())?;
    let text = InputReader::to_source_text(&raw, options.batch)?;
    let item_count = match &text {
        SourceText::Many(items) => items.len(),
        _ => 1,
    };

    let request = TranslationRequest {
        text,
        priority: None,
        source_locale: options.from.unwrap_or_default(),
        target_locale: options.to.unwrap_or_default(),
        format: options.format,
    };

    let message = if item_count == 1 {
        "Translating...".to_string()
    } else {
        format!("Translating {item_count} items...")
    };
    let spinner = Spinner::new(&message, !options.quiet && !request.text.is_empty());

    let output = provider.translate(request).await;
    spinner.stop();

    println!("{}", output?);
    Ok(())
}

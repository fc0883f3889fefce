//! The translation provider: request validation, per-item prompting,
//! rate-limited dispatch and reply reconciliation.

use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::classify::{ClassifiedItem, ItemKind, classify, is_truthy, wrap_payload};
use super::client::{ChatMessage, CompletionClient, CompletionRequest, OpenAiClient, Usage};
use super::limiter::{Limiter, MAX_IN_FLIGHT};
use super::prompt::PromptSet;
use crate::config::{ConfigFile, ProviderOptions, ProviderSettings, resolve_options};
use crate::error::{Result, TranslateError};

/// Stable identifier of this provider.
pub const INDEX: &str = "chatgpt";

/// Display name of this provider.
pub const NAME: &str = "ChatGPT";

/// Declared format of the request text.
///
/// Items are classified by their content; the declared format is kept for
/// callers and logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Plain,
    EditorJs,
}

/// Text to translate: one string, a batch of strings, or any other JSON
/// value (an object, or a sequence that is not all strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    Single(String),
    Many(Vec<String>),
    Document(Value),
}

impl SourceText {
    /// True for `""`, `[]`, `null`, `false` and `0`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Many(items) => items.is_empty(),
            Self::Document(Value::Array(items)) => items.is_empty(),
            Self::Document(value) => !is_truthy(value),
        }
    }

    /// Splits into ordered items, and whether the input was a scalar.
    fn into_items(self) -> (Vec<Value>, bool) {
        match self {
            Self::Single(text) => (vec![Value::String(text)], true),
            Self::Document(Value::Array(items)) => (items, false),
            Self::Document(value) => (vec![value], true),
            Self::Many(items) => (items.into_iter().map(Value::String).collect(), false),
        }
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::Single(text.to_string())
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::Single(text)
    }
}

impl From<Vec<String>> for SourceText {
    fn from(items: Vec<String>) -> Self {
        Self::Many(items)
    }
}

/// One call to [`ChatGptProvider::translate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: SourceText,
    /// Reserved; accepted but not used for scheduling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default)]
    pub source_locale: String,
    #[serde(default)]
    pub target_locale: String,
    #[serde(default)]
    pub format: Format,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<SourceText>,
        source_locale: impl Into<String>,
        target_locale: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            priority: None,
            source_locale: source_locale.into(),
            target_locale: target_locale.into(),
            format: Format::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Result of a translate call, shaped like its input.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutput {
    Single(Value),
    Many(Vec<Value>),
}

impl TranslationOutput {
    fn empty() -> Self {
        Self::Single(Value::String(String::new()))
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Single(value) => value,
            Self::Many(values) => Value::Array(values),
        }
    }

    /// The single output as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(Value::String(text)) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for TranslationOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(Value::String(text)) => f.write_str(text),
            Self::Single(value) => write!(f, "{value}"),
            Self::Many(values) => write!(f, "{}", Value::Array(values.clone())),
        }
    }
}

/// Translates plain text and EditorJS documents through a chat-completion
/// backend, one completion call per item.
///
/// All calls made through one provider share a single limiter, so at most
/// [`MAX_IN_FLIGHT`] completion requests are outstanding at any time, even
/// across overlapping `translate` calls.
pub struct ChatGptProvider {
    options: ProviderOptions,
    client: Arc<dyn CompletionClient>,
    limiter: Limiter,
}

impl ChatGptProvider {
    /// Creates a provider backed by [`OpenAiClient`].
    pub fn new(options: ProviderOptions) -> Result<Self> {
        options.validate()?;
        let client = Arc::new(OpenAiClient::new(&options));
        Self::with_client(options, client)
    }

    /// Creates a provider backed by any completion client.
    pub fn with_client(options: ProviderOptions, client: Arc<dyn CompletionClient>) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            client,
            limiter: Limiter::new(MAX_IN_FLIGHT),
        })
    }

    /// Resolves options from `settings`, the environment and `file`, then
    /// creates an OpenAI-backed provider.
    pub fn init(settings: &ProviderSettings, file: &ConfigFile) -> Result<Self> {
        Self::new(resolve_options(settings, file)?)
    }

    pub const fn options(&self) -> &ProviderOptions {
        &self.options
    }

    pub const fn max_in_flight(&self) -> usize {
        self.limiter.max_in_flight()
    }

    pub async fn translate(&self, request: TranslationRequest) -> Result<TranslationOutput> {
        if request.text.is_empty() {
            return Ok(TranslationOutput::empty());
        }
        if request.source_locale.is_empty() {
            return Err(TranslateError::Validation(
                "source locale must be defined".to_string(),
            ));
        }
        if request.target_locale.is_empty() {
            return Err(TranslateError::Validation(
                "target locale must be defined".to_string(),
            ));
        }

        tracing::debug!(
            priority = ?request.priority,
            format = ?request.format,
            source = %request.source_locale,
            target = %request.target_locale,
            "translate request"
        );

        let prompts = PromptSet::new(
            self.options.locale_name(&request.source_locale),
            self.options.locale_name(&request.target_locale),
            self.options.general_prompt.as_deref(),
        );

        let (items, scalar) = request.text.into_items();
        let classified: Vec<ClassifiedItem> = items.iter().map(classify).collect();

        let outputs = try_join_all(
            classified
                .iter()
                .enumerate()
                .map(|(index, item)| self.translate_item(index, item, &prompts)),
        )
        .await?;

        if scalar {
            let output = outputs.into_iter().next().unwrap_or(Value::Null);
            Ok(TranslationOutput::Single(output))
        } else {
            Ok(TranslationOutput::Many(outputs))
        }
    }

    pub async fn usage(&self) -> Result<Usage> {
        self.client.usage().await
    }

    async fn translate_item(
        &self,
        index: usize,
        item: &ClassifiedItem,
        prompts: &PromptSet,
    ) -> Result<Value> {
        let (kind, content) = match item {
            ClassifiedItem::Plain(content) => (ItemKind::Plain, content),
            ClassifiedItem::EditorJs(doc) => (ItemKind::EditorJs, doc),
            ClassifiedItem::Unclassifiable { original, reason } => {
                return Ok(placeholder(index, original, reason));
            }
        };

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(prompts.system_prompt(kind)),
                ChatMessage::user(wrap_payload(kind, content)),
            ],
            max_tokens: self.options.max_tokens,
        };

        tracing::debug!(index, kind = kind.as_str(), "queueing completion");
        let reply = self.limiter.schedule(self.client.translate(request)).await?;
        reconcile(&reply)
    }
}

/// Unwraps a `{"type", "content"}` model reply into the caller's shape.
///
/// `plain` content is returned as-is; anything else is returned as the JSON
/// text of its content.
pub fn reconcile(reply: &str) -> Result<Value> {
    let parsed: Value = serde_json::from_str(reply)?;
    let content = parsed.get("content").cloned().unwrap_or(Value::Null);

    if parsed.get("type").and_then(Value::as_str) == Some("plain") {
        Ok(content)
    } else {
        Ok(Value::String(serde_json::to_string(&content)?))
    }
}

fn placeholder(index: usize, original: &Value, reason: &str) -> Value {
    tracing::warn!(index, %reason, "item left untranslated");
    original.clone()
}

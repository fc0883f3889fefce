//! Translation of plain text and EditorJS documents through chat completions.

mod classify;
mod client;
mod limiter;
mod prompt;
mod provider;

pub use classify::{ClassifiedItem, ItemKind, classify, is_editorjs, wrap_payload};
pub use client::{
    ChatMessage, CompletionClient, CompletionRequest, OpenAiClient, Role, Usage,
};
pub use limiter::{Limiter, MAX_IN_FLIGHT};
pub use prompt::{EDITORJS_PROMPT_TEMPLATE, PLAIN_PROMPT_TEMPLATE, PromptSet};
pub use provider::{
    ChatGptProvider, Format, INDEX, NAME, SourceText, TranslationOutput, TranslationRequest,
    reconcile,
};

//! System prompt templates for plain and EditorJS items.

use super::classify::ItemKind;

pub const PLAIN_PROMPT_TEMPLATE: &str =
    "Translate the key content in JSON from {source_locale} to {target_locale}.";

pub const EDITORJS_PROMPT_TEMPLATE: &str = "Translate the key content editorjs JSON object \
     from {source_locale} to {target_locale}, only translating text fields: \
     for \"paragraph\" it's \"text\", for \"header\" it's \"text\", \
     for \"list\" it's \"items\", for \"checklist\" it's \"items\", \
     for \"quote\" it's \"text\" and \"caption\", for \"table\" it's \"content\", \
     for \"image\" it's \"caption\", and for \"link_tool\" it's \"meta.title\" and \"meta.description\". \
     It is important to preserve the structure and leave all other fields untouched.";

/// System prompts for one translate call, keyed by item kind.
#[derive(Debug, Clone)]
pub struct PromptSet {
    plain: String,
    editorjs: String,
}

impl PromptSet {
    /// Fills both templates with the locale names and appends the general
    /// instruction, if any, after a blank line.
    #[allow(clippy::literal_string_with_formatting_args)]
    pub fn new(source_locale: &str, target_locale: &str, general_prompt: Option<&str>) -> Self {
        let fill = |template: &str| {
            let mut prompt = template
                .replace("{source_locale}", source_locale)
                .replace("{target_locale}", target_locale);
            if let Some(extra) = general_prompt.filter(|p| !p.is_empty()) {
                prompt.push_str("\n\n");
                prompt.push_str(extra);
            }
            prompt
        };

        Self {
            plain: fill(PLAIN_PROMPT_TEMPLATE),
            editorjs: fill(EDITORJS_PROMPT_TEMPLATE),
        }
    }

    pub fn system_prompt(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Plain => &self.plain,
            ItemKind::EditorJs => &self.editorjs,
        }
    }
}

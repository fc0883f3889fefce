//! Classification of input items into plain text or EditorJS documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which prompt template and wire wrapper an item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Plain,
    EditorJs,
}

impl ItemKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::EditorJs => "editorjs",
        }
    }
}

/// An input item after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedItem {
    /// Free text or a non-EditorJS object, sent to the model as-is.
    Plain(Value),
    /// A parsed EditorJS document.
    EditorJs(Value),
    /// A number, boolean, null or nested array: nothing to translate.
    ///
    /// It is never sent to the model; its output slot echoes `original`.
    Unclassifiable { original: Value, reason: String },
}

impl ClassifiedItem {
    /// The kind used for prompting, or `None` when the item is skipped.
    pub const fn kind(&self) -> Option<ItemKind> {
        match self {
            Self::Plain(_) => Some(ItemKind::Plain),
            Self::EditorJs(_) => Some(ItemKind::EditorJs),
            Self::Unclassifiable { .. } => None,
        }
    }
}

/// Serializes `content` as the `{"type", "content"}` wrapper the model
/// receives as its user message.
pub fn wrap_payload(kind: ItemKind, content: &Value) -> String {
    serde_json::json!({
        "type": kind.as_str(),
        "content": content,
    })
    .to_string()
}

/// Returns `true` if `value` has the EditorJS document shape: an object
/// with a `blocks` array and a truthy `version`.
pub fn is_editorjs(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let has_blocks = object.get("blocks").is_some_and(Value::is_array);
    let has_version = object.get("version").is_some_and(is_truthy);
    has_blocks && has_version
}

/// Classifies one item. Pure: the result depends on the content only.
pub fn classify(item: &Value) -> ClassifiedItem {
    match item {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) if is_editorjs(&parsed) => ClassifiedItem::EditorJs(parsed),
            _ => ClassifiedItem::Plain(item.clone()),
        },
        Value::Object(_) if is_editorjs(item) => ClassifiedItem::EditorJs(item.clone()),
        Value::Object(_) => ClassifiedItem::Plain(item.clone()),
        other => ClassifiedItem::Unclassifiable {
            original: other.clone(),
            reason: format!("expected a string or an object, got {}", type_name(other)),
        },
    }
}

/// JavaScript-style truthiness of a JSON value.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

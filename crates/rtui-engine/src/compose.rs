//! Content composition for the value pane.
//!
//! On top of [`render`], a value that is a JSON object (a string holding
//! one, or a hash) may carry source code in a reserved field. That field is
//! split out and shown in its own block while the rest of the object is
//! rendered as usual.

use rtui_types::{StoreValue, ValueTypeTag};
use serde::Serialize;

use crate::render::{RenderedValue, render, render_raw};

/// Reserved object field holding a source snippet.
pub const SOURCE_FIELD: &str = "code";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum SourceBlock {
    Code(Vec<String>),
    /// No source field; shown as a placeholder
    Empty,
}

impl SourceBlock {
    fn from_code(code: &str) -> Self {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            SourceBlock::Empty
        } else {
            SourceBlock::Code(trimmed.split('\n').map(str::to_string).collect())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SourceBlock::Empty)
    }
}

/// Everything the content pane shows for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentView {
    pub title: String,
    pub primary: RenderedValue,
    pub source: SourceBlock,
}

impl ContentView {
    /// Raw view: generic stringification, no source split.
    pub fn raw(key: &str, value: &StoreValue) -> Self {
        Self {
            title: title_for(key),
            primary: render_raw(value),
            source: SourceBlock::Empty,
        }
    }
}

pub fn title_for(key: &str) -> String {
    format!("Data for {}", key)
}

/// Compose the content pane for `key`.
pub fn compose(key: &str, value: &StoreValue, tag: &ValueTypeTag) -> ContentView {
    let (primary, source) = match value {
        StoreValue::Text(text) => {
            split_json_object(text).unwrap_or_else(|| (render(value, tag), SourceBlock::Empty))
        }
        StoreValue::Pairs(pairs) => split_pairs(pairs, tag)
            .unwrap_or_else(|| (render(value, tag), SourceBlock::Empty)),
        _ => (render(value, tag), SourceBlock::Empty),
    };

    ContentView {
        title: title_for(key),
        primary,
        source,
    }
}

fn split_json_object(text: &str) -> Option<(RenderedValue, SourceBlock)> {
    let parsed: serde_json::Value = serde_json::from_str(text).ok()?;
    let serde_json::Value::Object(mut object) = parsed else {
        return None;
    };

    let source = match object.get(SOURCE_FIELD) {
        Some(serde_json::Value::String(code)) => {
            let block = SourceBlock::from_code(code);
            object.shift_remove(SOURCE_FIELD);
            block
        }
        _ => SourceBlock::Empty,
    };

    let pretty = serde_json::to_string_pretty(&serde_json::Value::Object(object)).ok()?;
    Some((RenderedValue::json(&pretty), source))
}

fn split_pairs(pairs: &[(String, String)], tag: &ValueTypeTag) -> Option<(RenderedValue, SourceBlock)> {
    let code = pairs
        .iter()
        .find(|(field, _)| field == SOURCE_FIELD)
        .map(|(_, code)| code)?;

    let rest: Vec<(String, String)> = pairs
        .iter()
        .filter(|(field, _)| field != SOURCE_FIELD)
        .cloned()
        .collect();

    Some((
        render(&StoreValue::Pairs(rest), tag),
        SourceBlock::from_code(code),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderKind;

    #[test]
    fn test_code_field_is_split_out() {
        let value = StoreValue::text(r#"{"name":"KeyTree","code":"  fn main() {\n}\n"}"#);
        let view = compose("code:key_tree", &value, &ValueTypeTag::String);
        assert_eq!(view.title, "Data for code:key_tree");
        assert_eq!(view.primary.kind, RenderKind::Json);
        assert_eq!(view.primary.text(), "{\n  \"name\": \"KeyTree\"\n}");
        assert_eq!(
            view.source,
            SourceBlock::Code(vec!["fn main() {".to_string(), "}".to_string()])
        );
    }

    #[test]
    fn test_object_without_code_has_empty_source() {
        let value = StoreValue::text(r#"{"a":1}"#);
        let view = compose("k", &value, &ValueTypeTag::String);
        assert_eq!(view.primary.text(), "{\n  \"a\": 1\n}");
        assert!(view.source.is_empty());
    }

    #[test]
    fn test_non_string_code_field_stays_in_object() {
        let value = StoreValue::text(r#"{"code":42}"#);
        let view = compose("k", &value, &ValueTypeTag::String);
        assert_eq!(view.primary.text(), "{\n  \"code\": 42\n}");
        assert!(view.source.is_empty());
    }

    #[test]
    fn test_json_array_uses_tag_rendering() {
        let value = StoreValue::text("[1,2]");
        let view = compose("k", &value, &ValueTypeTag::String);
        assert_eq!(view.primary.text(), "[\n  1,\n  2\n]");
        assert!(view.source.is_empty());
    }

    #[test]
    fn test_plain_string_passes_through() {
        let view = compose("k", &StoreValue::text("hello"), &ValueTypeTag::String);
        assert_eq!(view.primary.text(), "hello");
        assert!(view.source.is_empty());
    }

    #[test]
    fn test_hash_code_field_is_split_out() {
        let value = StoreValue::pairs([("name", "snippet"), ("code", "print(1)")]);
        let view = compose("k", &value, &ValueTypeTag::Hash);
        assert_eq!(view.primary.lines, vec!["name: snippet"]);
        assert_eq!(view.source, SourceBlock::Code(vec!["print(1)".to_string()]));
    }

    #[test]
    fn test_empty_code_renders_placeholder() {
        let value = StoreValue::text(r#"{"code":"   "}"#);
        let view = compose("k", &value, &ValueTypeTag::String);
        assert_eq!(view.primary.text(), "{}");
        assert!(view.source.is_empty());
    }

    #[test]
    fn test_raw_view() {
        let value = StoreValue::pairs([("name", "John Doe")]);
        let view = ContentView::raw("user:1", &value);
        assert_eq!(view.primary.text(), r#"{"name":"John Doe"}"#);
    }

    #[test]
    fn test_raw_view_of_json_string_skips_source_split() {
        let text = r#"{"name":"KeyTree","code":"fn main() {}"}"#;
        let view = ContentView::raw("code:key_tree", &StoreValue::text(text));
        assert_eq!(view.primary.text(), text);
        assert!(view.source.is_empty());
    }
}

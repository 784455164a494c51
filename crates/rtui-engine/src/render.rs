//! Type-dispatched value rendering.
//!
//! `render` maps a fetched value and its type tag to display lines. String
//! values are speculatively decoded as JSON and pretty-printed when that
//! succeeds; anything that cannot be formatted for its tag becomes an
//! in-place error message rather than a failure of the call.

use rtui_types::{ScoredMember, StoreValue, ValueTypeTag};
use serde::Serialize;

/// How the lines of a [`RenderedValue`] should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    /// Pretty-printed JSON, eligible for syntax highlighting
    Json,
    Plain,
    /// The value was malformed; lines hold the message
    Error,
}

/// Display form of a value, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedValue {
    pub kind: RenderKind,
    pub lines: Vec<String>,
    /// True when no type-specific formatter matched the tag
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl RenderedValue {
    /// Plain text split on `\n`, so that [`text`](Self::text) returns it unchanged.
    pub fn plain(text: &str) -> Self {
        Self::from_text(RenderKind::Plain, text)
    }

    pub fn json(text: &str) -> Self {
        Self::from_text(RenderKind::Json, text)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: RenderKind::Error,
            lines: vec![message.into()],
            fallback: false,
        }
    }

    fn from_text(kind: RenderKind, text: &str) -> Self {
        Self {
            kind,
            lines: text.split('\n').map(str::to_string).collect(),
            fallback: false,
        }
    }

    fn from_lines(lines: Vec<String>) -> Self {
        Self {
            kind: RenderKind::Plain,
            lines,
            fallback: false,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_error(&self) -> bool {
        self.kind == RenderKind::Error
    }

    /// Whether a formatter specific to the type tag produced this value.
    pub fn matched_formatter(&self) -> bool {
        !self.fallback
    }
}

/// Render a value according to its type tag.
pub fn render(value: &StoreValue, tag: &ValueTypeTag) -> RenderedValue {
    match (tag, value) {
        (_, StoreValue::Nil) => RenderedValue::plain("(nil)"),
        (ValueTypeTag::String, StoreValue::Text(text)) => render_text(text),
        (ValueTypeTag::Hash, StoreValue::Pairs(pairs)) => render_pairs(pairs),
        (ValueTypeTag::List | ValueTypeTag::Set, StoreValue::Items(items)) => {
            RenderedValue::from_lines(items.clone())
        }
        (ValueTypeTag::OrderedSet, StoreValue::Scored(members)) => render_scored(members),
        (ValueTypeTag::None | ValueTypeTag::Unknown(_), _) => {
            let mut rendered = render_raw(value);
            rendered.fallback = true;
            rendered
        }
        (tag, value) => RenderedValue::error(format!(
            "Malformed {} value: expected {}, got {}",
            tag,
            expected_shape(tag),
            value.shape_name()
        )),
    }
}

/// Generic stringification of a value, independent of its tag.
pub fn render_raw(value: &StoreValue) -> RenderedValue {
    match value.to_raw_string() {
        Ok(raw) => RenderedValue::plain(&raw),
        Err(err) => RenderedValue::error(format!("Unable to stringify value: {}", err)),
    }
}

/// Pretty-print JSON text with 2-space indentation, or `None` when the
/// text is not JSON.
pub fn pretty_json(text: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&parsed).ok()
}

fn render_text(text: &str) -> RenderedValue {
    match pretty_json(text) {
        Some(pretty) => RenderedValue::json(&pretty),
        None => RenderedValue::plain(text),
    }
}

fn render_pairs(pairs: &[(String, String)]) -> RenderedValue {
    RenderedValue::from_lines(
        pairs
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect(),
    )
}

fn render_scored(members: &[ScoredMember]) -> RenderedValue {
    let mut lines = Vec::with_capacity(members.len());
    for entry in members {
        match entry.score {
            Some(score) => lines.push(format!("{}: {}", entry.member, format_score(score))),
            None => {
                return RenderedValue::error(format!(
                    "Malformed zset value: member '{}' has no score",
                    entry.member
                ));
            }
        }
    }
    RenderedValue::from_lines(lines)
}

/// Shortest round-trip form of a score. Integral scores keep a decimal
/// point (`1.0`); very large or small ones use a signed two-digit exponent
/// (`1e+16`, `1e-05`).
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", score);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

fn expected_shape(tag: &ValueTypeTag) -> &'static str {
    match tag {
        ValueTypeTag::String => "text",
        ValueTypeTag::Hash => "field map",
        ValueTypeTag::List | ValueTypeTag::Set => "sequence",
        ValueTypeTag::OrderedSet => "scored sequence",
        ValueTypeTag::None | ValueTypeTag::Unknown(_) => "any",
    }
}

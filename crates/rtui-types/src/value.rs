use serde::ser::{SerializeMap, SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type tag attached to every stored value.
///
/// Mirrors the type names returned by the store's `TYPE` command. Names the
/// renderer has no formatter for are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueTypeTag {
    String,
    Hash,
    List,
    Set,
    OrderedSet,
    /// The key does not exist
    None,
    Unknown(String),
}

impl ValueTypeTag {
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => ValueTypeTag::String,
            "hash" => ValueTypeTag::Hash,
            "list" => ValueTypeTag::List,
            "set" => ValueTypeTag::Set,
            "zset" => ValueTypeTag::OrderedSet,
            "none" => ValueTypeTag::None,
            _ => ValueTypeTag::Unknown(name.to_string()),
        }
    }

    pub fn as_type_name(&self) -> &str {
        match self {
            ValueTypeTag::String => "string",
            ValueTypeTag::Hash => "hash",
            ValueTypeTag::List => "list",
            ValueTypeTag::Set => "set",
            ValueTypeTag::OrderedSet => "zset",
            ValueTypeTag::None => "none",
            ValueTypeTag::Unknown(name) => name,
        }
    }
}

impl FromStr for ValueTypeTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ValueTypeTag::from_type_name(s))
    }
}

impl fmt::Display for ValueTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_type_name())
    }
}

impl Serialize for ValueTypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_type_name())
    }
}

/// One member of an ordered set together with its score.
///
/// The score is optional so that a reply missing it can still be carried
/// to the renderer and reported there instead of failing the fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMember {
    pub member: String,
    pub score: Option<f64>,
}

impl ScoredMember {
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score: Some(score),
        }
    }

    pub fn without_score(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            score: None,
        }
    }
}

impl Serialize for ScoredMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.member)?;
        tuple.serialize_element(&self.score)?;
        tuple.end()
    }
}

/// A value fetched from the store, in one of the shapes the store can return.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Nil,
    /// String value
    Text(String),
    /// Hash fields in the order the store returned them
    Pairs(Vec<(String, String)>),
    /// List elements or set members
    Items(Vec<String>),
    /// Ordered-set members in ascending score order
    Scored(Vec<ScoredMember>),
}

impl StoreValue {
    pub fn text(value: impl Into<String>) -> Self {
        StoreValue::Text(value.into())
    }

    pub fn pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        StoreValue::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn items<T: Into<String>>(items: impl IntoIterator<Item = T>) -> Self {
        StoreValue::Items(items.into_iter().map(Into::into).collect())
    }

    pub fn scored<M: Into<String>>(members: impl IntoIterator<Item = (M, f64)>) -> Self {
        StoreValue::Scored(
            members
                .into_iter()
                .map(|(m, s)| ScoredMember::new(m, s))
                .collect(),
        )
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, StoreValue::Nil)
    }

    /// Name of the shape, used in diagnostics when tag and shape disagree.
    pub fn shape_name(&self) -> &'static str {
        match self {
            StoreValue::Nil => "nil",
            StoreValue::Text(_) => "text",
            StoreValue::Pairs(_) => "field map",
            StoreValue::Items(_) => "sequence",
            StoreValue::Scored(_) => "scored sequence",
        }
    }

    /// Compact JSON form of the value.
    pub fn to_raw_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Generic string conversion used by the raw view. Text is shown as is;
    /// containers use their compact JSON form.
    pub fn to_raw_string(&self) -> crate::Result<String> {
        match self {
            StoreValue::Text(text) => Ok(text.clone()),
            _ => self.to_raw_json(),
        }
    }
}

impl Serialize for StoreValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StoreValue::Nil => serializer.serialize_none(),
            StoreValue::Text(text) => serializer.serialize_str(text),
            StoreValue::Pairs(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (field, value) in pairs {
                    map.serialize_entry(field, value)?;
                }
                map.end()
            }
            StoreValue::Items(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StoreValue::Scored(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(member)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_from_store_names() {
        assert_eq!(ValueTypeTag::from_type_name("string"), ValueTypeTag::String);
        assert_eq!(ValueTypeTag::from_type_name("hash"), ValueTypeTag::Hash);
        assert_eq!(ValueTypeTag::from_type_name("list"), ValueTypeTag::List);
        assert_eq!(ValueTypeTag::from_type_name("set"), ValueTypeTag::Set);
        assert_eq!(ValueTypeTag::from_type_name("zset"), ValueTypeTag::OrderedSet);
        assert_eq!(ValueTypeTag::from_type_name("none"), ValueTypeTag::None);
        assert_eq!(
            ValueTypeTag::from_type_name("stream"),
            ValueTypeTag::Unknown("stream".to_string())
        );
    }

    #[test]
    fn test_type_tag_display_round_trips_store_name() {
        for name in ["string", "hash", "list", "set", "zset", "none", "ReJSON-RL"] {
            assert_eq!(ValueTypeTag::from_type_name(name).to_string(), name);
        }
    }

    #[test]
    fn test_raw_json_keeps_hash_field_order() {
        let value = StoreValue::pairs([("name", "John Doe"), ("email", "john@example.com")]);
        assert_eq!(
            value.to_raw_json().unwrap(),
            r#"{"name":"John Doe","email":"john@example.com"}"#
        );
    }

    #[test]
    fn test_raw_json_shapes() {
        assert_eq!(StoreValue::Nil.to_raw_json().unwrap(), "null");
        assert_eq!(StoreValue::text("hi").to_raw_json().unwrap(), r#""hi""#);
        assert_eq!(
            StoreValue::items(["a", "b"]).to_raw_json().unwrap(),
            r#"["a","b"]"#
        );
        assert_eq!(
            StoreValue::scored([("m1", 1.0)]).to_raw_json().unwrap(),
            r#"[["m1",1.0]]"#
        );
        assert_eq!(
            StoreValue::Scored(vec![ScoredMember::without_score("m1")])
                .to_raw_json()
                .unwrap(),
            r#"[["m1",null]]"#
        );
    }

    #[test]
    fn test_raw_string_leaves_text_unquoted() {
        let text = StoreValue::text("hello\nworld");
        assert_eq!(text.to_raw_string().unwrap(), "hello\nworld");
        assert_eq!(
            StoreValue::items(["a"]).to_raw_string().unwrap(),
            r#"["a"]"#
        );
    }
}

use rtui_engine::{ContentView, HierarchyNode};
use rtui_types::{Ttl, ValueTypeTag};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct KeyListViewModel {
    pub pattern: String,
    pub keys: Vec<String>,
    #[serde(skip)]
    pub tree: HierarchyNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueViewModel {
    pub key: String,
    #[serde(rename = "type")]
    pub tag: ValueTypeTag,
    pub ttl: Ttl,
    #[serde(flatten)]
    pub content: ContentView,
}

#[derive(Debug, Clone, Serialize)]
pub struct TtlViewModel {
    pub key: String,
    pub ttl: Ttl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Expire,
    Delete,
}

#[derive(Debug, Clone, Serialize)]
pub struct MutationViewModel {
    pub action: MutationKind,
    pub key: String,
    /// False when the key did not exist
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedViewModel {
    pub store: String,
    pub keys_written: usize,
}

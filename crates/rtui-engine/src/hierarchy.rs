//! Key hierarchy construction.
//!
//! Keys such as `user:1000:profile` are split on a delimiter and inserted
//! into a prefix trie. A node is a leaf when some key ends at it; it may
//! be a leaf and a branch at the same time (`user:1000` next to
//! `user:1000:profile`), and both roles are kept.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Delimiter used by convention in Redis keyspaces.
pub const DEFAULT_DELIMITER: &str = ":";

/// One segment position in the tree built from a key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_key: Option<String>,
    #[serde(
        serialize_with = "serialize_children",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    children: BTreeMap<String, HierarchyNode>,
}

impl HierarchyNode {
    /// An empty, unlabeled root.
    pub fn root() -> Self {
        Self::default()
    }

    fn branch(label: &str) -> Self {
        Self {
            label: label.to_string(),
            full_key: None,
            children: BTreeMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Original key that terminates at this node, if any.
    pub fn full_key(&self) -> Option<&str> {
        self.full_key.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.full_key.is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_dual_role(&self) -> bool {
        self.is_leaf() && self.has_children()
    }

    /// Children in ascending label order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &HierarchyNode> {
        self.children.values()
    }

    pub fn child(&self, label: &str) -> Option<&HierarchyNode> {
        self.children.get(label)
    }

    /// Number of keys terminating in this subtree, this node included.
    pub fn leaf_count(&self) -> usize {
        let own = usize::from(self.is_leaf());
        own + self.children.values().map(|c| c.leaf_count()).sum::<usize>()
    }

    /// Node reached by descending along the segments of `key`.
    pub fn find(&self, key: &str, delimiter: &str) -> Option<&HierarchyNode> {
        split_key(key, delimiter)
            .into_iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// All leaf nodes in depth-first, label order.
    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a HierarchyNode>) {
        if self.is_leaf() {
            out.push(self);
        }
        for child in self.children.values() {
            child.collect_leaves(out);
        }
    }

    fn insert(&mut self, key: &str, delimiter: &str) {
        let mut node = self;
        for segment in split_key(key, delimiter) {
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| HierarchyNode::branch(segment));
        }
        node.full_key = Some(key.to_string());
    }
}

fn serialize_children<S: Serializer>(
    children: &BTreeMap<String, HierarchyNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(children.values())
}

/// Split a key into its segments. Always yields at least one segment;
/// an empty delimiter never splits.
pub fn split_key<'a>(key: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![key];
    }
    key.split(delimiter).collect()
}

/// Groups flat keys into a [`HierarchyNode`] tree.
#[derive(Debug, Clone)]
pub struct KeyHierarchyBuilder {
    delimiter: String,
}

impl KeyHierarchyBuilder {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn build<I, S>(&self, keys: I) -> HierarchyNode
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = HierarchyNode::root();
        for key in keys {
            root.insert(key.as_ref(), &self.delimiter);
        }
        root
    }
}

impl Default for KeyHierarchyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

// Engine module - pure core of rtui (no I/O)
// Sits between store values (types) and the CLI presentation layer

pub mod compose;
pub mod hierarchy;
pub mod outline;
pub mod render;

pub use compose::{ContentView, SOURCE_FIELD, SourceBlock, compose};
pub use hierarchy::{DEFAULT_DELIMITER, HierarchyNode, KeyHierarchyBuilder, split_key};
pub use outline::{display_label, node_badge, outline};
pub use render::{RenderKind, RenderedValue, format_score, pretty_json, render, render_raw};

// Façade API - stable entry points for the CLI layer

/// Group flat keys into an ordered tree by delimiter-separated segments
pub fn build_hierarchy<I, S>(keys: I, delimiter: &str) -> HierarchyNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    KeyHierarchyBuilder::new(delimiter).build(keys)
}

pub mod highlight;

pub use highlight::{DEFAULT_SOURCE_SYNTAX, Highlighter, JSON_SYNTAX, Segment};

use crate::hierarchy::HierarchyNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Box-drawing outline of a key tree, one line per node.
///
/// Branches carry the number of keys below them; a node that is itself a
/// key is marked with `*`.
pub fn outline(root: &HierarchyNode) -> Vec<String> {
    let mut lines = Vec::new();
    let count = root.children().len();
    for (idx, child) in root.children().enumerate() {
        write_node(child, "", idx + 1 == count, &mut lines);
    }
    lines
}

/// Display label for a node; empty segments are shown as `""`.
pub fn display_label(node: &HierarchyNode) -> String {
    if node.label().is_empty() {
        "\"\"".to_string()
    } else {
        node.label().to_string()
    }
}

/// Suffix shown after a label: `*` for keys, `(n)` for branches.
pub fn node_badge(node: &HierarchyNode) -> String {
    match (node.is_leaf(), node.has_children()) {
        (true, true) => format!(" * ({})", node.leaf_count()),
        (false, true) => format!(" ({})", node.leaf_count()),
        (true, false) | (false, false) => String::new(),
    }
}

fn write_node(node: &HierarchyNode, prefix: &str, last: bool, lines: &mut Vec<String>) {
    let connector = if last { LAST_BRANCH } else { BRANCH };
    lines.push(format!(
        "{}{}{}{}",
        prefix,
        connector,
        display_label(node),
        node_badge(node)
    ));

    let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
    let count = node.children().len();
    for (idx, child) in node.children().enumerate() {
        write_node(child, &child_prefix, idx + 1 == count, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::KeyHierarchyBuilder;

    #[test]
    fn test_outline_marks_dual_role() {
        let root = KeyHierarchyBuilder::default().build(["a", "a:b", "c"]);
        let text = outline(&root).join("\n");
        insta::assert_snapshot!(text, @r"
        ├── a * (2)
        │   └── b
        └── c
        ");
    }

    #[test]
    fn test_outline_empty_tree() {
        let root = KeyHierarchyBuilder::default().build(Vec::<&str>::new());
        assert!(outline(&root).is_empty());
    }

    #[test]
    fn test_outline_empty_label() {
        let root = KeyHierarchyBuilder::default().build([":x"]);
        assert_eq!(outline(&root), vec!["└── \"\" (1)", "    └── x"]);
    }
}

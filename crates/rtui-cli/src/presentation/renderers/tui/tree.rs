//! Navigable view over a key hierarchy: which branches are open, which row
//! the cursor is on, and the flattened rows that result.

use rtui_engine::{HierarchyNode, display_label, node_badge};
use std::collections::HashSet;

/// Labels from the root down to a node; identifies a node across rebuilds.
type NodePath = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeRow {
    pub depth: usize,
    pub label: String,
    pub badge: String,
    pub full_key: Option<String>,
    pub has_children: bool,
    pub expanded: bool,
    path: NodePath,
}

#[derive(Debug, Default)]
pub(crate) struct KeyTreeState {
    root: HierarchyNode,
    expanded: HashSet<NodePath>,
    rows: Vec<TreeRow>,
    cursor: usize,
}

impl KeyTreeState {
    pub fn new(root: HierarchyNode) -> Self {
        let mut state = Self {
            root,
            ..Self::default()
        };
        state.rebuild_rows();
        state
    }

    /// Swap in a freshly built tree, keeping open branches and the cursor
    /// position where the nodes still exist.
    pub fn replace(&mut self, root: HierarchyNode) {
        let selected = self.selected().map(|row| row.path.clone());
        self.root = root;
        self.rebuild_rows();
        self.cursor = selected
            .and_then(|path| self.rows.iter().position(|row| row.path == path))
            .unwrap_or(0)
            .min(self.rows.len().saturating_sub(1));
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&TreeRow> {
        self.rows.get(self.cursor)
    }

    pub fn key_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn move_down(&mut self, steps: usize) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + steps).min(self.rows.len() - 1);
        }
    }

    pub fn move_up(&mut self, steps: usize) {
        self.cursor = self.cursor.saturating_sub(steps);
    }

    pub fn expand(&mut self) {
        if let Some(row) = self.selected().filter(|r| r.has_children && !r.expanded) {
            let path = row.path.clone();
            self.expanded.insert(path);
            self.rebuild_rows();
        }
    }

    /// Close the selected branch; on a closed branch or a leaf, jump to the parent.
    pub fn collapse(&mut self) {
        let Some(row) = self.selected() else {
            return;
        };
        if row.expanded {
            let path = row.path.clone();
            self.expanded.remove(&path);
            self.rebuild_rows();
            return;
        }
        let parent = row.path[..row.path.len() - 1].to_vec();
        if let Some(pos) = self.rows.iter().position(|r| r.path == parent) {
            self.cursor = pos;
        }
    }

    pub fn toggle(&mut self) {
        let Some((expanded, has_children)) = self.selected().map(|r| (r.expanded, r.has_children))
        else {
            return;
        };
        if expanded {
            self.collapse();
        } else if has_children {
            self.expand();
        }
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        for child in self.root.children() {
            collect_rows(child, 0, &mut path, &self.expanded, &mut rows);
        }
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }
}

fn collect_rows(
    node: &HierarchyNode,
    depth: usize,
    path: &mut NodePath,
    expanded: &HashSet<NodePath>,
    rows: &mut Vec<TreeRow>,
) {
    path.push(node.label().to_string());
    let is_open = node.has_children() && expanded.contains(path.as_slice());

    rows.push(TreeRow {
        depth,
        label: display_label(node),
        badge: node_badge(node),
        full_key: node.full_key().map(str::to_string),
        has_children: node.has_children(),
        expanded: is_open,
        path: path.clone(),
    });

    if is_open {
        for child in node.children() {
            collect_rows(child, depth + 1, path, expanded, rows);
        }
    }
    path.pop();
}

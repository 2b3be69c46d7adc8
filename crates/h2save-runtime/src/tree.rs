//! Collapsible tree built from a JSON document.

use serde_json::Value;
use std::fmt;
use std::ops::ControlFlow;

/// What a node holds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Object,
    Array,
    /// A scalar rendered as JSON (`"text"`, `3.0`, `true`, `null`).
    Leaf(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Object key or array index; `None` for the root.
    pub key: Option<String>,
    pub kind: NodeKind,
    pub expanded: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_value(key: Option<String>, value: &Value) -> Self {
        let (kind, children) = match value {
            Value::Object(map) => (
                NodeKind::Object,
                map.iter()
                    .map(|(k, v)| TreeNode::from_value(Some(k.clone()), v))
                    .collect(),
            ),
            Value::Array(items) => (
                NodeKind::Array,
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| TreeNode::from_value(Some(i.to_string()), v))
                    .collect(),
            ),
            scalar => (NodeKind::Leaf(scalar.to_string()), Vec::new()),
        };

        Self {
            key,
            kind,
            expanded: false,
            children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// One-line rendering, e.g. `Flags {2}`, `Boons [3]`, `Hero: "Melinoe"`.
    pub fn label(&self) -> String {
        let key = self.key.as_deref().unwrap_or("root");
        match &self.kind {
            NodeKind::Object => format!("{} {{{}}}", key, self.children.len()),
            NodeKind::Array => format!("{} [{}]", key, self.children.len()),
            NodeKind::Leaf(value) => format!("{}: {}", key, value),
        }
    }
}

/// Index path from the root; the root itself is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for index in &self.0 {
            write!(f, ".{}", index)?;
        }
        Ok(())
    }
}

/// A row of the tree as currently visible.
#[derive(Debug)]
pub struct FlatRow<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
    pub path: NodePath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonTree {
    root: TreeNode,
}

impl JsonTree {
    /// Parse `json` into a tree showing only the root's direct children.
    ///
    /// Input nested deeper than serde_json's limit of 128 levels is rejected.
    /// The default decoder never nests past `h2save_format::MAX_TABLE_DEPTH`.
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let mut root = TreeNode::from_value(None, value);
        root.expanded = true;
        Self { root }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn node(&self, path: &NodePath) -> Option<&TreeNode> {
        path.indices()
            .iter()
            .try_fold(&self.root, |node, &index| node.children.get(index))
    }

    fn node_mut(&mut self, path: &NodePath) -> Option<&mut TreeNode> {
        path.indices()
            .iter()
            .try_fold(&mut self.root, |node, &index| node.children.get_mut(index))
    }

    /// Pre-order walk with depth; `Break` stops early.
    pub fn visit<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&TreeNode, usize) -> ControlFlow<B>,
    {
        fn walk<B, F>(node: &TreeNode, depth: usize, f: &mut F) -> ControlFlow<B>
        where
            F: FnMut(&TreeNode, usize) -> ControlFlow<B>,
        {
            f(node, depth)?;
            for child in &node.children {
                walk(child, depth + 1, f)?;
            }
            ControlFlow::Continue(())
        }

        walk(&self.root, 0, &mut f)
    }

    fn for_each_mut(&mut self, mut f: impl FnMut(&mut TreeNode)) {
        fn walk(node: &mut TreeNode, f: &mut impl FnMut(&mut TreeNode)) {
            f(node);
            for child in &mut node.children {
                walk(child, f);
            }
        }

        walk(&mut self.root, &mut f);
    }

    /// Rows reachable through expanded nodes, in display order.
    pub fn visible_rows(&self) -> Vec<FlatRow<'_>> {
        fn flatten<'a>(node: &'a TreeNode, path: NodePath, rows: &mut Vec<FlatRow<'a>>) {
            let expanded = node.expanded;
            rows.push(FlatRow {
                node,
                depth: path.depth(),
                path: path.clone(),
            });
            if expanded {
                for (index, child) in node.children.iter().enumerate() {
                    flatten(child, path.child(index), rows);
                }
            }
        }

        let mut rows = Vec::new();
        flatten(&self.root, NodePath::root(), &mut rows);
        rows
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let _ = self.visit(|_, _| {
            count += 1;
            ControlFlow::<()>::Continue(())
        });
        count
    }

    pub fn expand_all(&mut self) {
        self.for_each_mut(|node| node.expanded = node.has_children() || node.key.is_none());
    }

    pub fn collapse_all(&mut self) {
        self.for_each_mut(|node| node.expanded = false);
    }

    /// Flip one node. Returns `false` when `path` names nothing or a leaf.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        match self.node_mut(path) {
            Some(node) if node.has_children() => {
                node.expanded = !node.expanded;
                true
            }
            _ => false,
        }
    }

    /// Indented outline of the visible rows, one per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for row in self.visible_rows() {
            let marker = match (row.node.has_children(), row.node.expanded) {
                (false, _) => "  ",
                (true, true) => "- ",
                (true, false) => "+ ",
            };
            out.push_str(&"  ".repeat(row.depth));
            out.push_str(marker);
            out.push_str(&row.node.label());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"GameState":{"Flags":{"Hard":false},"_Version":3.0},"Boons":["Zeus","Hera"],"Hero":"Melinoe"}"#;

    #[test]
    fn test_parse_shows_top_level_only() {
        let tree = JsonTree::parse(SAMPLE).unwrap();
        let labels: Vec<String> = tree.visible_rows().iter().map(|r| r.node.label()).collect();
        assert_eq!(
            labels,
            vec!["root {3}", "GameState {2}", "Boons [2]", "Hero: \"Melinoe\""]
        );
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(JsonTree::parse("{\"open\": ").is_err());
    }

    #[test]
    fn test_expand_all_and_collapse_all_are_idempotent() {
        let mut tree = JsonTree::parse(SAMPLE).unwrap();

        tree.expand_all();
        let expanded = tree.clone();
        tree.expand_all();
        assert_eq!(tree, expanded);
        assert_eq!(tree.visible_rows().len(), tree.node_count());

        tree.collapse_all();
        let collapsed = tree.clone();
        tree.collapse_all();
        assert_eq!(tree, collapsed);
        assert_eq!(tree.visible_rows().len(), 1);
    }

    #[test]
    fn test_toggle_single_node() {
        let mut tree = JsonTree::parse(SAMPLE).unwrap();
        let game_state = NodePath::from(vec![0]);

        assert!(tree.toggle(&game_state));
        assert!(tree.node(&game_state).unwrap().expanded);
        assert_eq!(tree.visible_rows().len(), 6);
        assert!(tree.toggle(&game_state));
        assert_eq!(tree.visible_rows().len(), 4);

        assert!(!tree.toggle(&NodePath::from(vec![2])));
        assert!(!tree.toggle(&NodePath::from(vec![9, 9])));
    }

    #[test]
    fn test_visit_stops_on_break() {
        let tree = JsonTree::parse(SAMPLE).unwrap();
        let found = tree.visit(|node, depth| {
            if node.key.as_deref() == Some("Hard") {
                ControlFlow::Break(depth)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(found, ControlFlow::Break(3));
    }

    #[test]
    fn test_outline_marks_folds() {
        let mut tree = JsonTree::parse(SAMPLE).unwrap();
        tree.toggle(&NodePath::from(vec![1]));
        assert_eq!(
            tree.outline(),
            "- root {3}\n  + GameState {2}\n  - Boons [2]\n      0: \"Zeus\"\n      1: \"Hera\"\n    Hero: \"Melinoe\"\n"
        );
    }

    #[test]
    fn test_scalar_document_is_single_leaf() {
        let tree = JsonTree::parse("42").unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().label(), "root: 42");
    }
}

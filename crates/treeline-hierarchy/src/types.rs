//! Node, snapshot and tree types.
//!
//! All types derive `Serialize`/`Deserialize`; [`TreeNode`] serialises to
//! the `{name, description, children}` shape the HTTP API returns.

use serde::{Deserialize, Serialize};

// ============================================================================
// Stored data
// ============================================================================

/// The stored attributes of one node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeData {
    /// Unique node name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl NodeData {
    /// Create node data from a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One row of a snapshot: a node and the nodes it points at with
/// `HAS_CHILD`.
///
/// Children are shallow references; their own children come from their
/// own records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// The node itself.
    pub node: NodeData,
    /// Its immediate children, in store order.
    #[serde(default)]
    pub children: Vec<NodeData>,
}

impl SnapshotRecord {
    /// Create a record with no children.
    pub fn leaf(node: NodeData) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Create a record with the given children.
    pub fn new(node: NodeData, children: Vec<NodeData>) -> Self {
        Self { node, children }
    }
}

// ============================================================================
// Reconstructed trees
// ============================================================================

/// A node with its nested subtree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Node name.
    pub name: String,
    /// Node description.
    pub description: String,
    /// Child subtrees in natural name order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a tree node without children.
    pub fn leaf(data: &NodeData) -> Self {
        Self {
            name: data.name.clone(),
            description: data.description.clone(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Find a node by name anywhere in this subtree (pre-order).
    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Names of this subtree in pre-order.
    pub fn names_depth_first(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.node_count());
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            names.push(node.name.as_str());
            stack.extend(node.children.iter().rev());
        }
        names
    }

    /// Names of the immediate children, in order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Total number of nodes across a forest.
pub fn forest_size(forest: &[TreeNode]) -> usize {
    forest.iter().map(TreeNode::node_count).sum()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode {
            name: "A".into(),
            description: "root".into(),
            children: vec![
                TreeNode {
                    name: "B".into(),
                    description: "b".into(),
                    children: vec![TreeNode::leaf(&NodeData::new("B-1", "b1"))],
                },
                TreeNode::leaf(&NodeData::new("C", "c")),
            ],
        }
    }

    #[test]
    fn test_node_count_and_depth() {
        let tree = sample();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(TreeNode::leaf(&NodeData::new("x", "")).depth(), 1);
    }

    #[test]
    fn test_find() {
        let tree = sample();
        assert_eq!(tree.find("B-1").unwrap().description, "b1");
        assert!(tree.find("Z").is_none());
    }

    #[test]
    fn test_names_depth_first() {
        assert_eq!(sample().names_depth_first(), vec!["A", "B", "B-1", "C"]);
    }

    #[test]
    fn test_child_names() {
        assert_eq!(sample().child_names(), vec!["B", "C"]);
    }

    #[test]
    fn test_forest_size() {
        let forest = vec![sample(), TreeNode::leaf(&NodeData::new("Z", ""))];
        assert_eq!(forest_size(&forest), 5);
        assert_eq!(forest_size(&[]), 0);
    }

    #[test]
    fn test_tree_node_json_shape() {
        let json = serde_json::to_value(TreeNode::leaf(&NodeData::new("C", "desc"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "C", "description": "desc", "children": []})
        );
    }

    #[test]
    fn test_snapshot_record_children_default() {
        let record: SnapshotRecord =
            serde_json::from_str(r#"{"node": {"name": "A", "description": "a"}}"#).unwrap();
        assert_eq!(record, SnapshotRecord::leaf(NodeData::new("A", "a")));
    }
}

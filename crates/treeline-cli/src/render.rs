//! Terminal rendering of a forest.

use termtree::Tree;
use treeline_hierarchy::TreeNode;

/// Convert one node and its descendants into a printable tree.
pub fn to_tree(node: &TreeNode) -> Tree<String> {
    let leaves: Vec<_> = node.children.iter().map(to_tree).collect();
    Tree::new(label(node)).with_leaves(leaves)
}

/// Render a whole forest, one tree after another.
pub fn render_forest(forest: &[TreeNode]) -> String {
    if forest.is_empty() {
        return "(empty)\n".to_string();
    }
    forest.iter().map(|root| to_tree(root).to_string()).collect()
}

fn label(node: &TreeNode) -> String {
    if node.description.is_empty() {
        node.name.clone()
    } else {
        format!("{}: {}", node.name, node.description)
    }
}

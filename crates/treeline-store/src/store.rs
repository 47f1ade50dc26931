//! Graph store abstraction.

use async_trait::async_trait;
use treeline_core::Result;
use treeline_hierarchy::{NodeData, SnapshotRecord};

/// Abstraction over the graph database holding the hierarchy.
///
/// Nodes carry a `name` and a `description`; edges are directed
/// `HAS_CHILD` relationships from parent to child. Implementations acquire
/// whatever connection they need per call and release it before returning,
/// on success and on failure.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Detach and delete every node and edge.
    async fn clear(&self) -> Result<()>;

    /// Create one node.
    ///
    /// Name uniqueness is not enforced here; seed validation handles it.
    async fn create_node(&self, node: &NodeData) -> Result<()>;

    /// Create a `HAS_CHILD` edge from `parent` to `child`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`](treeline_core::Error::Store) when either
    /// endpoint does not exist.
    async fn link(&self, parent: &str, child: &str) -> Result<()>;

    /// Read every node with its immediate children in one query.
    ///
    /// Nodes without children appear with an empty child list.
    async fn snapshot(&self) -> Result<Vec<SnapshotRecord>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()>;
}

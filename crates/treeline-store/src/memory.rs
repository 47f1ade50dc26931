//! In-process graph store.
//!
//! Behaves like the Neo4j store as far as [`GraphStore`] can observe:
//! nodes are kept in creation order, duplicates are allowed, and linking
//! fails when an endpoint is missing. Faults can be injected per
//! operation to exercise error paths.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use treeline_core::{Error, Result};
use treeline_hierarchy::{NodeData, SnapshotRecord};

use crate::store::GraphStore;

/// A [`GraphStore`] operation, used to target injected faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// [`GraphStore::clear`]
    Clear,
    /// [`GraphStore::create_node`]
    CreateNode,
    /// [`GraphStore::link`]
    Link,
    /// [`GraphStore::snapshot`]
    Snapshot,
    /// [`GraphStore::ping`]
    Ping,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clear => "clear",
            Self::CreateNode => "create_node",
            Self::Link => "link",
            Self::Snapshot => "snapshot",
            Self::Ping => "ping",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug)]
struct Fault {
    operation: Operation,
    remaining_successes: usize,
}

#[derive(Default)]
struct MemoryGraph {
    nodes: Vec<NodeData>,
    edges: Vec<(String, String)>,
    fault: Option<Fault>,
}

impl MemoryGraph {
    fn check(&mut self, operation: Operation) -> Result<()> {
        match self.fault.as_mut() {
            Some(fault) if fault.operation == operation => {
                if fault.remaining_successes == 0 {
                    Err(Error::store(format!("injected failure: {operation}")))
                } else {
                    fault.remaining_successes -= 1;
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }
}

/// Graph store held in memory.
///
/// Cloning is cheap and clones share the same graph.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryGraph>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `operation` fail.
    pub async fn fail_on(&self, operation: Operation) {
        self.fail_after(operation, 0).await;
    }

    /// Let `successes` calls of `operation` through, then fail every later one.
    pub async fn fail_after(&self, operation: Operation, successes: usize) {
        self.inner.lock().await.fault = Some(Fault {
            operation,
            remaining_successes: successes,
        });
    }

    /// Remove any injected fault.
    pub async fn heal(&self) {
        self.inner.lock().await.fault = None;
    }

    /// Number of stored nodes.
    pub async fn node_count(&self) -> usize {
        self.inner.lock().await.nodes.len()
    }

    /// Number of stored edges.
    pub async fn edge_count(&self) -> usize {
        self.inner.lock().await.edges.len()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn clear(&self) -> Result<()> {
        let mut graph = self.inner.lock().await;
        graph.check(Operation::Clear)?;
        graph.nodes.clear();
        graph.edges.clear();
        Ok(())
    }

    async fn create_node(&self, node: &NodeData) -> Result<()> {
        let mut graph = self.inner.lock().await;
        graph.check(Operation::CreateNode)?;
        graph.nodes.push(node.clone());
        Ok(())
    }

    async fn link(&self, parent: &str, child: &str) -> Result<()> {
        let mut graph = self.inner.lock().await;
        graph.check(Operation::Link)?;
        if !graph.contains(parent) || !graph.contains(child) {
            return Err(Error::store(format!(
                "cannot link '{parent}' -> '{child}': endpoint not found"
            )));
        }
        graph.edges.push((parent.to_string(), child.to_string()));
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<SnapshotRecord>> {
        let mut graph = self.inner.lock().await;
        graph.check(Operation::Snapshot)?;

        let records = graph
            .nodes
            .iter()
            .map(|node| {
                let children = graph
                    .edges
                    .iter()
                    .filter(|(parent, _)| *parent == node.name)
                    .filter_map(|(_, child)| graph.nodes.iter().find(|n| n.name == *child))
                    .cloned()
                    .collect();
                SnapshotRecord::new(node.clone(), children)
            })
            .collect();
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        self.inner.lock().await.check(Operation::Ping)
    }
}

// ============================================================================
// Tests
// ============================================================================

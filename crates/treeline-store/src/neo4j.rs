//! Neo4j-backed graph store.
//!
//! Uses the `neo4rs` bolt driver. The driver keeps its own connection
//! pool; every [`GraphStore`] call checks a connection out for the length
//! of one explicit transaction and hands it back when the call returns or
//! fails, so no session outlives a request.
//!
//! Statements run in explicit transactions rather than through
//! `Graph::run`/`Graph::execute`, which retry with backoff. Failures surface
//! on the first attempt.

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Query, Row, query};
use serde::Deserialize;
use treeline_core::{Error, Result};
use treeline_hierarchy::{NodeData, SnapshotRecord};

use crate::store::GraphStore;

// ============================================================================
// Cypher
// ============================================================================

const CLEAR: &str = "MATCH (n) DETACH DELETE n";

const CREATE_NODE: &str = "CREATE (n:Node {name: $name, description: $description})";

const LINK: &str = "MATCH (a:Node {name: $parent}), (b:Node {name: $name}) \
                    CREATE (a)-[:HAS_CHILD]->(b) \
                    RETURN count(*) AS linked";

const SNAPSHOT: &str = "MATCH (n:Node) \
                        OPTIONAL MATCH (n)-[:HAS_CHILD]->(child) \
                        RETURN n.name AS name, \
                               coalesce(n.description, '') AS description, \
                               [c IN collect(child) | \
                                 {name: c.name, \
                                  description: coalesce(c.description, '')}] AS children";

const PING: &str = "RETURN 1";

// ============================================================================
// Settings
// ============================================================================

/// Connection settings for [`Neo4jStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neo4jSettings {
    /// Bolt URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
    /// Database name; `None` uses the server default.
    pub database: Option<String>,
    /// Upper bound on pooled connections.
    pub max_connections: usize,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: None,
            max_connections: 16,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Deserialize)]
struct LinkedRow {
    linked: i64,
}

#[derive(Deserialize)]
struct SnapshotRow {
    name: String,
    description: String,
    #[serde(default)]
    children: Vec<NodeData>,
}

/// Graph store backed by a Neo4j server.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Build the driver and its connection pool.
    ///
    /// Connections are opened lazily, so an unreachable server surfaces on
    /// the first operation (or [`GraphStore::ping`]) rather than here.
    pub async fn connect(settings: &Neo4jSettings) -> Result<Self> {
        let mut builder = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .max_connections(settings.max_connections);
        if let Some(db) = settings.database.as_deref() {
            builder = builder.db(db);
        }

        let config = builder.build().map_err(store_error)?;
        let graph = Graph::connect(config).await.map_err(store_error)?;

        log::info!(
            "neo4j store configured for {} (pool size {})",
            settings.uri,
            settings.max_connections
        );
        Ok(Self { graph })
    }

    /// Run one statement that returns nothing in its own transaction.
    async fn run_once(&self, q: Query) -> Result<()> {
        let mut txn = self.graph.start_txn().await.map_err(store_error)?;
        if let Err(err) = txn.run(q).await {
            let _ = txn.rollback().await;
            return Err(store_error(err));
        }
        txn.commit().await.map_err(store_error)
    }

    /// Run one statement in its own transaction and collect its rows.
    async fn fetch_rows(&self, q: Query) -> Result<Vec<Row>> {
        let mut txn = self.graph.start_txn().await.map_err(store_error)?;
        let mut rows = Vec::new();

        let streamed = async {
            let mut stream = txn.execute(q).await?;
            while let Some(row) = stream.next(txn.handle()).await? {
                rows.push(row);
            }
            Ok::<_, neo4rs::Error>(())
        }
        .await;

        if let Err(err) = streamed {
            let _ = txn.rollback().await;
            return Err(store_error(err));
        }
        txn.commit().await.map_err(store_error)?;
        Ok(rows)
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn clear(&self) -> Result<()> {
        self.run_once(query(CLEAR)).await
    }

    async fn create_node(&self, node: &NodeData) -> Result<()> {
        let q = query(CREATE_NODE)
            .param("name", node.name.as_str())
            .param("description", node.description.as_str());
        self.run_once(q).await
    }

    async fn link(&self, parent: &str, child: &str) -> Result<()> {
        let q = query(LINK).param("parent", parent).param("name", child);
        let rows = self.fetch_rows(q).await?;
        check_linked(rows.first(), parent, child)
    }

    async fn snapshot(&self) -> Result<Vec<SnapshotRecord>> {
        let rows = self.fetch_rows(query(SNAPSHOT)).await?;
        let records = rows
            .iter()
            .map(decode_snapshot_row)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("neo4j snapshot returned {} records", records.len());
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        self.run_once(query(PING)).await
    }
}

/// A `LINK` result of zero (or no row at all) means an endpoint is missing.
fn check_linked(row: Option<&Row>, parent: &str, child: &str) -> Result<()> {
    let linked = match row {
        Some(row) => row.to::<LinkedRow>().map_err(row_error)?.linked,
        None => 0,
    };

    if linked == 0 {
        return Err(Error::store(format!(
            "cannot link '{parent}' -> '{child}': endpoint not found"
        )));
    }
    Ok(())
}

fn decode_snapshot_row(row: &Row) -> Result<SnapshotRecord> {
    let row: SnapshotRow = row.to().map_err(row_error)?;
    Ok(SnapshotRecord::new(
        NodeData::new(row.name, row.description),
        row.children,
    ))
}

fn store_error(err: impl std::fmt::Display) -> Error {
    Error::store(err.to_string())
}

fn row_error(err: impl std::fmt::Display) -> Error {
    Error::invalid_data(format!("unexpected row shape: {err}"))
}

// ============================================================================
// Tests
// ============================================================================

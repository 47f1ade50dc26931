//! Seed datasets and the seed loader.
//!
//! A [`SeedSet`] is an ordered list of `{name, description, parent}`
//! records read from a TOML or JSON fixture (or the built-in default).
//! [`seed`] validates it, wipes the store, then creates and links the
//! records one by one.
//!
//! Seeding is not transactional. If the store fails midway the remaining
//! records are skipped and whatever was written stays written.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use treeline_core::{ConfigProvider, Error, Result};
use treeline_hierarchy::NodeData;

use crate::store::GraphStore;

const BUILTIN_FIXTURE: &str = include_str!("../fixtures/default.toml");

// ============================================================================
// Types
// ============================================================================

/// One node of a seed dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    /// Unique node name.
    pub name: String,
    /// Node description.
    #[serde(default)]
    pub description: String,
    /// Parent node name; an empty string in a fixture means no parent.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<String>,
}

impl SeedRecord {
    /// A record without a parent.
    pub fn root(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parent: None,
        }
    }

    /// A record attached to `parent`.
    pub fn child(
        name: impl Into<String>,
        description: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parent: Some(parent.into()),
        }
    }

    /// The node this record creates.
    pub fn node(&self) -> NodeData {
        NodeData::new(self.name.clone(), self.description.clone())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let parent = Option::<String>::deserialize(deserializer)?;
    Ok(parent.filter(|p| !p.is_empty()))
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    nodes: Vec<SeedRecord>,
}

/// An ordered seed dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSet {
    records: Vec<SeedRecord>,
}

/// What a seed run wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    /// Nodes created.
    pub nodes_created: usize,
    /// `HAS_CHILD` edges created.
    pub edges_created: usize,
}

// ============================================================================
// Loading
// ============================================================================

impl SeedSet {
    /// Wrap records in their given order.
    pub fn new(records: Vec<SeedRecord>) -> Self {
        Self { records }
    }

    /// The built-in dataset: one tree rooted at `A` with children `B`, `C`,
    /// `D`, and `B-1`..`B-3` under `B`.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_FIXTURE)
    }

    /// Parse a TOML fixture made of `[[nodes]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SeedFile = toml::from_str(content)
            .map_err(|e| Error::serialization(format!("seed fixture: {e}")))?;
        Ok(Self::new(file.nodes))
    }

    /// Parse a JSON fixture: an array of records.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<SeedRecord> = serde_json::from_str(content)
            .map_err(|e| Error::serialization(format!("seed fixture: {e}")))?;
        Ok(Self::new(records))
    }

    /// Load a fixture file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                Error::not_found(format!("seed fixture {}", path.display()))
            }
            _ => Error::io_with_path(e, path),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::config(format!(
                "unsupported seed fixture format: {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    /// Resolve the dataset for `config`: its fixture if one is set,
    /// otherwise the built-in dataset.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        match config.fixture_path()? {
            Some(path) => {
                log::info!("loading seed fixture from {}", path.display());
                Self::load(path)
            }
            None => Self::builtin(),
        }
    }

    /// Records in load order.
    pub fn records(&self) -> &[SeedRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check the dataset before anything is written.
    ///
    /// The set must not be empty. Names must be non-empty and unique, no
    /// record may be its own parent, and every parent must be defined by an
    /// earlier record. All problems are reported together.
    pub fn validate(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(Error::invalid_seed("dataset has no records"));
        }

        let mut problems = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.records.len());

        for (i, record) in self.records.iter().enumerate() {
            let name = record.name.as_str();
            if name.is_empty() {
                problems.push(format!("record {i} has an empty name"));
                continue;
            }
            if seen.contains(name) {
                problems.push(format!("duplicate node name '{name}'"));
            }
            if let Some(parent) = record.parent.as_deref() {
                if parent == name {
                    problems.push(format!("'{name}' is its own parent"));
                } else if !seen.contains(parent) {
                    problems.push(format!(
                        "'{name}' references parent '{parent}' which is not defined before it"
                    ));
                }
            }
            seen.insert(name);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_seed(problems.join("; ")))
        }
    }
}

// ============================================================================
// Seed loader
// ============================================================================

/// Reset the store and load `set` into it.
///
/// Validates first; an invalid set leaves the store untouched. Then:
/// detach-delete everything, and for each record create its node and, if
/// it has a parent, link parent to child. The first failure stops the run.
pub async fn seed(store: &dyn GraphStore, set: &SeedSet) -> Result<SeedSummary> {
    set.validate()?;

    store.clear().await?;
    log::debug!("store cleared");

    let mut summary = SeedSummary::default();
    for record in set.records() {
        store.create_node(&record.node()).await?;
        summary.nodes_created += 1;

        if let Some(parent) = record.parent.as_deref() {
            store.link(parent, &record.name).await?;
            summary.edges_created += 1;
        }
    }

    log::info!(
        "seeded {} nodes and {} edges",
        summary.nodes_created,
        summary.edges_created
    );
    Ok(summary)
}

// ============================================================================
// Tests
// ============================================================================

//! Graph store access for Treeline.
//!
//! # Modules
//!
//! - [`store`]: the [`GraphStore`] trait
//! - [`neo4j`]: bolt-backed [`Neo4jStore`]
//! - [`memory`]: in-process [`MemoryStore`]
//! - [`seed`]: seed datasets, validation and the seed loader
//! - [`fetch`]: snapshot read plus hierarchy assembly

#![doc = include_str!("../README.md")]

pub mod fetch;
pub mod memory;
pub mod neo4j;
pub mod seed;
pub mod store;

pub use fetch::{fetch_forest, fetch_forest_with_report};
pub use memory::{MemoryStore, Operation};
pub use neo4j::{Neo4jSettings, Neo4jStore};
pub use seed::{SeedRecord, SeedSet, SeedSummary, seed};
pub use store::GraphStore;

//! Hierarchy reconstruction for Treeline.
//!
//! This crate rebuilds nested trees from the flat `(node, children)`
//! records a graph store returns, applying numeric-aware ordering at
//! every level.
//!
//! # Key Abstractions
//!
//! - [`SnapshotRecord`]: one node paired with its immediate children
//! - [`TreeNode`]: a node with its fully nested subtree
//! - [`build_forest`]: snapshot in, sorted forest out
//! - [`BuildReport`]: what the builder had to skip along the way

#![doc = include_str!("../README.md")]

pub mod builder;
pub mod natural;
pub mod report;
pub mod types;

pub use builder::{build_forest, build_forest_with_report};
pub use natural::{NaturalKey, natural_cmp};
pub use report::{BuildReport, DanglingRef};
pub use types::{NodeData, SnapshotRecord, TreeNode, forest_size};

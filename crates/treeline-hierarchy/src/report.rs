//! Diagnostics collected while building a forest.

use serde::{Deserialize, Serialize};

/// A child reference whose target has no record of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingRef {
    /// The node listing the child.
    pub parent: String,
    /// The missing child name.
    pub child: String,
}

/// Summary of one [`build_forest_with_report`](crate::build_forest_with_report) run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Distinct nodes in the snapshot.
    pub node_count: usize,
    /// Roots in the resulting forest.
    pub root_count: usize,
    /// Child references skipped because the child had no record.
    pub dangling_refs: Vec<DanglingRef>,
    /// `(parent, child)` edges not expanded because `child` was already an
    /// ancestor of `parent`.
    pub broken_cycles: Vec<(String, String)>,
    /// Nodes not reachable from any root, in natural order.
    pub unreachable: Vec<String>,
}

impl BuildReport {
    /// True when the snapshot was a clean forest and nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.dangling_refs.is_empty()
            && self.broken_cycles.is_empty()
            && self.unreachable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean() {
        assert!(BuildReport::default().is_clean());
    }

    #[test]
    fn test_dangling_makes_unclean() {
        let report = BuildReport {
            dangling_refs: vec![DanglingRef {
                parent: "A".into(),
                child: "ghost".into(),
            }],
            ..Default::default()
        };
        assert!(!report.is_clean());
    }

    #[test]
    fn test_unreachable_makes_unclean() {
        let report = BuildReport {
            unreachable: vec!["X".into()],
            ..Default::default()
        };
        assert!(!report.is_clean());
    }
}

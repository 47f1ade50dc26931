//! Snapshot read plus hierarchy assembly.

use treeline_core::Result;
use treeline_hierarchy::{BuildReport, TreeNode, build_forest_with_report};

use crate::store::GraphStore;

/// Read one snapshot and rebuild the forest from it.
///
/// An empty store yields an empty forest. Read failures propagate as-is.
pub async fn fetch_forest(store: &dyn GraphStore) -> Result<Vec<TreeNode>> {
    let (forest, _) = fetch_forest_with_report(store).await?;
    Ok(forest)
}

/// Like [`fetch_forest`], also returning the builder's report.
pub async fn fetch_forest_with_report(
    store: &dyn GraphStore,
) -> Result<(Vec<TreeNode>, BuildReport)> {
    let snapshot = store.snapshot().await?;
    let (forest, report) = build_forest_with_report(&snapshot);

    if !report.is_clean() {
        log::warn!(
            "snapshot is not a clean forest: {} dangling refs, {} cycle edges, {} unreachable nodes",
            report.dangling_refs.len(),
            report.broken_cycles.len(),
            report.unreachable.len()
        );
    }

    Ok((forest, report))
}

//! Forest construction from flat snapshots.
//!
//! The builder indexes every record by name, links each node to the
//! children its record lists, orders children with [`natural_cmp`], and
//! expands every root into an owned [`TreeNode`] tree.
//!
//! Roots are the nodes no record lists as a child. They are returned in
//! natural name order so the same store always yields the same forest.
//!
//! Expansion keeps the names on the current root-to-node path. A child that
//! is already on that path is not expanded again, so a parent cycle in the
//! store cannot make the output infinite.
//!
//! [`natural_cmp`]: crate::natural_cmp

use std::collections::{HashMap, HashSet};

use crate::natural::NaturalKey;
use crate::report::{BuildReport, DanglingRef};
use crate::types::{NodeData, SnapshotRecord, TreeNode};

/// Build a forest from snapshot records.
///
/// Pure function; see [`build_forest_with_report`] for the diagnostics.
///
/// # Example
///
/// ```
/// use treeline_hierarchy::{build_forest, NodeData, SnapshotRecord};
///
/// let a = NodeData::new("A", "root");
/// let b = NodeData::new("B", "child");
/// let records = vec![
///     SnapshotRecord::new(a, vec![b.clone()]),
///     SnapshotRecord::leaf(b),
/// ];
///
/// let forest = build_forest(&records);
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].child_names(), vec!["B"]);
/// ```
pub fn build_forest(records: &[SnapshotRecord]) -> Vec<TreeNode> {
    build_forest_with_report(records).0
}

/// Build a forest and report what had to be skipped.
pub fn build_forest_with_report(records: &[SnapshotRecord]) -> (Vec<TreeNode>, BuildReport) {
    let mut report = BuildReport::default();
    let index = NodeIndex::from_records(records, &mut report);

    let mut path = HashSet::new();
    let mut reached = HashSet::new();
    let forest: Vec<TreeNode> = index
        .roots()
        .into_iter()
        .map(|pos| index.expand(pos, &mut path, &mut reached, &mut report))
        .collect();

    report.node_count = index.entries.len();
    report.root_count = forest.len();
    report.unreachable = index.unreached(&reached);

    log::debug!(
        "built forest: {} nodes, {} roots, {} dangling, {} cycle edges, {} unreachable",
        report.node_count,
        report.root_count,
        report.dangling_refs.len(),
        report.broken_cycles.len(),
        report.unreachable.len()
    );

    (forest, report)
}

// ============================================================================
// Index
// ============================================================================

struct Entry<'a> {
    data: &'a NodeData,
    children: Vec<&'a str>,
}

struct NodeIndex<'a> {
    entries: Vec<Entry<'a>>,
    positions: HashMap<&'a str, usize>,
    listed_as_child: HashSet<&'a str>,
}

impl<'a> NodeIndex<'a> {
    fn from_records(records: &'a [SnapshotRecord], report: &mut BuildReport) -> Self {
        let mut entries: Vec<Entry<'a>> = Vec::with_capacity(records.len());
        let mut positions: HashMap<&'a str, usize> = HashMap::with_capacity(records.len());

        // A repeated record replaces the stored data; children still merge below.
        for record in records {
            let name = record.node.name.as_str();
            match positions.get(name) {
                Some(&pos) => entries[pos].data = &record.node,
                None => {
                    positions.insert(name, entries.len());
                    entries.push(Entry {
                        data: &record.node,
                        children: Vec::new(),
                    });
                }
            }
        }

        let mut listed_as_child = HashSet::new();
        for record in records {
            let Some(&pos) = positions.get(record.node.name.as_str()) else {
                continue;
            };
            for child in &record.children {
                let child_name = child.name.as_str();
                listed_as_child.insert(child_name);

                if !positions.contains_key(child_name) {
                    log::debug!(
                        "skipping dangling child '{}' of '{}'",
                        child_name,
                        record.node.name
                    );
                    report.dangling_refs.push(DanglingRef {
                        parent: record.node.name.clone(),
                        child: child.name.clone(),
                    });
                    continue;
                }

                let children = &mut entries[pos].children;
                if !children.contains(&child_name) {
                    children.push(child_name);
                }
            }
        }

        for entry in &mut entries {
            entry.children.sort_by_key(|name| NaturalKey(*name));
        }

        Self {
            entries,
            positions,
            listed_as_child,
        }
    }

    fn roots(&self) -> Vec<usize> {
        let mut roots: Vec<usize> = (0..self.entries.len())
            .filter(|&pos| {
                !self
                    .listed_as_child
                    .contains(self.entries[pos].data.name.as_str())
            })
            .collect();
        roots.sort_by_key(|&pos| NaturalKey(self.entries[pos].data.name.as_str()));
        roots
    }

    fn expand(
        &self,
        pos: usize,
        path: &mut HashSet<&'a str>,
        reached: &mut HashSet<&'a str>,
        report: &mut BuildReport,
    ) -> TreeNode {
        let entry = &self.entries[pos];
        let data: &'a NodeData = entry.data;
        let name = data.name.as_str();

        path.insert(name);
        reached.insert(name);

        let mut children = Vec::with_capacity(entry.children.len());
        for &child in &entry.children {
            if path.contains(child) {
                log::warn!("not expanding '{child}' under '{name}': parent cycle");
                report
                    .broken_cycles
                    .push((name.to_string(), child.to_string()));
                continue;
            }
            if let Some(&child_pos) = self.positions.get(child) {
                children.push(self.expand(child_pos, path, reached, report));
            }
        }

        path.remove(name);

        TreeNode {
            name: data.name.clone(),
            description: data.description.clone(),
            children,
        }
    }

    fn unreached(&self, reached: &HashSet<&'a str>) -> Vec<String> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| entry.data.name.as_str())
            .filter(|name| !reached.contains(name))
            .collect();
        names.sort_by_key(|name| NaturalKey(*name));
        names.into_iter().map(String::from).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

// Copyright 2025 OntoMerger Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Aggregated merge table
//!
//! In the aggregated table the target of every row is the canonical node of
//! its merge cluster: `A -> B, B -> C` becomes `A -> C, B -> C` when the
//! priority order is `C, B, A`.
//!
//! ## Orphaned clusters
//!
//! When a cluster has no canonical node, every member row carries a `None`
//! target. This mirrors the historical tables and has not been validated as
//! intended behavior; such rows are counted and logged as a warning.

use crate::canonical::CanonicalSelector;
use crate::cluster::MergeCluster;
use crate::error::MergeResult;
use crate::graph::MergeGraph;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// One merge: `source_id` is represented by `target_id` from now on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRow {
    pub source_id: NodeId,
    /// Canonical node of the cluster; `None` for orphaned clusters
    pub target_id: Option<NodeId>,
}

impl MergeRow {
    pub fn new(source_id: NodeId, target_id: Option<NodeId>) -> Self {
        Self { source_id, target_id }
    }

    pub fn is_self_loop(&self) -> bool {
        self.target_id.as_ref() == Some(&self.source_id)
    }
}

/// Sort by target then source; rows without a target go last.
fn row_order(a: &MergeRow, b: &MergeRow) -> Ordering {
    match (&a.target_id, &b.target_id) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.source_id.cmp(&b.source_id))
}

/// Flattened `member -> canonical` table: sorted, no self-loops, no duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedMergeTable {
    rows: Vec<MergeRow>,
}

impl AggregatedMergeTable {
    /// Expand resolved clusters into merge rows
    pub fn assemble(resolved: Vec<(MergeCluster, Option<NodeId>)>) -> Self {
        let mut rows: Vec<MergeRow> = resolved
            .into_iter()
            .flat_map(|(cluster, canonical)| {
                cluster
                    .into_members()
                    .into_iter()
                    .map(move |member| MergeRow::new(member, canonical.clone()))
            })
            .filter(|row| !row.is_self_loop())
            .collect();

        rows.sort_by(row_order);
        rows.dedup();

        let table = Self { rows };
        let orphaned = table.orphaned_rows();
        if orphaned > 0 {
            tracing::warn!(
                orphaned_rows = orphaned,
                "Merge clusters without a canonical node; rows carry no target"
            );
        }
        table
    }

    pub fn rows(&self) -> &[MergeRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergeRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose cluster had no canonical node
    pub fn orphaned_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.target_id.is_none()).count()
    }

    /// Every merged (source) node, sorted and unique
    pub fn merged_nodes(&self) -> Vec<NodeId> {
        self.rows
            .iter()
            .map(|r| &r.source_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Canonical node a merged node was rewritten to.
    ///
    /// Outer `None`: not merged. Inner `None`: merged in an orphaned cluster.
    pub fn canonical_of(&self, id: &NodeId) -> Option<Option<&NodeId>> {
        self.rows
            .iter()
            .find(|r| &r.source_id == id)
            .map(|r| r.target_id.as_ref())
    }
}

impl<'a> IntoIterator for &'a AggregatedMergeTable {
    type Item = &'a MergeRow;
    type IntoIter = std::slice::Iter<'a, MergeRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Graph -> clusters -> canonical nodes -> aggregated table
pub fn aggregate_merges<'a, I>(pairs: I, selector: &CanonicalSelector) -> MergeResult<AggregatedMergeTable>
where
    I: IntoIterator<Item = (&'a NodeId, &'a NodeId)>,
{
    let graph = MergeGraph::from_pairs(pairs);
    let clusters = graph.clusters();
    let cluster_count = clusters.len();
    let resolved = selector.resolve(clusters)?;
    let table = AggregatedMergeTable::assemble(resolved);

    tracing::info!(
        nodes = graph.vertex_count(),
        input_merges = graph.edge_count(),
        clusters = cluster_count,
        aggregated_merges = table.len(),
        "Aggregated merges"
    );

    Ok(table)
}

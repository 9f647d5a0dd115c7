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

//! Node partitions after alignment
//!
//! Every input node ends up in exactly one of four partitions:
//!
//! | partition         | definition                                          |
//! |-------------------|-----------------------------------------------------|
//! | `seed`            | namespace is the seed ontology                      |
//! | `merged_to_seed`  | merged, and its canonical node is a seed node       |
//! | `merged_to_other` | merged, canonical node outside the seed (or none)   |
//! | `unmapped`        | everything else                                     |
//!
//! Partitions are recomputed from scratch each run, sorted ascending by id.

use crate::error::{MergeError, MergeResult};
use crate::merge_table::AggregatedMergeTable;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Partition a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Seed,
    MergedToSeed,
    MergedToOther,
    Unmapped,
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Partition::Seed => "seed",
            Partition::MergedToSeed => "merged_to_seed",
            Partition::MergedToOther => "merged_to_other",
            Partition::Unmapped => "unmapped",
        };
        f.write_str(name)
    }
}

/// The four node partitions, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePartitions {
    pub seed: Vec<NodeId>,
    pub merged_to_seed: Vec<NodeId>,
    pub merged_to_other: Vec<NodeId>,
    pub unmapped: Vec<NodeId>,
}

impl NodePartitions {
    fn named(&self) -> [(Partition, &[NodeId]); 4] {
        [
            (Partition::Seed, self.seed.as_slice()),
            (Partition::MergedToSeed, self.merged_to_seed.as_slice()),
            (Partition::MergedToOther, self.merged_to_other.as_slice()),
            (Partition::Unmapped, self.unmapped.as_slice()),
        ]
    }

    pub fn get(&self, partition: Partition) -> &[NodeId] {
        match partition {
            Partition::Seed => &self.seed,
            Partition::MergedToSeed => &self.merged_to_seed,
            Partition::MergedToOther => &self.merged_to_other,
            Partition::Unmapped => &self.unmapped,
        }
    }

    /// Merged-to-seed plus merged-to-other, sorted
    pub fn merged(&self) -> Vec<NodeId> {
        let mut merged: Vec<NodeId> = self
            .merged_to_seed
            .iter()
            .chain(self.merged_to_other.iter())
            .cloned()
            .collect();
        merged.sort();
        merged
    }

    pub fn total(&self) -> usize {
        self.named().iter().map(|(_, ids)| ids.len()).sum()
    }

    /// Partition holding `id`, if any
    pub fn partition_of(&self, id: &NodeId) -> Option<Partition> {
        self.named()
            .into_iter()
            .find(|(_, ids)| ids.binary_search(id).is_ok())
            .map(|(p, _)| p)
    }

    /// Check the partitions are pairwise disjoint and cover exactly `input`.
    pub fn verify(&self, input: &BTreeSet<NodeId>) -> MergeResult<()> {
        let mut assigned: HashMap<&NodeId, Partition> = HashMap::with_capacity(input.len());
        for (partition, ids) in self.named() {
            for id in ids {
                if !input.contains(id) {
                    return Err(MergeError::InconsistentPartitions(format!(
                        "{} is in {} but not in the input nodes",
                        id, partition
                    )));
                }
                if let Some(previous) = assigned.insert(id, partition) {
                    return Err(MergeError::InconsistentPartitions(format!(
                        "{} is in both {} and {}",
                        id, previous, partition
                    )));
                }
            }
        }

        if assigned.len() != input.len() {
            let missing = input.iter().find(|id| !assigned.contains_key(id));
            return Err(MergeError::InconsistentPartitions(format!(
                "{} of {} input nodes are in no partition (first: {})",
                input.len() - assigned.len(),
                input.len(),
                missing.map(|id| id.as_str()).unwrap_or("?")
            )));
        }

        Ok(())
    }
}

/// Size of a partition relative to all input nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionCount {
    pub count: usize,
    /// Percentage of all input nodes, 0 when there are none
    pub percentage: f64,
}

impl PartitionCount {
    fn of(count: usize, total: usize) -> Self {
        Self {
            count,
            percentage: percentage(count, total),
        }
    }
}

/// Counts and percentages of each partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub total_nodes: usize,
    pub seed: PartitionCount,
    pub merged: PartitionCount,
    pub merged_to_seed: PartitionCount,
    pub merged_to_other: PartitionCount,
    pub unmapped: PartitionCount,
}

impl PartitionSummary {
    pub fn from_partitions(partitions: &NodePartitions, total_nodes: usize) -> Self {
        let merged = partitions.merged_to_seed.len() + partitions.merged_to_other.len();
        Self {
            total_nodes,
            seed: PartitionCount::of(partitions.seed.len(), total_nodes),
            merged: PartitionCount::of(merged, total_nodes),
            merged_to_seed: PartitionCount::of(partitions.merged_to_seed.len(), total_nodes),
            merged_to_other: PartitionCount::of(partitions.merged_to_other.len(), total_nodes),
            unmapped: PartitionCount::of(partitions.unmapped.len(), total_nodes),
        }
    }
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Derive the four node partitions from the input nodes and the merge table.
///
/// Input ids are treated as a set. Fails on malformed ids, and on
/// inconsistent inputs that would break disjointness (a merged node missing
/// from the input, or a seed node that was merged away).
pub fn build_partitions(
    nodes: &[NodeId],
    merges: &AggregatedMergeTable,
    seed_namespace: &str,
) -> MergeResult<(NodePartitions, PartitionSummary)> {
    let input: BTreeSet<NodeId> = nodes.iter().cloned().collect();

    let mut seed = Vec::new();
    for id in &input {
        if id.namespace()? == seed_namespace {
            seed.push(id.clone());
        }
    }

    let merged: BTreeSet<&NodeId> = merges.iter().map(|r| &r.source_id).collect();

    let mut merged_to_seed: BTreeSet<&NodeId> = BTreeSet::new();
    for row in merges {
        if let Some(target) = &row.target_id {
            if target.namespace()? == seed_namespace {
                merged_to_seed.insert(&row.source_id);
            }
        }
    }

    let merged_to_other: Vec<NodeId> = merged
        .iter()
        .filter(|id| !merged_to_seed.contains(*id))
        .map(|id| (*id).clone())
        .collect();

    let seed_set: BTreeSet<&NodeId> = seed.iter().collect();
    let unmapped: Vec<NodeId> = input
        .iter()
        .filter(|id| !seed_set.contains(id) && !merged.contains(id))
        .cloned()
        .collect();

    let partitions = NodePartitions {
        seed,
        merged_to_seed: merged_to_seed.into_iter().cloned().collect(),
        merged_to_other,
        unmapped,
    };
    partitions.verify(&input)?;

    let summary = PartitionSummary::from_partitions(&partitions, input.len());
    log_summary(&summary);

    Ok((partitions, summary))
}

fn log_summary(s: &PartitionSummary) {
    tracing::info!(
        "Out of {} nodes, {} ({:.2}%) are seed.",
        s.total_nodes,
        s.seed.count,
        s.seed.percentage
    );
    tracing::info!(
        "Out of {} merged nodes, {} ({:.2}%) are merged to seed nodes.",
        s.merged.count,
        s.merged_to_seed.count,
        percentage(s.merged_to_seed.count, s.merged.count)
    );
    tracing::info!(
        "Out of {} merged nodes, {} ({:.2}%) are merged to other than seed nodes.",
        s.merged.count,
        s.merged_to_other.count,
        percentage(s.merged_to_other.count, s.merged.count)
    );
    tracing::info!(
        "Out of {} nodes, {} ({:.2}%) are seed, {} ({:.2}%) are merged, {} ({:.2}%) are unmapped.",
        s.total_nodes,
        s.seed.count,
        s.seed.percentage,
        s.merged.count,
        s.merged.percentage,
        s.unmapped.count,
        s.unmapped.percentage
    );
}

/// Input nodes that survive as nodes of the merged domain (not merged away)
pub fn domain_nodes(nodes: &[NodeId], merges: &AggregatedMergeTable) -> Vec<NodeId> {
    let merged: BTreeSet<&NodeId> = merges.iter().map(|r| &r.source_id).collect();
    nodes
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|id| !merged.contains(id))
        .cloned()
        .collect()
}

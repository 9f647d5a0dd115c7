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

//! OntoMerger Core
//!
//! Merge-cluster resolution for ontology alignment. Alignment steps merge
//! nodes of several overlapping ontologies onto each other; this crate turns
//! the accumulated merges into one deduplicated table:
//! - **Merge graph**: undirected graph over every merged node id
//! - **Clusters**: connected components, via union-find
//! - **Canonical nodes**: one per cluster, picked by namespace priority
//! - **Aggregated merges**: every member rewritten onto its canonical node
//! - **Partitions**: seed / merged-to-seed / merged-to-other / unmapped
//!
//! ```text
//!  MappingEdgeLog ──► MergeGraph ──► clusters ──► CanonicalSelector
//!                                                       │
//!   NodePartitions ◄── build_partitions ◄── AggregatedMergeTable
//!                                                       │
//!                                              export_domain_merges
//! ```
//!
//! # Example
//!
//! ```rust
//! use ontomerger_core::{post_process_alignment_results, MappingEdgeLog, MergeConfig, NodeId};
//!
//! let mut log = MappingEdgeLog::new();
//! log.record_step(
//!     &[(NodeId::from("DOID:1612"), NodeId::from("MONDO:0007254"))],
//!     "MONDO",
//!     1,
//!     "equivalence",
//! )?;
//!
//! let nodes = vec![NodeId::from("MONDO:0007254"), NodeId::from("DOID:1612")];
//! let config = MergeConfig::new("MONDO", vec!["MONDO".into(), "DOID".into()]);
//! let outcome = post_process_alignment_results(&log, &nodes, &config)?;
//!
//! assert_eq!(outcome.partitions.merged_to_seed, vec![NodeId::from("DOID:1612")]);
//! # Ok::<(), ontomerger_core::MergeError>(())
//! ```

pub mod analysis;
pub mod canonical;
pub mod cluster;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod mapping;
pub mod merge_table;
pub mod node;
pub mod partition;
pub mod pipeline;
pub mod priority;
pub mod union_find;

// Re-exports
pub use analysis::{
    canonical_namespace_analysis, cluster_size_analysis, namespace_pair_analysis,
    CanonicalNamespaceCount, ClusterSizeCount, NamespacePairCount,
};
pub use canonical::{CanonicalSelector, TieBreak};
pub use cluster::MergeCluster;
pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use export::{export_domain_merges, DomainMergeRow, PROVENANCE_ONTO_MERGER, RELATION_MERGE};
pub use graph::MergeGraph;
pub use mapping::{unmapped_nodes, AlignmentStep, MappingEdge, MappingEdgeLog};
pub use merge_table::{aggregate_merges, AggregatedMergeTable, MergeRow};
pub use node::{namespace_of, NodeId, NAMESPACE_SEPARATOR};
pub use partition::{
    build_partitions, domain_nodes, NodePartitions, Partition, PartitionCount, PartitionSummary,
};
pub use pipeline::{post_process_alignment_results, MergeOutcome};
pub use priority::produce_alignment_priority_order;
pub use union_find::DisjointSet;

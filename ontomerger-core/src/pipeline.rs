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

//! End-of-alignment post processing
//!
//! Runs once over the full mapping edge log: aggregate merges, partition the
//! input nodes, and project the domain tables. Single threaded; any error
//! aborts the run without partial output.

use crate::config::MergeConfig;
use crate::error::MergeResult;
use crate::export::{export_domain_merges, DomainMergeRow};
use crate::mapping::MappingEdgeLog;
use crate::merge_table::{aggregate_merges, AggregatedMergeTable};
use crate::node::NodeId;
use crate::partition::{self, build_partitions, NodePartitions, PartitionSummary};
use ontomerger_telemetry::RuntimeLog;

/// Everything derived from one alignment run
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub merges: AggregatedMergeTable,
    pub partitions: NodePartitions,
    pub summary: PartitionSummary,
    pub domain_merges: Vec<DomainMergeRow>,
    /// Input nodes minus merged nodes
    pub domain_nodes: Vec<NodeId>,
    pub runtime: RuntimeLog,
}

pub fn post_process_alignment_results(
    log: &MappingEdgeLog,
    nodes: &[NodeId],
    config: &MergeConfig,
) -> MergeResult<MergeOutcome> {
    config.validate()?;

    let span = tracing::info_span!(
        "post_process_alignment_results",
        seed = %config.seed_ontology_name,
        mapping_edges = log.len(),
        nodes = nodes.len()
    );
    let _enter = span.enter();

    let mut runtime = RuntimeLog::new();
    let selector = config.selector();

    let merges = runtime.time("aggregate_merges", || aggregate_merges(log.pairs(), &selector))?;
    let (partitions, summary) = runtime.time("partition_nodes", || {
        build_partitions(nodes, &merges, &config.seed_ontology_name)
    })?;
    let domain_merges = runtime.time("export_domain_merges", || export_domain_merges(&merges));
    let domain_nodes = runtime.time("domain_nodes", || partition::domain_nodes(nodes, &merges));

    tracing::info!(
        aggregated_merges = merges.len(),
        domain_nodes = domain_nodes.len(),
        elapsed_seconds = runtime.total_seconds(),
        "Alignment post processing finished"
    );

    Ok(MergeOutcome {
        merges,
        partitions,
        summary,
        domain_merges,
        domain_nodes,
        runtime,
    })
}

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

//! Merge resolution throughput on synthetic alignment runs
//!
//! Run with: cargo bench -p ontomerger-core --bench merge_bench

use ontomerger_core::{aggregate_merges, build_partitions, CanonicalSelector, NodeId, TieBreak};
use std::time::Instant;

const NAMESPACES: [&str; 6] = ["MONDO", "ORPHANET", "DOID", "NCIT", "MEDDRA", "ICD10CM"];

/// One seed node at the head of every chain, other namespaces after it
fn generate_nodes(count: usize, cluster_size: usize) -> Vec<NodeId> {
    (0..count)
        .map(|i| {
            let pos = i % cluster_size;
            let ns = if pos == 0 {
                NAMESPACES[0]
            } else {
                NAMESPACES[1 + pos % (NAMESPACES.len() - 1)]
            };
            NodeId::new(format!("{}:{:07}", ns, i))
        })
        .collect()
}

/// Chains of `cluster_size` consecutive nodes, each merged onto the next
fn generate_merges(nodes: &[NodeId], cluster_size: usize) -> Vec<(NodeId, NodeId)> {
    nodes
        .chunks(cluster_size)
        .flat_map(|chunk| chunk.windows(2).map(|w| (w[0].clone(), w[1].clone())))
        .collect()
}

fn benchmark_run(node_count: usize, cluster_size: usize) {
    let nodes = generate_nodes(node_count, cluster_size);
    let merges = generate_merges(&nodes, cluster_size);
    let order: Vec<String> = NAMESPACES.iter().map(|s| s.to_string()).collect();
    let selector = CanonicalSelector::new(&order, TieBreak::LastWins);

    let start = Instant::now();
    let table = match aggregate_merges(merges.iter().map(|(s, t)| (s, t)), &selector) {
        Ok(table) => table,
        Err(e) => {
            println!("aggregation failed: {}", e);
            return;
        }
    };
    let aggregate_time = start.elapsed();

    let start = Instant::now();
    let partitions = build_partitions(&nodes, &table, NAMESPACES[0]);
    let partition_time = start.elapsed();
    if let Err(e) = &partitions {
        println!("partitioning failed: {}", e);
        return;
    }

    println!(
        "nodes={:>9} edges={:>9} rows={:>9} aggregate={:?} ({} edges/sec) partition={:?}",
        node_count,
        merges.len(),
        table.len(),
        aggregate_time,
        (merges.len() as f64 / aggregate_time.as_secs_f64()) as u64,
        partition_time
    );
}

fn main() {
    println!("\n=== Merge Resolution Benchmark ===");
    for &node_count in &[10_000, 100_000, 1_000_000] {
        benchmark_run(node_count, NAMESPACES.len());
    }

    println!("\n=== Long Chains ===");
    benchmark_run(100_000, 1_000);
}

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

//! Merge analysis tables
//!
//! Read-only summaries of the aggregated merge table for reporting:
//! which namespaces were merged onto which, what the canonical namespaces
//! absorbed, and how large the merge clusters are.

use crate::error::MergeResult;
use crate::merge_table::AggregatedMergeTable;
use crate::node::NodeId;
use crate::partition::percentage;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Merges from one namespace onto another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespacePairCount {
    pub source_namespace: String,
    /// `None` for rows of orphaned clusters
    pub target_namespace: Option<String>,
    pub count: usize,
    /// Percentage of all merge rows, 3 decimals
    pub freq: f64,
}

/// Merges absorbed by one canonical namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalNamespaceCount {
    pub target_namespace: Option<String>,
    pub count: usize,
    pub source_namespaces: BTreeSet<String>,
    pub freq: f64,
}

/// Number of clusters of a given size (canonical node included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSizeCount {
    pub cluster_size: usize,
    pub cluster_count: usize,
}

fn freq(count: usize, total: usize) -> f64 {
    (percentage(count, total) * 1000.0).round() / 1000.0
}

fn target_namespace(target: Option<&NodeId>) -> MergeResult<Option<String>> {
    target.map(|t| t.namespace().map(str::to_string)).transpose()
}

/// Merge counts per (source namespace, target namespace), largest first
pub fn namespace_pair_analysis(merges: &AggregatedMergeTable) -> MergeResult<Vec<NamespacePairCount>> {
    let mut counts: HashMap<(String, Option<String>), usize> = HashMap::new();
    for row in merges {
        let source = row.source_id.namespace()?.to_string();
        let target = target_namespace(row.target_id.as_ref())?;
        *counts.entry((source, target)).or_insert(0) += 1;
    }

    let total = merges.len();
    let mut out: Vec<NamespacePairCount> = counts
        .into_iter()
        .map(|((source_namespace, target_namespace), count)| NamespacePairCount {
            source_namespace,
            target_namespace,
            count,
            freq: freq(count, total),
        })
        .collect();
    out.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.source_namespace.cmp(&b.source_namespace))
            .then_with(|| a.target_namespace.cmp(&b.target_namespace))
    });
    Ok(out)
}

/// Merge counts per canonical namespace, with the namespaces merged onto it
pub fn canonical_namespace_analysis(merges: &AggregatedMergeTable) -> MergeResult<Vec<CanonicalNamespaceCount>> {
    let mut groups: HashMap<Option<String>, (usize, BTreeSet<String>)> = HashMap::new();
    for row in merges {
        let target = target_namespace(row.target_id.as_ref())?;
        let entry = groups.entry(target).or_default();
        entry.0 += 1;
        entry.1.insert(row.source_id.namespace()?.to_string());
    }

    let total = merges.len();
    let mut out: Vec<CanonicalNamespaceCount> = groups
        .into_iter()
        .map(|(target_namespace, (count, source_namespaces))| CanonicalNamespaceCount {
            target_namespace,
            count,
            source_namespaces,
            freq: freq(count, total),
        })
        .collect();
    out.sort_by_key(|c| (Reverse(c.count), c.target_namespace.clone()));
    Ok(out)
}

/// Distribution of cluster sizes, smallest first.
///
/// Rows of orphaned clusters are skipped: without a canonical node their
/// cluster boundaries are not recoverable from the table.
pub fn cluster_size_analysis(merges: &AggregatedMergeTable) -> Vec<ClusterSizeCount> {
    let mut sources_per_canonical: HashMap<&NodeId, usize> = HashMap::new();
    for row in merges {
        if let Some(target) = &row.target_id {
            *sources_per_canonical.entry(target).or_insert(0) += 1;
        }
    }

    let mut sizes: BTreeMap<usize, usize> = BTreeMap::new();
    for sources in sources_per_canonical.into_values() {
        *sizes.entry(sources + 1).or_insert(0) += 1;
    }

    sizes
        .into_iter()
        .map(|(cluster_size, cluster_count)| ClusterSizeCount {
            cluster_size,
            cluster_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{CanonicalSelector, TieBreak};
    use crate::merge_table::aggregate_merges;

    fn table(raw: &[(&str, &str)], nss: &[&str]) -> AggregatedMergeTable {
        let pairs: Vec<(NodeId, NodeId)> = raw.iter().map(|(a, b)| (NodeId::from(*a), NodeId::from(*b))).collect();
        let order: Vec<String> = nss.iter().map(|s| s.to_string()).collect();
        aggregate_merges(
            pairs.iter().map(|(s, t)| (s, t)),
            &CanonicalSelector::new(&order, TieBreak::LastWins),
        )
        .unwrap()
    }

    fn sample() -> AggregatedMergeTable {
        table(
            &[
                ("DOID:1", "MONDO:1"),
                ("NCIT:1", "MONDO:1"),
                ("DOID:2", "MONDO:2"),
                ("NCIT:3", "DOID:3"),
            ],
            &["MONDO", "DOID", "NCIT"],
        )
    }

    #[test]
    fn test_namespace_pairs() {
        let pairs = namespace_pair_analysis(&sample()).unwrap();
        let flat: Vec<(&str, Option<&str>, usize, f64)> = pairs
            .iter()
            .map(|p| (p.source_namespace.as_str(), p.target_namespace.as_deref(), p.count, p.freq))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("DOID", Some("MONDO"), 2, 50.0),
                ("NCIT", Some("DOID"), 1, 25.0),
                ("NCIT", Some("MONDO"), 1, 25.0),
            ]
        );
    }

    #[test]
    fn test_freq_rounds_to_three_decimals() {
        let merges = table(&[("NS_B:1", "NS_A:1"), ("NS_B:2", "NS_A:1"), ("NS_C:1", "NS_A:1")], &["NS_A"]);
        let pairs = namespace_pair_analysis(&merges).unwrap();
        assert_eq!(pairs[0].freq, 66.667);
        assert_eq!(pairs[1].freq, 33.333);
    }

    #[test]
    fn test_canonical_namespaces() {
        let canonical = canonical_namespace_analysis(&sample()).unwrap();
        assert_eq!(canonical.len(), 2);
        assert_eq!(canonical[0].target_namespace.as_deref(), Some("MONDO"));
        assert_eq!(canonical[0].count, 3);
        assert_eq!(
            canonical[0].source_namespaces,
            ["DOID", "NCIT"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()
        );
        assert_eq!(canonical[0].freq, 75.0);
        assert_eq!(canonical[1].target_namespace.as_deref(), Some("DOID"));
    }

    #[test]
    fn test_orphaned_rows_grouped_under_none() {
        let merges = table(&[("X:1", "X:2")], &["MONDO"]);
        let canonical = canonical_namespace_analysis(&merges).unwrap();
        assert_eq!(canonical.len(), 1);
        assert_eq!(canonical[0].target_namespace, None);
        assert_eq!(canonical[0].count, 2);
        assert!(cluster_size_analysis(&merges).is_empty());
    }

    #[test]
    fn test_cluster_sizes() {
        let sizes = cluster_size_analysis(&sample());
        assert_eq!(
            sizes,
            vec![
                ClusterSizeCount { cluster_size: 2, cluster_count: 2 },
                ClusterSizeCount { cluster_size: 3, cluster_count: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_table() {
        let empty = AggregatedMergeTable::default();
        assert!(namespace_pair_analysis(&empty).unwrap().is_empty());
        assert!(canonical_namespace_analysis(&empty).unwrap().is_empty());
        assert!(cluster_size_analysis(&empty).is_empty());
    }
}

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

//! Merge clusters: connected components of the merge graph.

use crate::graph::MergeGraph;
use crate::node::NodeId;
use crate::union_find::DisjointSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node ids asserted equivalent, directly or transitively.
///
/// Members are kept in the graph's first-appearance order, which is the
/// order the canonical selector walks them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeCluster {
    members: Vec<NodeId>,
}

impl MergeCluster {
    pub fn new(members: Vec<NodeId>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn into_members(self) -> Vec<NodeId> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.members.contains(id)
    }
}

impl MergeGraph {
    /// Connected components, one cluster per component.
    ///
    /// Every vertex lands in exactly one cluster. Clusters are ordered by the
    /// first appearance of their earliest member.
    pub fn clusters(&self) -> Vec<MergeCluster> {
        let mut sets = DisjointSet::new(self.vertex_count());
        for &(a, b) in self.edge_indices() {
            sets.union(a, b);
        }

        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut clusters: Vec<Vec<NodeId>> = Vec::new();
        for idx in 0..self.vertex_count() {
            let root = sets.find(idx);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[slot].push(self.vertex(idx).clone());
        }

        tracing::debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            clusters = clusters.len(),
            "Extracted merge clusters"
        );

        clusters.into_iter().map(MergeCluster::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn graph(pairs: &[(&str, &str)]) -> MergeGraph {
        let owned: Vec<(NodeId, NodeId)> = pairs
            .iter()
            .map(|(a, b)| (NodeId::from(*a), NodeId::from(*b)))
            .collect();
        MergeGraph::from_pairs(owned.iter().map(|(s, t)| (s, t)))
    }

    fn as_sets(clusters: &[MergeCluster]) -> Vec<BTreeSet<&str>> {
        clusters
            .iter()
            .map(|c| c.members().iter().map(|m| m.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_no_edges_no_clusters() {
        assert!(graph(&[]).clusters().is_empty());
    }

    #[test]
    fn test_chain_is_one_cluster() {
        let clusters = graph(&[("NS_A:1", "NS_B:1"), ("NS_B:1", "NS_C:1")]).clusters();
        assert_eq!(clusters.len(), 1);
        assert_eq!(
            clusters[0].members().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            vec!["NS_A:1", "NS_B:1", "NS_C:1"]
        );
    }

    #[test]
    fn test_direction_is_ignored() {
        // B -> A and C -> A connect through A even though no edge leaves A
        let clusters = graph(&[("NS_B:1", "NS_A:1"), ("NS_C:1", "NS_A:1"), ("NS_X:1", "NS_Y:1")]).clusters();
        assert_eq!(clusters.len(), 2);
        let sets = as_sets(&clusters);
        assert_eq!(sets[0], ["NS_A:1", "NS_B:1", "NS_C:1"].into_iter().collect::<BTreeSet<&str>>());
        assert_eq!(sets[1], ["NS_X:1", "NS_Y:1"].into_iter().collect::<BTreeSet<&str>>());
    }

    #[test]
    fn test_late_edge_joins_clusters() {
        let clusters = graph(&[
            ("NS_A:1", "NS_B:1"),
            ("NS_C:1", "NS_D:1"),
            ("NS_D:1", "NS_B:1"),
        ])
        .clusters();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 4);
    }

    #[test]
    fn test_every_vertex_in_exactly_one_cluster() {
        let g = graph(&[
            ("NS_A:1", "NS_B:1"),
            ("NS_C:1", "NS_C:1"),
            ("NS_D:1", "NS_E:1"),
            ("NS_E:1", "NS_A:1"),
        ]);
        let clusters = g.clusters();
        let total: usize = clusters.iter().map(|c| c.len()).sum();
        assert_eq!(total, g.vertex_count());
        for v in g.vertices() {
            assert_eq!(clusters.iter().filter(|c| c.contains(v)).count(), 1);
        }
    }
}

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

//! Undirected merge graph
//!
//! Built from directed `source -> target` merge pairs; direction is dropped.
//! Vertices are interned to dense indices in order of first appearance.

use crate::node::NodeId;
use std::collections::HashMap;

/// Undirected graph over node ids
#[derive(Debug, Clone, Default)]
pub struct MergeGraph {
    /// Vertex index -> node id, in first-appearance order
    vertices: Vec<NodeId>,
    /// Node id -> vertex index
    index: HashMap<NodeId, usize>,
    /// Undirected edges as vertex index pairs, duplicates kept
    edges: Vec<(usize, usize)>,
}

impl MergeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source_id, target_id)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a NodeId, &'a NodeId)>,
    {
        let mut graph = Self::new();
        for (source, target) in pairs {
            graph.add_edge(source, target);
        }
        graph
    }

    /// Get or insert a vertex
    pub fn add_vertex(&mut self, id: &NodeId) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertices.push(id.clone());
        self.index.insert(id.clone(), idx);
        idx
    }

    /// Add an undirected edge; self-pairs only insert the vertex
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId) {
        let ia = self.add_vertex(a);
        let ib = self.add_vertex(b);
        self.edges.push((ia, ib));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Vertices in first-appearance order
    pub fn vertices(&self) -> &[NodeId] {
        &self.vertices
    }

    pub(crate) fn vertex(&self, idx: usize) -> &NodeId {
        &self.vertices[idx]
    }

    pub(crate) fn edge_indices(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

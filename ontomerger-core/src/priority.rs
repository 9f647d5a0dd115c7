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

//! Default alignment priority order derived from the input nodes.

use crate::error::MergeResult;
use crate::node::NodeId;
use std::collections::HashMap;

/// Seed namespace first, then the other namespaces by descending node count
/// (ties by name).
pub fn produce_alignment_priority_order(seed_namespace: &str, nodes: &[NodeId]) -> MergeResult<Vec<String>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for node in nodes {
        *counts.entry(node.namespace()?).or_insert(0) += 1;
    }
    counts.remove(seed_namespace);

    let mut others: Vec<(&str, usize)> = counts.into_iter().collect();
    others.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut order = Vec::with_capacity(others.len() + 1);
    order.push(seed_namespace.to_string());
    order.extend(others.into_iter().map(|(ns, _)| ns.to_string()));
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn test_seed_first_then_by_frequency() {
        let nodes = ids(&[
            "MONDO:1", "DOID:1", "NCIT:1", "NCIT:2", "NCIT:3", "DOID:2", "ORPHA:1", "MEDDRA:1",
        ]);
        let order = produce_alignment_priority_order("MONDO", &nodes).unwrap();
        assert_eq!(order, vec!["MONDO", "NCIT", "DOID", "MEDDRA", "ORPHA"]);
    }

    #[test]
    fn test_seed_included_even_without_nodes() {
        let order = produce_alignment_priority_order("MONDO", &ids(&["DOID:1"])).unwrap();
        assert_eq!(order, vec!["MONDO", "DOID"]);
    }

    #[test]
    fn test_malformed_node_fails() {
        assert!(produce_alignment_priority_order("MONDO", &ids(&["MONDO1"])).is_err());
    }
}

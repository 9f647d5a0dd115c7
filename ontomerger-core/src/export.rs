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

//! Domain merge export: the aggregated merge table tagged with a relation
//! and a provenance label.

use crate::merge_table::AggregatedMergeTable;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Relation label of exported merges
pub const RELATION_MERGE: &str = "merge";

/// Provenance label of edges produced by the merger
pub const PROVENANCE_ONTO_MERGER: &str = "ONTO_MERGER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMergeRow {
    pub source_id: NodeId,
    pub target_id: Option<NodeId>,
    pub relation: String,
    pub provenance: String,
}

/// Project the merge table into domain merge rows, keeping its order
pub fn export_domain_merges(merges: &AggregatedMergeTable) -> Vec<DomainMergeRow> {
    merges
        .iter()
        .map(|row| DomainMergeRow {
            source_id: row.source_id.clone(),
            target_id: row.target_id.clone(),
            relation: RELATION_MERGE.to_string(),
            provenance: PROVENANCE_ONTO_MERGER.to_string(),
        })
        .collect()
}

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

//! Mapping edges accumulated across alignment steps
//!
//! Each alignment step merges some nodes onto an ontology. The resulting
//! `(source_id, target_id)` pairs are tagged with the step metadata and
//! appended to a [`MappingEdgeLog`]. The log is append-only: edges are never
//! removed, and the merge clusters are derived once from the full log at the
//! end of the run.

use crate::error::{MergeError, MergeResult};
use crate::node::NodeId;
use crate::partition::percentage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// "source_id was merged into target_id during this step"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEdge {
    pub source_id: NodeId,
    pub target_id: NodeId,
    /// Ontology being aligned against in this step
    pub source_id_aligned_to: String,
    /// 1-based alignment step number
    pub step_counter: u32,
    /// Mapping type group used in the step (e.g. "equivalence")
    pub mapping_type_group: String,
}

impl MappingEdge {
    pub fn new(
        source_id: NodeId,
        target_id: NodeId,
        source_id_aligned_to: impl Into<String>,
        step_counter: u32,
        mapping_type_group: impl Into<String>,
    ) -> MergeResult<Self> {
        if step_counter == 0 {
            return Err(MergeError::InvalidStep(step_counter));
        }
        Ok(Self {
            source_id,
            target_id,
            source_id_aligned_to: source_id_aligned_to.into(),
            step_counter,
            mapping_type_group: mapping_type_group.into(),
        })
    }
}

/// Report row for one alignment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStep {
    pub mapping_type_group: String,
    /// Ontology the step aligned onto
    pub source_id: String,
    pub step_counter: u32,
    /// Unmapped nodes before the step ran
    pub count_unmapped_nodes: usize,
    /// Mappings considered by the step
    pub count_mappings: usize,
    /// Distinct nodes merged by the step
    pub count_merged_nodes: usize,
}

impl AlignmentStep {
    pub fn new(mapping_type_group: impl Into<String>, source_id: impl Into<String>, step_counter: u32) -> Self {
        Self {
            mapping_type_group: mapping_type_group.into(),
            source_id: source_id.into(),
            step_counter,
            count_unmapped_nodes: 0,
            count_mappings: 0,
            count_merged_nodes: 0,
        }
    }

    pub fn with_unmapped_count(mut self, count: usize) -> Self {
        self.count_unmapped_nodes = count;
        self
    }

    pub fn with_mapping_count(mut self, count: usize) -> Self {
        self.count_mappings = count;
        self
    }
}

/// Append-only log of mapping edges, in step order.
///
/// Only serialized, never deserialized: edges enter through
/// [`record_alignment_step`](Self::record_alignment_step) or
/// [`push`](Self::push), which enforce the step order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingEdgeLog {
    edges: Vec<MappingEdge>,
    steps: Vec<AlignmentStep>,
}

impl MappingEdgeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the merges of one alignment step with its metadata and append them.
    ///
    /// The stored report row leaves the unmapped and mapping counts at 0; use
    /// [`record_alignment_step`](Self::record_alignment_step) to keep them.
    pub fn record_step(
        &mut self,
        merges: &[(NodeId, NodeId)],
        source_id_aligned_to: &str,
        step_counter: u32,
        mapping_type_group: &str,
    ) -> MergeResult<AlignmentStep> {
        self.record_alignment_step(
            AlignmentStep::new(mapping_type_group, source_id_aligned_to, step_counter),
            merges,
        )
    }

    /// Append the merges of `step` and store its report row.
    ///
    /// `count_merged_nodes` is computed from `merges`; the other counts are
    /// kept as the caller set them.
    pub fn record_alignment_step(
        &mut self,
        step: AlignmentStep,
        merges: &[(NodeId, NodeId)],
    ) -> MergeResult<AlignmentStep> {
        let step_counter = step.step_counter;
        if step_counter == 0 {
            return Err(MergeError::InvalidStep(step_counter));
        }
        if let Some(last) = self.last_step_counter() {
            if step_counter <= last {
                return Err(MergeError::StepOutOfOrder {
                    last,
                    got: step_counter,
                });
            }
        }

        let merged: HashSet<&NodeId> = merges.iter().map(|(source, _)| source).collect();
        let step = AlignmentStep {
            count_merged_nodes: merged.len(),
            ..step
        };

        self.edges.extend(merges.iter().map(|(source, target)| MappingEdge {
            source_id: source.clone(),
            target_id: target.clone(),
            source_id_aligned_to: step.source_id.clone(),
            step_counter,
            mapping_type_group: step.mapping_type_group.clone(),
        }));
        self.steps.push(step.clone());

        tracing::info!(
            step = step_counter,
            aligned_to = %step.source_id,
            mapping_type_group = %step.mapping_type_group,
            merges = merges.len(),
            unmapped_nodes = step.count_unmapped_nodes,
            mappings = step.count_mappings,
            merged_nodes = step.count_merged_nodes,
            "Recorded alignment step"
        );

        Ok(step)
    }

    /// Append a single pre-tagged edge. Its step may not precede the last
    /// recorded step, including steps that added no edges.
    pub fn push(&mut self, edge: MappingEdge) -> MergeResult<()> {
        if edge.step_counter == 0 {
            return Err(MergeError::InvalidStep(0));
        }
        if let Some(last) = self.last_step_counter() {
            if edge.step_counter < last {
                return Err(MergeError::StepOutOfOrder {
                    last,
                    got: edge.step_counter,
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn edges(&self) -> &[MappingEdge] {
        &self.edges
    }

    /// Step reports, one per `record_step` call
    pub fn steps(&self) -> &[AlignmentStep] {
        &self.steps
    }

    /// `(source_id, target_id)` pairs in log order
    pub fn pairs(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> + '_ {
        self.edges.iter().map(|e| (&e.source_id, &e.target_id))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn last_step_counter(&self) -> Option<u32> {
        let from_steps = self.steps.last().map(|s| s.step_counter);
        let from_edges = self.edges.last().map(|e| e.step_counter);
        from_steps.max(from_edges)
    }
}

/// Input nodes that are not the source of any merge, sorted ascending.
///
/// Used between alignment steps to find what is still left to align.
pub fn unmapped_nodes<'a, I>(nodes: &[NodeId], merges: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = (&'a NodeId, &'a NodeId)>,
{
    let merged: HashSet<&NodeId> = merges.into_iter().map(|(source, _)| source).collect();
    let input: BTreeSet<&NodeId> = nodes.iter().collect();
    let total = input.len();
    let unmapped: Vec<NodeId> = input
        .into_iter()
        .filter(|n| !merged.contains(n))
        .cloned()
        .collect();

    tracing::info!(
        "Out of {} nodes, {} ({:.2}%) are unmapped.",
        total,
        unmapped.len(),
        percentage(unmapped.len(), total)
    );

    unmapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(s: &str, t: &str) -> (NodeId, NodeId) {
        (NodeId::from(s), NodeId::from(t))
    }

    #[test]
    fn test_record_step_tags_edges() {
        let mut log = MappingEdgeLog::new();
        let step = log
            .record_step(
                &[pair("DOID:1", "MONDO:1"), pair("DOID:2", "MONDO:1")],
                "MONDO",
                1,
                "equivalence",
            )
            .unwrap();

        assert_eq!(step.step_counter, 1);
        assert_eq!(step.count_merged_nodes, 2);
        assert_eq!(log.len(), 2);
        assert!(log
            .edges()
            .iter()
            .all(|e| e.step_counter == 1 && e.source_id_aligned_to == "MONDO" && e.mapping_type_group == "equivalence"));
    }

    #[test]
    fn test_steps_must_increase() {
        let mut log = MappingEdgeLog::new();
        log.record_step(&[pair("DOID:1", "MONDO:1")], "MONDO", 2, "eqv").unwrap();

        let err = log.record_step(&[pair("NCIT:1", "DOID:2")], "DOID", 2, "eqv").unwrap_err();
        assert!(matches!(err, MergeError::StepOutOfOrder { last: 2, got: 2 }));

        let err = log.record_step(&[], "DOID", 0, "eqv").unwrap_err();
        assert!(matches!(err, MergeError::InvalidStep(0)));

        // failed steps leave the log untouched
        assert_eq!(log.len(), 1);
        assert_eq!(log.steps().len(), 1);
    }

    #[test]
    fn test_empty_step_is_recorded() {
        let mut log = MappingEdgeLog::new();
        let step = log.record_step(&[], "MONDO", 1, "eqv").unwrap();
        assert_eq!(step.count_merged_nodes, 0);
        assert!(log.is_empty());
        assert_eq!(log.steps().len(), 1);
    }

    #[test]
    fn test_push_rejects_earlier_step() {
        let mut log = MappingEdgeLog::new();
        let late = MappingEdge::new("A:1".into(), "B:1".into(), "B", 3, "eqv").unwrap();
        let early = MappingEdge::new("A:2".into(), "B:1".into(), "B", 1, "eqv").unwrap();
        log.push(late).unwrap();
        assert!(matches!(log.push(early), Err(MergeError::StepOutOfOrder { last: 3, got: 1 })));
        assert!(MappingEdge::new("A:1".into(), "B:1".into(), "B", 0, "eqv").is_err());
    }

    #[test]
    fn test_push_rejects_step_before_empty_recorded_step() {
        let mut log = MappingEdgeLog::new();
        log.record_step(&[], "MONDO", 5, "eqv").unwrap();

        let early = MappingEdge::new("A:1".into(), "B:1".into(), "B", 2, "eqv").unwrap();
        assert!(matches!(log.push(early), Err(MergeError::StepOutOfOrder { last: 5, got: 2 })));
        assert!(log.is_empty());

        let same = MappingEdge::new("A:1".into(), "B:1".into(), "B", 5, "eqv").unwrap();
        log.push(same).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_deserialized_edge_is_still_validated() {
        let edge: MappingEdge = serde_json::from_str(
            r#"{"source_id":"A:1","target_id":"B:1","source_id_aligned_to":"B","step_counter":0,"mapping_type_group":"eqv"}"#,
        )
        .unwrap();
        let mut log = MappingEdgeLog::new();
        assert!(matches!(log.push(edge), Err(MergeError::InvalidStep(0))));
        assert!(log.is_empty());
    }

    #[test]
    fn test_stored_step_keeps_caller_counts() {
        let mut log = MappingEdgeLog::new();
        let step = AlignmentStep::new("equivalence", "MONDO", 1)
            .with_unmapped_count(40)
            .with_mapping_count(12);
        let returned = log
            .record_alignment_step(step, &[pair("DOID:1", "MONDO:1"), pair("DOID:1", "MONDO:2")])
            .unwrap();

        let stored = &log.steps()[0];
        assert_eq!(stored, &returned);
        assert_eq!(stored.count_unmapped_nodes, 40);
        assert_eq!(stored.count_mappings, 12);
        assert_eq!(stored.count_merged_nodes, 1);
        assert_eq!(stored.source_id, "MONDO");
        assert!(log.edges().iter().all(|e| e.source_id_aligned_to == "MONDO" && e.mapping_type_group == "equivalence"));

        let err = log
            .record_alignment_step(AlignmentStep::new("equivalence", "DOID", 1), &[])
            .unwrap_err();
        assert!(matches!(err, MergeError::StepOutOfOrder { last: 1, got: 1 }));
        assert_eq!(log.steps().len(), 1);
    }

    #[test]
    fn test_unmapped_nodes_with_duplicate_input() {
        let nodes: Vec<NodeId> = ["NS_A:1", "NS_A:1", "NS_B:1"].iter().map(|s| NodeId::from(*s)).collect();
        let merges = vec![pair("NS_B:1", "NS_A:1")];
        let unmapped = unmapped_nodes(&nodes, merges.iter().map(|(s, t)| (s, t)));
        assert_eq!(unmapped, vec![NodeId::from("NS_A:1")]);
    }

    #[test]
    fn test_alignment_step_builder() {
        let step = AlignmentStep::new("eqv", "FOO", 1)
            .with_unmapped_count(100)
            .with_mapping_count(7);
        assert_eq!(step.count_unmapped_nodes, 100);
        assert_eq!(step.count_mappings, 7);
        assert_eq!(step.count_merged_nodes, 0);
    }

    #[test]
    fn test_unmapped_nodes() {
        let nodes: Vec<NodeId> = ["NS_A:1", "NS_B:1", "NS_C:1", "NS_D:1"].iter().map(|s| NodeId::from(*s)).collect();
        let merges = vec![pair("NS_B:1", "NS_A:1"), pair("NS_D:1", "NS_A:1")];
        let unmapped = unmapped_nodes(&nodes, merges.iter().map(|(s, t)| (s, t)));
        assert_eq!(unmapped, vec![NodeId::from("NS_A:1"), NodeId::from("NS_C:1")]);
    }
}

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

//! Canonical node selection
//!
//! Each merge cluster is represented going forward by a single canonical
//! node: the member whose namespace ranks highest in the alignment priority
//! order. A cluster with no member in any priority namespace has no canonical
//! node; that is an observable outcome, not an error.

use crate::cluster::MergeCluster;
use crate::error::MergeResult;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which member represents a namespace when a cluster holds several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Last member in cluster order wins (compatible with the historical
    /// merge tables)
    #[default]
    LastWins,
    /// Lexicographically smallest member id wins, independent of order
    LexicographicMin,
}

/// Picks the canonical node of a cluster by namespace priority
#[derive(Debug, Clone)]
pub struct CanonicalSelector {
    /// Namespaces, most preferred first
    priority_order: Vec<String>,
    tie_break: TieBreak,
}

impl CanonicalSelector {
    pub fn new(priority_order: &[String], tie_break: TieBreak) -> Self {
        Self {
            priority_order: priority_order.to_vec(),
            tie_break,
        }
    }

    pub fn priority_order(&self) -> &[String] {
        &self.priority_order
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Canonical node for `cluster`, or `None` if no member's namespace is
    /// in the priority order.
    ///
    /// Fails if any member id has no namespace.
    pub fn select(&self, cluster: &MergeCluster) -> MergeResult<Option<NodeId>> {
        let mut by_namespace: HashMap<&str, &NodeId> = HashMap::with_capacity(cluster.len());
        for member in cluster.members() {
            let ns = member.namespace()?;
            match self.tie_break {
                TieBreak::LastWins => {
                    by_namespace.insert(ns, member);
                }
                TieBreak::LexicographicMin => {
                    by_namespace
                        .entry(ns)
                        .and_modify(|current| {
                            if member < *current {
                                *current = member;
                            }
                        })
                        .or_insert(member);
                }
            }
        }

        Ok(self
            .priority_order
            .iter()
            .find_map(|ns| by_namespace.get(ns.as_str()))
            .map(|id| (*id).clone()))
    }

    /// Resolve the canonical node of every cluster
    pub fn resolve(&self, clusters: Vec<MergeCluster>) -> MergeResult<Vec<(MergeCluster, Option<NodeId>)>> {
        clusters
            .into_iter()
            .map(|cluster| {
                let canonical = self.select(&cluster)?;
                Ok((cluster, canonical))
            })
            .collect()
    }
}

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

//! Merge resolution configuration
//!
//! The seed ontology and the alignment priority order are fixed for a run and
//! passed explicitly into every stage that needs them.

use crate::canonical::{CanonicalSelector, TieBreak};
use crate::error::{MergeError, MergeResult};
use crate::node::NAMESPACE_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a merge resolution run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Namespace of the seed ontology (e.g. "MONDO")
    pub seed_ontology_name: String,

    /// Namespaces, most preferred first. Usually starts with the seed.
    pub alignment_priority_order: Vec<String>,

    /// How to pick among several members of one namespace in a cluster
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl MergeConfig {
    pub fn new(seed_ontology_name: impl Into<String>, alignment_priority_order: Vec<String>) -> Self {
        Self {
            seed_ontology_name: seed_ontology_name.into(),
            alignment_priority_order,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MergeResult<()> {
        check_namespace(&self.seed_ontology_name, "seed_ontology_name")?;

        if self.alignment_priority_order.is_empty() {
            return Err(MergeError::ConfigError(
                "alignment_priority_order must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for ns in &self.alignment_priority_order {
            check_namespace(ns, "alignment_priority_order")?;
            if !seen.insert(ns.as_str()) {
                return Err(MergeError::ConfigError(format!(
                    "duplicate namespace in alignment_priority_order: {}",
                    ns
                )));
            }
        }

        if !seen.contains(self.seed_ontology_name.as_str()) {
            tracing::warn!(
                seed = %self.seed_ontology_name,
                "Seed ontology is not in the alignment priority order"
            );
        }

        Ok(())
    }

    /// Canonical selector for this configuration
    pub fn selector(&self) -> CanonicalSelector {
        CanonicalSelector::new(&self.alignment_priority_order, self.tie_break)
    }
}

fn check_namespace(ns: &str, field: &str) -> MergeResult<()> {
    if ns.trim().is_empty() {
        return Err(MergeError::ConfigError(format!("{} contains an empty namespace", field)));
    }
    if ns.contains(NAMESPACE_SEPARATOR) {
        return Err(MergeError::ConfigError(format!(
            "{}: namespace {:?} contains the separator {:?}",
            field, ns, NAMESPACE_SEPARATOR
        )));
    }
    Ok(())
}

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

//! Node identifiers
//!
//! A node id encodes the ontology it comes from as a `NAMESPACE:local-id`
//! prefix, e.g. `MONDO:0000001` or `DOID:1612`.

use crate::error::{MergeError, MergeResult};
use serde::{Deserialize, Serialize};

/// Separator between namespace and local id
pub const NAMESPACE_SEPARATOR: char = ':';

/// Opaque node identifier, ordered lexicographically
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace (source ontology) encoded in this id
    pub fn namespace(&self) -> MergeResult<&str> {
        namespace_of(&self.0)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the namespace prefix of a node id.
///
/// Fails when there is no separator or the prefix is empty; a guessed
/// namespace would corrupt priority comparisons.
pub fn namespace_of(node_id: &str) -> MergeResult<&str> {
    match node_id.split_once(NAMESPACE_SEPARATOR) {
        Some((ns, _)) if !ns.is_empty() => Ok(ns),
        _ => Err(MergeError::MalformedNodeId(node_id.to_string())),
    }
}

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

//! Merge resolution error types
//!
//! Every error here is fatal to the run: the merge table is a precondition for
//! all downstream stages, so there is no degraded continuation.

use thiserror::Error;

/// Result type for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while resolving merges
#[derive(Debug, Error)]
pub enum MergeError {
    /// Node identifier has no namespace prefix
    #[error("Malformed node id (expected NAMESPACE:local-id): {0:?}")]
    MalformedNodeId(String),

    /// Alignment step counters start at 1
    #[error("Invalid alignment step counter: {0} (must be >= 1)")]
    InvalidStep(u32),

    /// Alignment steps must be recorded in increasing order
    #[error("Alignment step {got} recorded after step {last}")]
    StepOutOfOrder { last: u32, got: u32 },

    /// Node partitions are not disjoint or not exhaustive
    #[error("Inconsistent node partitions: {0}")]
    InconsistentPartitions(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for MergeError {
    fn from(e: toml::de::Error) -> Self {
        MergeError::ConfigError(e.to_string())
    }
}

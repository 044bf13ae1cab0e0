//! Error types for shuffle-budget-core.
//!
//! Planning has exactly two failure kinds, both invariant violations in
//! the caller's inputs rather than runtime conditions. Planning is pure,
//! so retrying with the same inputs reproduces the same error.
//!
//! Option parsing has its own [`ConfigError`].

use std::fmt;

use crate::edge::EdgeId;
use crate::partition::PartitionKind;

/// What is wrong with one edge's descriptor data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDataIssue {
    /// The edge has a count entry but no partition kind.
    MissingPartitionKind,
    /// An input edge has a channel count but no reuse count.
    MissingReuseCount,
    /// An output edge declares fewer than one subpartition.
    ZeroSubpartitions,
    /// An input edge declares fewer than one channel.
    ZeroInputChannels,
}

impl fmt::Display for EdgeDataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EdgeDataIssue::MissingPartitionKind => "missing partition kind",
            EdgeDataIssue::MissingReuseCount => "missing partition reuse count",
            EdgeDataIssue::ZeroSubpartitions => "subpartition count must be at least 1",
            EdgeDataIssue::ZeroInputChannels => "input channel count must be at least 1",
        };
        f.write_str(msg)
    }
}

/// Unified error type for planning operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    /// An edge's descriptor data is incomplete or out of range.
    #[error("Invalid edge data for {edge}: {reason}")]
    InvalidEdgeData { edge: EdgeId, reason: EdgeDataIssue },

    /// A pipeline-consumable partition selected an unbounded pool size.
    #[error("Unbounded announcement{}: partition kind {kind} has no finite buffer ceiling", edge_suffix(.edge))]
    UnboundedAnnouncement {
        edge: Option<EdgeId>,
        kind: PartitionKind,
    },
}

fn edge_suffix(edge: &Option<EdgeId>) -> String {
    match edge {
        Some(edge) => format!(" for {edge}"),
        None => String::new(),
    }
}

impl PlannerError {
    /// The edge the error was raised for, when known.
    pub fn edge(&self) -> Option<EdgeId> {
        match self {
            PlannerError::InvalidEdgeData { edge, .. } => Some(*edge),
            PlannerError::UnboundedAnnouncement { edge, .. } => *edge,
        }
    }

    /// Attach an edge to an error raised without one.
    pub(crate) fn on_edge(self, at: EdgeId) -> Self {
        match self {
            PlannerError::UnboundedAnnouncement { edge: None, kind } => {
                PlannerError::UnboundedAnnouncement {
                    edge: Some(at),
                    kind,
                }
            }
            other => other,
        }
    }
}

/// Errors raised while reading tuning options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The value is not an unsigned integer.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// The value parses but is below the allowed minimum.
    #[error("Value for {key} out of range: {value} < {min}")]
    OutOfRange { key: String, value: u64, min: u64 },

    /// The name is not one of the known partition kinds.
    #[error("Unknown partition kind: {0:?}")]
    UnknownPartitionKind(String),
}

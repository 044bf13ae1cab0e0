//! Task input/output descriptors.
//!
//! A task's edges arrive as parallel maps keyed by [`EdgeId`], the shape
//! the deployment descriptor carries them in. Edges are enumerated from
//! the count maps (`channel_counts` for inputs, `subpartition_counts` for
//! outputs); [`InputEdges::resolve`] and [`OutputEdges::resolve`] join the
//! maps into typed edges and reject incomplete or out-of-range entries.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::edge::EdgeId;
use crate::errors::{EdgeDataIssue, PlannerError};
use crate::partition::PartitionKind;

/// One resolved input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdge {
    pub edge: EdgeId,
    pub kind: PartitionKind,
    /// Physical upstream connections feeding the gate.
    pub channels: NonZeroU32,
    /// Upstream partitions consumed through this edge over its lifetime.
    /// Zero is allowed and contributes nothing.
    pub reuse_count: u32,
}

/// One resolved output edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEdge {
    pub edge: EdgeId,
    pub kind: PartitionKind,
    /// Fan-out to downstream consumers.
    pub subpartitions: NonZeroU32,
}

/// Input side of a task descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct InputEdges {
    pub channel_counts: BTreeMap<EdgeId, u32>,
    pub reuse_counts: BTreeMap<EdgeId, u32>,
    pub partition_kinds: BTreeMap<EdgeId, PartitionKind>,
}

impl InputEdges {
    /// An empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an input edge in all three maps.
    pub fn with_edge(
        mut self,
        edge: EdgeId,
        kind: PartitionKind,
        channels: u32,
        reuse_count: u32,
    ) -> Self {
        self.channel_counts.insert(edge, channels);
        self.reuse_counts.insert(edge, reuse_count);
        self.partition_kinds.insert(edge, kind);
        self
    }

    /// Number of edges, counted from the count map.
    pub fn len(&self) -> usize {
        self.channel_counts.len()
    }

    /// `true` when the count map has no edges.
    pub fn is_empty(&self) -> bool {
        self.channel_counts.is_empty()
    }

    /// Join the maps into typed edges, in edge order.
    ///
    /// # Errors
    ///
    /// [`PlannerError::InvalidEdgeData`] for the first edge with a missing
    /// kind, a zero channel count, or a missing reuse count.
    pub fn resolve(&self) -> Result<Vec<InputEdge>, PlannerError> {
        self.channel_counts
            .iter()
            .map(|(&edge, &channels)| -> Result<InputEdge, PlannerError> {
                let invalid = |reason| PlannerError::InvalidEdgeData { edge, reason };
                let kind = *self
                    .partition_kinds
                    .get(&edge)
                    .ok_or_else(|| invalid(EdgeDataIssue::MissingPartitionKind))?;
                let channels = NonZeroU32::new(channels)
                    .ok_or_else(|| invalid(EdgeDataIssue::ZeroInputChannels))?;
                let reuse_count = *self
                    .reuse_counts
                    .get(&edge)
                    .ok_or_else(|| invalid(EdgeDataIssue::MissingReuseCount))?;
                Ok(InputEdge {
                    edge,
                    kind,
                    channels,
                    reuse_count,
                })
            })
            .collect()
    }
}

/// Output side of a task descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OutputEdges {
    pub subpartition_counts: BTreeMap<EdgeId, u32>,
    pub partition_kinds: BTreeMap<EdgeId, PartitionKind>,
}

impl OutputEdges {
    /// An empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an output edge in both maps.
    pub fn with_edge(mut self, edge: EdgeId, kind: PartitionKind, subpartitions: u32) -> Self {
        self.subpartition_counts.insert(edge, subpartitions);
        self.partition_kinds.insert(edge, kind);
        self
    }

    /// Number of edges, counted from the count map.
    pub fn len(&self) -> usize {
        self.subpartition_counts.len()
    }

    /// `true` when the count map has no edges.
    pub fn is_empty(&self) -> bool {
        self.subpartition_counts.is_empty()
    }

    /// Join the maps into typed edges, in edge order.
    ///
    /// # Errors
    ///
    /// [`PlannerError::InvalidEdgeData`] for the first edge with a missing
    /// kind or a zero subpartition count.
    pub fn resolve(&self) -> Result<Vec<OutputEdge>, PlannerError> {
        self.subpartition_counts
            .iter()
            .map(|(&edge, &subpartitions)| -> Result<OutputEdge, PlannerError> {
                let invalid = |reason| PlannerError::InvalidEdgeData { edge, reason };
                let kind = *self
                    .partition_kinds
                    .get(&edge)
                    .ok_or_else(|| invalid(EdgeDataIssue::MissingPartitionKind))?;
                let subpartitions = NonZeroU32::new(subpartitions)
                    .ok_or_else(|| invalid(EdgeDataIssue::ZeroSubpartitions))?;
                Ok(OutputEdge {
                    edge,
                    kind,
                    subpartitions,
                })
            })
            .collect()
    }
}

/// Everything the planner needs to know about one task's edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TaskIoDescriptor {
    pub inputs: InputEdges,
    pub outputs: OutputEdges,
}

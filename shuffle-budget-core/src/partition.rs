//! Partition kinds: the closed set of shuffle semantics.
//!
//! Every budgeting decision branches on three predicates derived from the
//! kind. Each kind falls into exactly one class:
//!
//! | Kind | bounded | blocking-like | pipeline-consumable |
//! |------|---------|---------------|---------------------|
//! | `Pipelined` | no | no | yes |
//! | `PipelinedBounded` | yes | no | yes |
//! | `PipelinedApproximate` | no | no | yes |
//! | `Blocking` | no | yes | no |
//! | `BlockingPersistent` | no | yes | no |

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Shuffle semantics of one result partition or input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum PartitionKind {
    /// Streamed live with an unbounded local pool.
    Pipelined,
    /// Streamed live with a pool sized from the fan-out.
    PipelinedBounded,
    /// Streamed live, tolerating data loss on failover.
    PipelinedApproximate,
    /// Fully produced before consumption.
    Blocking,
    /// Blocking, and kept beyond the job that produced it.
    BlockingPersistent,
}

impl PartitionKind {
    /// Every kind, in declaration order.
    pub const ALL: [PartitionKind; 5] = [
        PartitionKind::Pipelined,
        PartitionKind::PipelinedBounded,
        PartitionKind::PipelinedApproximate,
        PartitionKind::Blocking,
        PartitionKind::BlockingPersistent,
    ];

    /// `true` when the local pool has a finite ceiling derivable from the
    /// subpartition count.
    pub const fn is_bounded(self) -> bool {
        matches!(self, PartitionKind::PipelinedBounded)
    }

    /// `true` for backpressure-free kinds whose data is persisted or
    /// spilled rather than flow-controlled.
    pub const fn is_blocking_like(self) -> bool {
        matches!(
            self,
            PartitionKind::Blocking | PartitionKind::BlockingPersistent
        )
    }

    /// `true` when consumers read live, so floating buffers may be held
    /// for as long as a consumer is backpressured.
    pub const fn can_be_pipelined_consumed(self) -> bool {
        matches!(
            self,
            PartitionKind::Pipelined
                | PartitionKind::PipelinedBounded
                | PartitionKind::PipelinedApproximate
        )
    }

    /// Canonical cluster name, e.g. `PIPELINED_BOUNDED`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PartitionKind::Pipelined => "PIPELINED",
            PartitionKind::PipelinedBounded => "PIPELINED_BOUNDED",
            PartitionKind::PipelinedApproximate => "PIPELINED_APPROXIMATE",
            PartitionKind::Blocking => "BLOCKING",
            PartitionKind::BlockingPersistent => "BLOCKING_PERSISTENT",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionKind {
    type Err = ConfigError;

    /// Parses a cluster name. Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PartitionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownPartitionKind(s.to_string()))
    }
}

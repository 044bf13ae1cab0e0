//! Result-partition buffer bounds.
//!
//! A result partition's local pool may be sized anywhere between a
//! minimum and a maximum number of buffers. Both derive from the
//! partition kind, its fan-out, and the tuning constants:
//!
//! - blocking-like partitions at or above `sort_shuffle_min_parallelism`
//!   subpartitions use sort-shuffle: one shared pool of
//!   `sort_shuffle_min_buffers` up to `4 * subpartitions`, independent of
//!   per-channel settings;
//! - every other partition needs at least `subpartitions + 1` buffers, so
//!   each subpartition owns one buffer even when `buffers_per_channel` is
//!   zero;
//! - bounded pipelined partitions cap at
//!   `subpartitions * buffers_per_channel + floating_buffers_per_gate`;
//! - the rest have no finite ceiling.

use std::num::NonZeroU32;

use crate::config::TuningConstants;
use crate::constants::SORT_SHUFFLE_MAX_BUFFERS_PER_SUBPARTITION;
use crate::partition::PartitionKind;

/// Smallest and largest pool size a partition or gate may be given.
///
/// `max == None` is the unbounded sentinel. Otherwise `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawBufferBounds")
)]
pub struct BufferBounds {
    min: u64,
    max: Option<u64>,
}

/// Wire shape of [`BufferBounds`]; deserialized values go through
/// [`BufferBounds::new`] so the ceiling is floored at the minimum.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBufferBounds {
    min: u64,
    max: Option<u64>,
}

#[cfg(feature = "serde")]
impl From<RawBufferBounds> for BufferBounds {
    fn from(raw: RawBufferBounds) -> Self {
        match raw.max {
            Some(max) => BufferBounds::new(raw.min, max),
            None => BufferBounds::unbounded(raw.min),
        }
    }
}

impl BufferBounds {
    /// Bounds with a finite ceiling, floored at `min`.
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min,
            max: Some(max.max(min)),
        }
    }

    /// Bounds with no finite ceiling.
    pub fn unbounded(min: u64) -> Self {
        Self { min, max: None }
    }

    /// The floor: buffers the pool cannot be created without.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// The ceiling, or `None` when unbounded.
    pub fn max(&self) -> Option<u64> {
        self.max
    }

    /// `true` for the unbounded sentinel.
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

/// `true` when a partition of `kind` with `subpartitions` fan-out is
/// written through the shared sort-shuffle pool.
pub fn is_sort_shuffle(
    kind: PartitionKind,
    subpartitions: NonZeroU32,
    constants: &TuningConstants,
) -> bool {
    kind.is_blocking_like() && subpartitions.get() >= constants.sort_shuffle_min_parallelism
}

/// Derive the pool bounds of one result partition.
pub fn bounds_for_result_partition(
    kind: PartitionKind,
    subpartitions: NonZeroU32,
    constants: &TuningConstants,
) -> BufferBounds {
    let sort_shuffle = is_sort_shuffle(kind, subpartitions, constants);
    let subpartitions = u64::from(subpartitions.get());

    let min = if sort_shuffle {
        u64::from(constants.sort_shuffle_min_buffers)
    } else {
        subpartitions + 1
    };

    if kind.is_bounded() {
        BufferBounds::new(
            min,
            subpartitions * u64::from(constants.buffers_per_channel)
                + u64::from(constants.floating_buffers_per_gate),
        )
    } else if sort_shuffle {
        BufferBounds::new(
            min,
            SORT_SHUFFLE_MAX_BUFFERS_PER_SUBPARTITION * subpartitions,
        )
    } else {
        BufferBounds::unbounded(min)
    }
}

//! Buffer-pool footprint model.
//!
//! Models the pools the shuffle environment creates for a task at the
//! bounds this crate computes, and how many buffers each of them can hold
//! at peak:
//!
//! - an input gate holds its channels' exclusive buffers plus the whole
//!   floating pool;
//! - a pipeline-consumable result partition can grow to its pool maximum;
//! - a blocking-like result partition only ever keeps its required
//!   buffers, the rest are recycled.
//!
//! [`verify_fit`] compares that peak with the announcement. The
//! announcement is correct only if it is never smaller.
//!
//! Gate footprints are read off the pool layout (channel exclusive shares
//! plus floating pool bounds), not off the announced gate requirement. With
//! the default gate policy the two agree, so [`verify_fit`] is a
//! consistency check between layout and announcement;
//! [`verify_fit_with_policy`] checks any other policy against the same
//! layout. Counts saturate at `u64::MAX` on both sides.

use crate::announce::{compute_total_announcement_with_policy, Direction};
use crate::bounds::{bounds_for_result_partition, BufferBounds};
use crate::config::TuningConstants;
use crate::descriptor::{InputEdge, InputEdges, OutputEdge, OutputEdges};
use crate::edge::EdgeId;
use crate::errors::PlannerError;
use crate::gate::{
    gate_buffers_spec, network_buffers_per_input_channel, DefaultGatePolicy,
    GateRequirementPolicy,
};

/// Peak buffer usage of one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolFootprint {
    pub edge: EdgeId,
    pub direction: Direction,
    /// Bounds the pool is created with.
    pub bounds: BufferBounds,
    /// Buffers held outside the pool, pinned to channels.
    pub exclusive_buffers: u64,
    /// Most buffers the pool and its channels hold at once, or `None`
    /// when the pool can grow without limit.
    pub peak_buffers: Option<u64>,
}

/// Announcement versus modelled peak usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitReport {
    pub announced: u64,
    /// `None` when some pool is unbounded.
    pub footprint: Option<u64>,
}

impl FitReport {
    /// `true` when the announcement covers every pool at peak.
    pub fn fits(&self) -> bool {
        self.footprint
            .is_some_and(|footprint| self.announced >= footprint)
    }
}

/// Footprint of the gates created for one input edge. Each reused upstream
/// partition gets its own gate.
///
/// Channels pin `buffers_per_channel` buffers each only while the gate's
/// required count leaves the floating pool at least one buffer. A gate
/// never holds fewer than its required buffers.
pub fn gate_footprint(edge: &InputEdge, constants: &TuningConstants) -> PoolFootprint {
    let spec = gate_buffers_spec(edge.kind, edge.channels, constants);
    let channels = u64::from(edge.channels.get());
    let pinned = channels
        * u64::from(network_buffers_per_input_channel(
            constants.buffers_per_channel,
        ));
    let exclusive_buffers = if spec.required_buffers > pinned {
        pinned
    } else {
        0
    };
    let bounds = spec.floating_pool_bounds(edge.channels);
    let per_gate = bounds
        .max()
        .map(|max| (exclusive_buffers + max).max(spec.required_buffers));
    PoolFootprint {
        edge: edge.edge,
        direction: Direction::Input,
        bounds,
        exclusive_buffers,
        peak_buffers: per_gate.map(|peak| peak.saturating_mul(u64::from(edge.reuse_count))),
    }
}

/// Footprint of the pool created for one result partition.
pub fn result_partition_footprint(
    edge: &OutputEdge,
    constants: &TuningConstants,
) -> PoolFootprint {
    let bounds = bounds_for_result_partition(edge.kind, edge.subpartitions, constants);
    let peak_buffers = if edge.kind.can_be_pipelined_consumed() {
        bounds.max()
    } else {
        Some(bounds.min())
    };
    PoolFootprint {
        edge: edge.edge,
        direction: Direction::Output,
        bounds,
        exclusive_buffers: 0,
        peak_buffers,
    }
}

/// Footprints of every pool a task creates, inputs first.
pub fn task_footprint(
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<Vec<PoolFootprint>, PlannerError> {
    let mut pools: Vec<_> = inputs
        .resolve()?
        .iter()
        .map(|edge| gate_footprint(edge, constants))
        .collect();
    pools.extend(
        outputs
            .resolve()?
            .iter()
            .map(|edge| result_partition_footprint(edge, constants)),
    );
    Ok(pools)
}

/// Check that the announcement covers the task's pools at peak.
///
/// # Errors
///
/// Whatever [`crate::compute_total_announcement`] raises for the same inputs.
pub fn verify_fit(
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<FitReport, PlannerError> {
    verify_fit_with_policy(&DefaultGatePolicy, constants, inputs, outputs)
}

/// [`verify_fit`] for an announcement planned with a caller-supplied gate
/// policy. Pools are always laid out by the default gate layout.
///
/// # Errors
///
/// Whatever [`compute_total_announcement_with_policy`] raises for the same
/// inputs.
pub fn verify_fit_with_policy<P>(
    policy: &P,
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<FitReport, PlannerError>
where
    P: GateRequirementPolicy + ?Sized,
{
    let announced = compute_total_announcement_with_policy(policy, constants, inputs, outputs)?;
    let footprint = task_footprint(constants, inputs, outputs)?
        .iter()
        .try_fold(0u64, |total, pool| {
            pool.peak_buffers.map(|peak| total.saturating_add(peak))
        });
    if footprint.map_or(true, |footprint| footprint > announced) {
        tracing::warn!(announced, ?footprint, "announcement does not cover pool footprint");
    }
    Ok(FitReport {
        announced,
        footprint,
    })
}

//! Input-gate buffer requirement.
//!
//! The aggregator treats the per-gate requirement as an external policy
//! behind [`GateRequirementPolicy`]. Any implementation must be
//! monotonically non-decreasing in the channel count and must not exceed
//! a configured `max_required_buffers_per_gate`.
//!
//! [`DefaultGatePolicy`] sizes a gate as follows:
//!
//! - required buffers: `channels * buffers_per_channel + 1`, limited by
//!   the configured cap, or by 1000 for blocking-like inputs when no cap
//!   is set;
//! - target total: `channels * buffers_per_channel + floating`, never
//!   below the required count and never above a configured cap;
//! - channels keep `buffers_per_channel` exclusive buffers only when the
//!   required count covers all of them plus one floating buffer,
//!   otherwise every buffer floats. Either way the floating pool requires
//!   at least one buffer.

use std::num::NonZeroU32;

use crate::bounds::BufferBounds;
use crate::config::TuningConstants;
use crate::constants::{
    DEFAULT_MAX_REQUIRED_BUFFERS_PER_GATE_FOR_BATCH,
    DEFAULT_MAX_REQUIRED_BUFFERS_PER_GATE_FOR_STREAM,
};
use crate::partition::PartitionKind;

/// Buffer layout of one input gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateBuffersSpec {
    /// Buffers pinned to each input channel.
    pub exclusive_buffers_per_channel: u64,
    /// Buffers the gate cannot run without.
    pub required_buffers: u64,
    /// Ceiling of the gate's floating pool.
    pub total_floating_buffers: u64,
    /// Exclusive plus floating buffers at full size.
    pub target_total_buffers: u64,
}

impl GateBuffersSpec {
    /// Floating buffers included in [`Self::required_buffers`].
    pub fn required_floating_buffers(&self, channels: NonZeroU32) -> u64 {
        self.required_buffers
            .saturating_sub(u64::from(channels.get()) * self.exclusive_buffers_per_channel)
    }

    /// Bounds of the gate's floating pool.
    pub fn floating_pool_bounds(&self, channels: NonZeroU32) -> BufferBounds {
        BufferBounds::new(
            self.required_floating_buffers(channels),
            self.total_floating_buffers,
        )
    }
}

/// Computes the single-gate requirement announced for an input edge.
pub trait GateRequirementPolicy {
    /// Buffers one gate of `kind` with `channels` input channels needs. Must
    /// not decrease as `channels` grows, must stay within a configured
    /// `max_required_buffers_per_gate`, and is always a finite count.
    fn gate_requirement(
        &self,
        kind: PartitionKind,
        channels: NonZeroU32,
        constants: &TuningConstants,
    ) -> u64;
}

impl<F> GateRequirementPolicy for F
where
    F: Fn(PartitionKind, NonZeroU32, &TuningConstants) -> u64,
{
    fn gate_requirement(
        &self,
        kind: PartitionKind,
        channels: NonZeroU32,
        constants: &TuningConstants,
    ) -> u64 {
        self(kind, channels, constants)
    }
}

/// The built-in gate policy: announces [`GateBuffersSpec::target_total_buffers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultGatePolicy;

impl GateRequirementPolicy for DefaultGatePolicy {
    fn gate_requirement(
        &self,
        kind: PartitionKind,
        channels: NonZeroU32,
        constants: &TuningConstants,
    ) -> u64 {
        gate_buffers_spec(kind, channels, constants).target_total_buffers
    }
}

/// Exclusive buffers each input channel is given.
pub fn network_buffers_per_input_channel(configured_buffers_per_channel: u32) -> u32 {
    configured_buffers_per_channel
}

/// Floating pool bounds of a gate when sized from the floating count
/// alone. At least one floating buffer is kept for local channel state
/// recovery.
pub fn floating_buffers_bounds_per_input_gate(floating_buffers_per_gate: u32) -> BufferBounds {
    BufferBounds::new(1, u64::from(floating_buffers_per_gate))
}

/// Required-buffer threshold in effect for a gate reading `kind`.
pub fn effective_max_required_buffers_per_gate(
    kind: PartitionKind,
    constants: &TuningConstants,
) -> u64 {
    match constants.max_required_buffers_per_gate {
        Some(cap) => u64::from(cap),
        None if kind.can_be_pipelined_consumed() => DEFAULT_MAX_REQUIRED_BUFFERS_PER_GATE_FOR_STREAM,
        None => DEFAULT_MAX_REQUIRED_BUFFERS_PER_GATE_FOR_BATCH,
    }
}

/// Lay out the buffers of one input gate with `channels` input channels.
pub fn gate_buffers_spec(
    kind: PartitionKind,
    channels: NonZeroU32,
    constants: &TuningConstants,
) -> GateBuffersSpec {
    let channels = u64::from(channels.get());
    let per_channel = u64::from(network_buffers_per_input_channel(
        constants.buffers_per_channel,
    ));
    let all_exclusive = channels * per_channel;

    let threshold = effective_max_required_buffers_per_gate(kind, constants);
    let required_buffers = threshold.min(all_exclusive + 1);

    let uncapped_total = all_exclusive + u64::from(constants.floating_buffers_per_gate);
    let target_total_buffers = match constants.max_required_buffers_per_gate {
        Some(cap) => required_buffers.max(uncapped_total.min(u64::from(cap))),
        None => required_buffers.max(uncapped_total),
    };

    let exclusive_buffers_per_channel = if required_buffers <= all_exclusive {
        0
    } else {
        per_channel
    };

    GateBuffersSpec {
        exclusive_buffers_per_channel,
        required_buffers,
        total_floating_buffers: target_total_buffers - channels * exclusive_buffers_per_channel,
        target_total_buffers,
    }
}

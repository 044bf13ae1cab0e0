//! Network buffer announcement: the task's total buffer requirement.
//!
//! The announcement is what the task declares to resource negotiation. It
//! must cover every pool the task later creates:
//!
//! - an input edge contributes its gate requirement once per reused
//!   upstream partition;
//! - a pipeline-consumable output contributes its pool maximum, since a
//!   backpressured consumer may hold every floating buffer indefinitely;
//! - a blocking-like output contributes its pool minimum, since blocking
//!   shuffle recycles buffers without waiting on consumers.
//!
//! Planning is pure and deterministic. Any invalid edge aborts the whole
//! call; a partial total would admit the task with too little memory.

use crate::bounds::{bounds_for_result_partition, BufferBounds};
use crate::config::TuningConstants;
use crate::descriptor::{InputEdge, InputEdges, OutputEdge, OutputEdges, TaskIoDescriptor};
use crate::edge::EdgeId;
use crate::errors::PlannerError;
use crate::gate::{DefaultGatePolicy, GateRequirementPolicy};
use crate::partition::PartitionKind;

/// Which side of the task an edge sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

/// Buffers one edge adds to the announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeContribution {
    pub edge: EdgeId,
    pub direction: Direction,
    pub kind: PartitionKind,
    pub buffers: u64,
}

/// Per-edge contributions and their totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementBreakdown {
    pub contributions: Vec<EdgeContribution>,
    pub inputs_total: u64,
    pub outputs_total: u64,
}

impl AnnouncementBreakdown {
    /// The announced buffer count. Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.inputs_total.saturating_add(self.outputs_total)
    }

    /// Contribution of one edge, if it was planned.
    pub fn contribution(&self, edge: EdgeId, direction: Direction) -> Option<u64> {
        self.contributions
            .iter()
            .find(|c| c.edge == edge && c.direction == direction)
            .map(|c| c.buffers)
    }

    fn push(&mut self, contribution: EdgeContribution) {
        match contribution.direction {
            Direction::Input => {
                self.inputs_total = self.inputs_total.saturating_add(contribution.buffers)
            }
            Direction::Output => {
                self.outputs_total = self.outputs_total.saturating_add(contribution.buffers)
            }
        }
        self.contributions.push(contribution);
    }
}

/// Select the buffer count announced for one result partition.
///
/// # Errors
///
/// [`PlannerError::UnboundedAnnouncement`] when the selected bound is the
/// unbounded sentinel. Unbounded pipelined partitions never take part in
/// fine-grained resource management, so reaching this is a configuration
/// invariant violation.
pub fn announce_for_result_partition(
    kind: PartitionKind,
    bounds: &BufferBounds,
) -> Result<u64, PlannerError> {
    let selected = if kind.can_be_pipelined_consumed() {
        bounds.max()
    } else {
        Some(bounds.min())
    };
    selected.ok_or_else(|| {
        tracing::error!(%kind, "refusing to announce an unbounded result partition pool");
        PlannerError::UnboundedAnnouncement { edge: None, kind }
    })
}

/// Buffers announced for one input edge under `policy`, one gate per
/// reused upstream partition. Saturates instead of wrapping.
pub fn input_edge_announcement<P>(policy: &P, edge: &InputEdge, constants: &TuningConstants) -> u64
where
    P: GateRequirementPolicy + ?Sized,
{
    policy
        .gate_requirement(edge.kind, edge.channels, constants)
        .saturating_mul(u64::from(edge.reuse_count))
}

/// Buffers announced for one output edge.
pub fn output_edge_announcement(
    edge: &OutputEdge,
    constants: &TuningConstants,
) -> Result<u64, PlannerError> {
    let bounds = bounds_for_result_partition(edge.kind, edge.subpartitions, constants);
    announce_for_result_partition(edge.kind, &bounds).map_err(|e| e.on_edge(edge.edge))
}

/// Plan every edge of a task with the default gate policy.
pub fn plan_announcement(
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<AnnouncementBreakdown, PlannerError> {
    plan_announcement_with_policy(&DefaultGatePolicy, constants, inputs, outputs)
}

/// Plan every edge of a task, asking `policy` for input-gate requirements.
pub fn plan_announcement_with_policy<P>(
    policy: &P,
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<AnnouncementBreakdown, PlannerError>
where
    P: GateRequirementPolicy + ?Sized,
{
    let mut breakdown = AnnouncementBreakdown::default();

    for input in inputs.resolve()? {
        let buffers = input_edge_announcement(policy, &input, constants);
        tracing::debug!(
            edge = %input.edge,
            kind = %input.kind,
            channels = input.channels.get(),
            reuse_count = input.reuse_count,
            buffers,
            "planned input gate"
        );
        breakdown.push(EdgeContribution {
            edge: input.edge,
            direction: Direction::Input,
            kind: input.kind,
            buffers,
        });
    }

    for output in outputs.resolve()? {
        let buffers = output_edge_announcement(&output, constants)?;
        tracing::debug!(
            edge = %output.edge,
            kind = %output.kind,
            subpartitions = output.subpartitions.get(),
            buffers,
            "planned result partition"
        );
        breakdown.push(EdgeContribution {
            edge: output.edge,
            direction: Direction::Output,
            kind: output.kind,
            buffers,
        });
    }

    tracing::debug!(
        inputs = breakdown.inputs_total,
        outputs = breakdown.outputs_total,
        total = breakdown.total(),
        "network buffer announcement"
    );
    Ok(breakdown)
}

/// Total network buffers a task announces.
pub fn compute_total_announcement(
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<u64, PlannerError> {
    plan_announcement(constants, inputs, outputs).map(|b| b.total())
}

/// [`compute_total_announcement`] with a caller-supplied gate policy.
pub fn compute_total_announcement_with_policy<P>(
    policy: &P,
    constants: &TuningConstants,
    inputs: &InputEdges,
    outputs: &OutputEdges,
) -> Result<u64, PlannerError>
where
    P: GateRequirementPolicy + ?Sized,
{
    plan_announcement_with_policy(policy, constants, inputs, outputs).map(|b| b.total())
}

impl TaskIoDescriptor {
    /// Total network buffers this task announces.
    pub fn announcement(&self, constants: &TuningConstants) -> Result<u64, PlannerError> {
        compute_total_announcement(constants, &self.inputs, &self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EdgeDataIssue;
    use std::num::NonZeroU32;

    fn constants() -> TuningConstants {
        TuningConstants::default()
            .with_buffers_per_channel(5)
            .with_floating_buffers_per_gate(8)
            .with_sort_shuffle_min_parallelism(8)
            .with_sort_shuffle_min_buffers(12)
    }

    #[test]
    fn pipelined_selects_max_blocking_selects_min() {
        let bounds = BufferBounds::new(6, 33);
        assert_eq!(
            announce_for_result_partition(PartitionKind::PipelinedBounded, &bounds).unwrap(),
            33
        );
        assert_eq!(
            announce_for_result_partition(PartitionKind::Blocking, &bounds).unwrap(),
            6
        );
    }

    #[test]
    fn blocking_with_unbounded_max_announces_min() {
        let bounds = BufferBounds::unbounded(7);
        assert_eq!(
            announce_for_result_partition(PartitionKind::BlockingPersistent, &bounds).unwrap(),
            7
        );
    }

    #[test]
    fn pipelined_unbounded_is_refused() {
        let bounds = BufferBounds::unbounded(4);
        assert_eq!(
            announce_for_result_partition(PartitionKind::Pipelined, &bounds).unwrap_err(),
            PlannerError::UnboundedAnnouncement {
                edge: None,
                kind: PartitionKind::Pipelined,
            }
        );
    }

    #[test]
    fn output_edge_error_carries_edge() {
        let edge = OutputEdge {
            edge: EdgeId::new(11),
            kind: PartitionKind::Pipelined,
            subpartitions: NonZeroU32::new(3).unwrap(),
        };
        let err = output_edge_announcement(&edge, &constants()).unwrap_err();
        assert_eq!(err.edge(), Some(EdgeId::new(11)));
    }

    #[test]
    fn breakdown_splits_inputs_and_outputs() {
        let inputs = InputEdges::new()
            .with_edge(EdgeId::new(1), PartitionKind::PipelinedBounded, 3, 1)
            .with_edge(EdgeId::new(2), PartitionKind::Blocking, 4, 1);
        let outputs = OutputEdges::new()
            .with_edge(EdgeId::new(3), PartitionKind::PipelinedBounded, 5)
            .with_edge(EdgeId::new(4), PartitionKind::Blocking, 6)
            .with_edge(EdgeId::new(5), PartitionKind::Blocking, 10);

        let breakdown = plan_announcement(&constants(), &inputs, &outputs).unwrap();
        assert_eq!(breakdown.inputs_total, 23 + 28);
        assert_eq!(breakdown.outputs_total, 33 + 7 + 12);
        assert_eq!(breakdown.total(), 103);
        assert_eq!(breakdown.contribution(EdgeId::new(4), Direction::Output), Some(7));
        assert_eq!(breakdown.contribution(EdgeId::new(4), Direction::Input), None);
    }

    #[test]
    fn reuse_count_multiplies_gate_requirement() {
        let inputs =
            InputEdges::new().with_edge(EdgeId::new(1), PartitionKind::Blocking, 4, 3);
        let total = compute_total_announcement(&constants(), &inputs, &OutputEdges::new()).unwrap();
        assert_eq!(total, 3 * 28);
    }

    #[test]
    fn zero_reuse_count_contributes_nothing() {
        let inputs =
            InputEdges::new().with_edge(EdgeId::new(1), PartitionKind::Blocking, 4, 0);
        let total = compute_total_announcement(&constants(), &inputs, &OutputEdges::new()).unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn custom_policy_is_consulted_per_input_edge() {
        let policy = |_: PartitionKind, channels: NonZeroU32, _: &TuningConstants| {
            u64::from(channels.get())
        };
        let inputs = InputEdges::new()
            .with_edge(EdgeId::new(1), PartitionKind::Blocking, 4, 2)
            .with_edge(EdgeId::new(2), PartitionKind::PipelinedBounded, 3, 1);
        let total =
            compute_total_announcement_with_policy(&policy, &constants(), &inputs, &OutputEdges::new())
                .unwrap();
        assert_eq!(total, 4 * 2 + 3);
    }

    #[test]
    fn invalid_edge_aborts_whole_plan() {
        let inputs =
            InputEdges::new().with_edge(EdgeId::new(1), PartitionKind::Blocking, 4, 1);
        let outputs = OutputEdges::new()
            .with_edge(EdgeId::new(2), PartitionKind::PipelinedBounded, 5)
            .with_edge(EdgeId::new(3), PartitionKind::Blocking, 0);
        let err = compute_total_announcement(&constants(), &inputs, &outputs).unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidEdgeData {
                edge: EdgeId::new(3),
                reason: EdgeDataIssue::ZeroSubpartitions,
            }
        );
    }

    #[test]
    fn descriptor_announcement_matches_free_function() {
        let descriptor = TaskIoDescriptor {
            inputs: InputEdges::new().with_edge(EdgeId::new(1), PartitionKind::Blocking, 4, 1),
            outputs: OutputEdges::new().with_edge(EdgeId::new(2), PartitionKind::Blocking, 10),
        };
        assert_eq!(descriptor.announcement(&constants()).unwrap(), 28 + 12);
    }

    #[test]
    fn oversized_counts_saturate_instead_of_wrapping() {
        let c = TuningConstants::default()
            .with_buffers_per_channel(u32::MAX)
            .with_floating_buffers_per_gate(u32::MAX);
        let inputs = InputEdges::new().with_edge(
            EdgeId::new(1),
            PartitionKind::PipelinedBounded,
            u32::MAX,
            4,
        );
        let outputs =
            OutputEdges::new().with_edge(EdgeId::new(2), PartitionKind::PipelinedBounded, u32::MAX);
        let breakdown = plan_announcement(&c, &inputs, &outputs).unwrap();
        assert_eq!(breakdown.inputs_total, u64::MAX);
        assert_eq!(breakdown.total(), u64::MAX);
    }

    #[test]
    fn empty_task_announces_zero() {
        let total =
            compute_total_announcement(&constants(), &InputEdges::new(), &OutputEdges::new())
                .unwrap();
        assert_eq!(total, 0);
    }
}

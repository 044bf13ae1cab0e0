//! Golden announcement vectors.
//!
//! Regenerates the reference scenario committed at
//! `tests/vectors/announcement.vectors.json`: two input gates and three
//! result partitions (bounded pipelined, hash blocking, sort blocking)
//! under fixed tuning constants, plus one refused unbounded partition.
//! `tests/vector_equivalence.rs` fails on any drift.

use std::num::NonZeroU32;

use serde_json::{json, Value};

use crate::announce::{announce_for_result_partition, plan_announcement, Direction};
use crate::bounds::{bounds_for_result_partition, is_sort_shuffle};
use crate::config::TuningConstants;
use crate::descriptor::{InputEdges, OutputEdges};
use crate::edge::EdgeId;
use crate::gate::gate_buffers_spec;
use crate::partition::PartitionKind;

/// Tuning constants of the reference scenario.
pub fn scenario_constants() -> TuningConstants {
    TuningConstants::default()
        .with_buffers_per_channel(5)
        .with_floating_buffers_per_gate(8)
        .with_max_required_buffers_per_gate(None)
        .with_sort_shuffle_min_parallelism(8)
        .with_sort_shuffle_min_buffers(12)
}

pub fn scenario_inputs() -> InputEdges {
    InputEdges::new()
        .with_edge(EdgeId::new(1), PartitionKind::PipelinedBounded, 3, 1)
        .with_edge(EdgeId::new(2), PartitionKind::Blocking, 4, 1)
}

pub fn scenario_outputs() -> OutputEdges {
    OutputEdges::new()
        .with_edge(EdgeId::new(3), PartitionKind::PipelinedBounded, 5)
        .with_edge(EdgeId::new(4), PartitionKind::Blocking, 6)
        .with_edge(EdgeId::new(5), PartitionKind::Blocking, 10)
}

/// Generate the announcement vectors as pretty-printed JSON.
///
/// # Panics
///
/// If the reference scenario stops planning successfully.
pub fn generate_announcement_json() -> String {
    let constants = scenario_constants();
    let inputs = scenario_inputs();
    let outputs = scenario_outputs();
    let breakdown =
        plan_announcement(&constants, &inputs, &outputs).expect("reference scenario must plan");

    let input_gates: Vec<Value> = inputs
        .resolve()
        .expect("reference inputs must resolve")
        .iter()
        .map(|edge| {
            let spec = gate_buffers_spec(edge.kind, edge.channels, &constants);
            json!({
                "edge": edge.edge.to_string(),
                "kind": edge.kind,
                "channels": edge.channels.get(),
                "reuse_count": edge.reuse_count,
                "exclusive_buffers_per_channel": spec.exclusive_buffers_per_channel,
                "required_buffers": spec.required_buffers,
                "total_floating_buffers": spec.total_floating_buffers,
                "target_total_buffers": spec.target_total_buffers,
                "announced": breakdown.contribution(edge.edge, Direction::Input),
            })
        })
        .collect();

    let result_partitions: Vec<Value> = outputs
        .resolve()
        .expect("reference outputs must resolve")
        .iter()
        .map(|edge| {
            let bounds = bounds_for_result_partition(edge.kind, edge.subpartitions, &constants);
            json!({
                "edge": edge.edge.to_string(),
                "kind": edge.kind,
                "subpartitions": edge.subpartitions.get(),
                "sort_shuffle": is_sort_shuffle(edge.kind, edge.subpartitions, &constants),
                "min": bounds.min(),
                "max": bounds.max(),
                "announced": breakdown.contribution(edge.edge, Direction::Output),
            })
        })
        .collect();

    let refused_kind = PartitionKind::Pipelined;
    let refused_subpartitions = NonZeroU32::new(3).expect("non-zero");
    let refused_bounds =
        bounds_for_result_partition(refused_kind, refused_subpartitions, &constants);
    let refused_error = announce_for_result_partition(refused_kind, &refused_bounds)
        .expect_err("unbounded pipelined partition must be refused");

    let document = json!({
        "_WARNING": "Generated by shuffle-budget-core --features vectors. Do not edit by hand.",
        "description": "Network buffer announcement for two input gates and three result partitions",
        "constants": constants,
        "input_gates": input_gates,
        "result_partitions": result_partitions,
        "refused": [{
            "kind": refused_kind,
            "subpartitions": refused_subpartitions.get(),
            "min": refused_bounds.min(),
            "max": refused_bounds.max(),
            "error": refused_error.to_string(),
        }],
        "inputs_total": breakdown.inputs_total,
        "outputs_total": breakdown.outputs_total,
        "total_announcement": breakdown.total(),
    });

    serde_json::to_string_pretty(&document).expect("vectors serialize")
}

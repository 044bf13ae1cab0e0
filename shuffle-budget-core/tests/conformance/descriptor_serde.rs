//! Conformance: serde shapes of the negotiation-facing types.

use shuffle_budget_core::{EdgeId, PartitionKind, TaskIoDescriptor, TuningConstants};

#[test]
fn conformance_descriptor_from_json() {
    let json = r#"{
        "inputs": {
            "channel_counts": { "1": 3, "2": 4 },
            "reuse_counts": { "1": 1, "2": 1 },
            "partition_kinds": { "1": "PIPELINED_BOUNDED", "2": "BLOCKING" }
        },
        "outputs": {
            "subpartition_counts": { "3": 5, "4": 6, "5": 10 },
            "partition_kinds": { "3": "PIPELINED_BOUNDED", "4": "BLOCKING", "5": "BLOCKING" }
        }
    }"#;
    let descriptor: TaskIoDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(descriptor.inputs.len(), 2);
    assert_eq!(
        descriptor.outputs.partition_kinds.get(&EdgeId::new(5)),
        Some(&PartitionKind::Blocking)
    );

    let constants = TuningConstants::default()
        .with_buffers_per_channel(5)
        .with_floating_buffers_per_gate(8)
        .with_sort_shuffle_min_parallelism(8)
        .with_sort_shuffle_min_buffers(12);
    assert_eq!(descriptor.announcement(&constants).unwrap(), 103);
}

#[test]
fn conformance_constants_use_kebab_case_and_defaults() {
    let constants: TuningConstants =
        serde_json::from_str(r#"{ "buffers-per-channel": 4, "max-required-buffers-per-gate": 100 }"#)
            .unwrap();
    assert_eq!(
        constants,
        TuningConstants::default()
            .with_buffers_per_channel(4)
            .with_max_required_buffers_per_gate(Some(100))
    );
}

#[test]
fn conformance_partition_kind_serializes_as_cluster_name() {
    let json = serde_json::to_string(&PartitionKind::BlockingPersistent).unwrap();
    assert_eq!(json, "\"BLOCKING_PERSISTENT\"");
}

#[test]
fn conformance_missing_sides_default_to_empty() {
    let descriptor: TaskIoDescriptor = serde_json::from_str("{}").unwrap();
    assert!(descriptor.inputs.is_empty());
    assert!(descriptor.outputs.is_empty());
}

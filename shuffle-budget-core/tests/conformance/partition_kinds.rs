//! Conformance: partition-kind predicate table.
//!
//! Every kind belongs to exactly one of bounded pipelined, blocking-like,
//! or unbounded pipelined.

use shuffle_budget_core::PartitionKind;

/// (kind, name, bounded, blocking-like, pipeline-consumable)
const TABLE: [(PartitionKind, &str, bool, bool, bool); 5] = [
    (PartitionKind::Pipelined, "PIPELINED", false, false, true),
    (PartitionKind::PipelinedBounded, "PIPELINED_BOUNDED", true, false, true),
    (PartitionKind::PipelinedApproximate, "PIPELINED_APPROXIMATE", false, false, true),
    (PartitionKind::Blocking, "BLOCKING", false, true, false),
    (PartitionKind::BlockingPersistent, "BLOCKING_PERSISTENT", false, true, false),
];

#[test]
fn conformance_predicate_table_exact() {
    for (kind, name, bounded, blocking, pipelined) in TABLE {
        assert_eq!(kind.as_str(), name);
        assert_eq!(kind.is_bounded(), bounded, "{name} is_bounded");
        assert_eq!(kind.is_blocking_like(), blocking, "{name} is_blocking_like");
        assert_eq!(kind.can_be_pipelined_consumed(), pipelined, "{name} can_be_pipelined_consumed");
    }
}

#[test]
fn conformance_table_covers_all_kinds() {
    let listed: Vec<_> = TABLE.iter().map(|row| row.0).collect();
    assert_eq!(listed, PartitionKind::ALL.to_vec());
}

#[test]
fn conformance_exactly_one_class_per_kind() {
    for kind in PartitionKind::ALL {
        let bounded_pipelined = kind.is_bounded() && kind.can_be_pipelined_consumed();
        let blocking = kind.is_blocking_like();
        let unbounded_pipelined = !kind.is_bounded() && kind.can_be_pipelined_consumed();
        let classes = [bounded_pipelined, blocking, unbounded_pipelined]
            .iter()
            .filter(|c| **c)
            .count();
        assert_eq!(classes, 1, "{kind} belongs to {classes} classes");
    }
}

#[test]
fn conformance_names_roundtrip_through_parse() {
    for (kind, name, ..) in TABLE {
        assert_eq!(name.parse::<PartitionKind>().unwrap(), kind);
        assert_eq!(name.to_lowercase().parse::<PartitionKind>().unwrap(), kind);
    }
}

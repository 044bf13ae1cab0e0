//! Conformance: error display stability.
//!
//! Resource negotiation logs these strings verbatim; changing them breaks
//! log-based alerting.

use shuffle_budget_core::{ConfigError, EdgeDataIssue, EdgeId, PartitionKind, PlannerError};

#[test]
fn conformance_planner_error_display_format_stable() {
    let edge = EdgeId::new(0x1f);
    let cases: Vec<(PlannerError, &str)> = vec![
        (
            PlannerError::InvalidEdgeData {
                edge,
                reason: EdgeDataIssue::MissingPartitionKind,
            },
            "Invalid edge data for 000000000000001f: missing partition kind",
        ),
        (
            PlannerError::InvalidEdgeData {
                edge,
                reason: EdgeDataIssue::MissingReuseCount,
            },
            "Invalid edge data for 000000000000001f: missing partition reuse count",
        ),
        (
            PlannerError::InvalidEdgeData {
                edge,
                reason: EdgeDataIssue::ZeroSubpartitions,
            },
            "Invalid edge data for 000000000000001f: subpartition count must be at least 1",
        ),
        (
            PlannerError::InvalidEdgeData {
                edge,
                reason: EdgeDataIssue::ZeroInputChannels,
            },
            "Invalid edge data for 000000000000001f: input channel count must be at least 1",
        ),
        (
            PlannerError::UnboundedAnnouncement {
                edge: Some(edge),
                kind: PartitionKind::PipelinedApproximate,
            },
            "Unbounded announcement for 000000000000001f: partition kind PIPELINED_APPROXIMATE has no finite buffer ceiling",
        ),
    ];

    for (error, expected) in &cases {
        assert_eq!(error.to_string(), *expected, "PlannerError display drift");
        assert_eq!(error.edge(), Some(edge));
    }
}

#[test]
fn conformance_config_error_display_format_stable() {
    let cases: Vec<(ConfigError, &str)> = vec![
        (
            ConfigError::InvalidValue {
                key: "k".into(),
                value: "x".into(),
            },
            "Invalid value for k: \"x\"",
        ),
        (
            ConfigError::OutOfRange {
                key: "k".into(),
                value: 0,
                min: 1,
            },
            "Value for k out of range: 0 < 1",
        ),
        (
            ConfigError::UnknownPartitionKind("HYBRID".into()),
            "Unknown partition kind: \"HYBRID\"",
        ),
    ];

    for (error, expected) in &cases {
        assert_eq!(error.to_string(), *expected, "ConfigError display drift");
    }
}

#[test]
fn conformance_errors_implement_std_error() {
    let err = PlannerError::UnboundedAnnouncement {
        edge: None,
        kind: PartitionKind::Pipelined,
    };
    let _: &dyn std::error::Error = &err;
    let err = ConfigError::UnknownPartitionKind(String::new());
    let _: &dyn std::error::Error = &err;
}

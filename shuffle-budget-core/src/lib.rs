//! Shuffle budget core: network buffer planning for shuffle tasks.
//!
//! Before any network buffer pool exists, resource negotiation asks how
//! many fixed-size network buffers a task needs. This crate answers with
//! one number, the announcement: the sum over the task's input gates and
//! result partitions of the buffers each will request. Too high wastes
//! reserved cluster memory; too low starves pools under backpressure.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`partition`] | Partition kinds and their predicates |
//! | [`bounds`] | Result-partition pool bounds, sort-shuffle switch |
//! | [`gate`] | Input-gate requirement policy |
//! | [`announce`] | Per-edge selection and the task total |
//! | [`footprint`] | Pool footprint model and fit check |
//! | [`descriptor`] | Task edge maps |
//! | [`config`] | Tuning constants and option parsing |
//! | [`constants`] | Option keys and defaults |
//! | [`errors`] | Error types |
//! | [`vectors`] | Golden vectors (test-only) |
//!
//! # Example
//!
//! ```
//! use shuffle_budget_core::{
//!     compute_total_announcement, EdgeId, InputEdges, OutputEdges, PartitionKind,
//!     TuningConstants,
//! };
//!
//! let constants = TuningConstants::default()
//!     .with_buffers_per_channel(5)
//!     .with_floating_buffers_per_gate(8)
//!     .with_sort_shuffle_min_parallelism(8)
//!     .with_sort_shuffle_min_buffers(12);
//!
//! let outputs = OutputEdges::new()
//!     .with_edge(EdgeId::new(1), PartitionKind::PipelinedBounded, 5)
//!     .with_edge(EdgeId::new(2), PartitionKind::Blocking, 6)
//!     .with_edge(EdgeId::new(3), PartitionKind::Blocking, 10);
//!
//! let total = compute_total_announcement(&constants, &InputEdges::new(), &outputs).unwrap();
//! assert_eq!(total, 33 + 7 + 12);
//! ```
//!
//! Every operation is pure and synchronous. Calls for different tasks may
//! run on any number of threads without coordination.

/// Option keys and default values.
pub mod constants;

/// Error types for planning and option parsing.
pub mod errors;

/// Partition kinds, the shuffle semantics classifier.
pub mod partition;

/// Edge identifiers.
pub mod edge;

/// Tuning constants.
pub mod config;

/// Task edge maps, as carried by the deployment descriptor.
pub mod descriptor;

/// Result-partition pool bounds.
pub mod bounds;

/// Input-gate buffer requirement.
pub mod gate;

/// Per-edge announcement selection and aggregation.
pub mod announce;

/// Pool footprint model for checking announcements.
pub mod footprint;

/// Deterministic golden vector generator (test use only).
/// Requires the `vectors` feature: `cargo test --features vectors`.
#[cfg(feature = "vectors")]
pub mod vectors;

pub use announce::{
    announce_for_result_partition, compute_total_announcement,
    compute_total_announcement_with_policy, plan_announcement, plan_announcement_with_policy,
    AnnouncementBreakdown, Direction, EdgeContribution,
};
pub use bounds::{bounds_for_result_partition, BufferBounds};
pub use config::TuningConstants;
pub use descriptor::{InputEdge, InputEdges, OutputEdge, OutputEdges, TaskIoDescriptor};
pub use edge::EdgeId;
pub use errors::{ConfigError, EdgeDataIssue, PlannerError};
pub use footprint::{verify_fit, verify_fit_with_policy, FitReport};
pub use gate::{DefaultGatePolicy, GateBuffersSpec, GateRequirementPolicy};
pub use partition::PartitionKind;

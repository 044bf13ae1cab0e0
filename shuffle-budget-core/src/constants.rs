//! Planner constants: cluster option keys and their default values.
//!
//! Option keys are the names under which the surrounding cluster
//! configuration publishes the network tuning values. Defaults apply when
//! a key is absent from the options handed to
//! [`TuningConstants::from_options`](crate::config::TuningConstants::from_options).

/// Exclusive buffers assigned to each input channel and, for bounded
/// pipelined partitions, to each subpartition.
pub const BUFFERS_PER_CHANNEL_KEY: &str = "taskmanager.network.memory.buffers-per-channel";

/// Floating buffers shared by all channels of one gate.
pub const FLOATING_BUFFERS_PER_GATE_KEY: &str =
    "taskmanager.network.memory.floating-buffers-per-gate";

/// Optional ceiling on the buffers a single input gate requires.
pub const MAX_REQUIRED_BUFFERS_PER_GATE_KEY: &str =
    "taskmanager.network.memory.read-buffer.required-per-gate.max";

/// Fan-out at or above which blocking partitions switch to sort-shuffle.
pub const SORT_SHUFFLE_MIN_PARALLELISM_KEY: &str =
    "taskmanager.network.sort-shuffle.min-parallelism";

/// Minimum buffers of a sort-shuffle result partition.
pub const SORT_SHUFFLE_MIN_BUFFERS_KEY: &str = "taskmanager.network.sort-shuffle.min-buffers";

/// All option keys understood by the planner.
pub const OPTION_KEYS: [&str; 5] = [
    BUFFERS_PER_CHANNEL_KEY,
    FLOATING_BUFFERS_PER_GATE_KEY,
    MAX_REQUIRED_BUFFERS_PER_GATE_KEY,
    SORT_SHUFFLE_MIN_PARALLELISM_KEY,
    SORT_SHUFFLE_MIN_BUFFERS_KEY,
];

pub const DEFAULT_BUFFERS_PER_CHANNEL: u32 = 2;

pub const DEFAULT_FLOATING_BUFFERS_PER_GATE: u32 = 8;

pub const DEFAULT_SORT_SHUFFLE_MIN_PARALLELISM: u32 = 1;

pub const DEFAULT_SORT_SHUFFLE_MIN_BUFFERS: u32 = 512;

/// Required-buffer threshold of a blocking input gate when no cap is
/// configured.
pub const DEFAULT_MAX_REQUIRED_BUFFERS_PER_GATE_FOR_BATCH: u64 = 1000;

/// Required-buffer threshold of a pipelined input gate when no cap is
/// configured. Effectively unlimited.
pub const DEFAULT_MAX_REQUIRED_BUFFERS_PER_GATE_FOR_STREAM: u64 = u64::MAX;

/// Factor applied to the fan-out to derive the sort-shuffle pool ceiling.
pub const SORT_SHUFFLE_MAX_BUFFERS_PER_SUBPARTITION: u64 = 4;

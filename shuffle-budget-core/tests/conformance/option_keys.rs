//! Conformance: cluster option keys.
//!
//! The keys must match the names the cluster configuration publishes.

use shuffle_budget_core::constants::OPTION_KEYS;
use shuffle_budget_core::{ConfigError, TuningConstants};

#[test]
fn conformance_option_keys_exact_list() {
    let expected: [&str; 5] = [
        "taskmanager.network.memory.buffers-per-channel",
        "taskmanager.network.memory.floating-buffers-per-gate",
        "taskmanager.network.memory.read-buffer.required-per-gate.max",
        "taskmanager.network.sort-shuffle.min-parallelism",
        "taskmanager.network.sort-shuffle.min-buffers",
    ];
    assert_eq!(OPTION_KEYS, expected, "OPTION_KEYS drift");
}

#[test]
fn conformance_every_key_is_read() {
    let options: Vec<(&str, &str)> = OPTION_KEYS.iter().map(|key| (*key, "7")).collect();
    let constants = TuningConstants::from_options(options).unwrap();
    assert_eq!(
        constants,
        TuningConstants {
            buffers_per_channel: 7,
            floating_buffers_per_gate: 7,
            max_required_buffers_per_gate: Some(7),
            sort_shuffle_min_parallelism: 7,
            sort_shuffle_min_buffers: 7,
        }
    );
}

#[test]
fn conformance_owned_options_are_accepted() {
    let options = std::collections::HashMap::from([(
        "taskmanager.network.sort-shuffle.min-buffers".to_string(),
        "64".to_string(),
    )]);
    let constants = TuningConstants::from_options(&options).unwrap();
    assert_eq!(constants.sort_shuffle_min_buffers, 64);
}

#[test]
fn conformance_non_numeric_value_rejected() {
    let err = TuningConstants::from_options([(
        "taskmanager.network.sort-shuffle.min-parallelism",
        "many",
    )])
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

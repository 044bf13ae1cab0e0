//! Tuning constants: the cluster-wide scalars every planning call reads.
//!
//! The planner never owns or mutates these. Callers build them once from
//! cluster options (or in code) and pass a shared reference to each call.

use crate::constants::{
    BUFFERS_PER_CHANNEL_KEY, DEFAULT_BUFFERS_PER_CHANNEL, DEFAULT_FLOATING_BUFFERS_PER_GATE,
    DEFAULT_SORT_SHUFFLE_MIN_BUFFERS, DEFAULT_SORT_SHUFFLE_MIN_PARALLELISM,
    FLOATING_BUFFERS_PER_GATE_KEY, MAX_REQUIRED_BUFFERS_PER_GATE_KEY,
    SORT_SHUFFLE_MIN_BUFFERS_KEY, SORT_SHUFFLE_MIN_PARALLELISM_KEY,
};
use crate::errors::ConfigError;

/// Network tuning values supplied per planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", default)
)]
pub struct TuningConstants {
    /// Exclusive buffers per input channel / bounded subpartition.
    pub buffers_per_channel: u32,
    /// Floating buffers per gate or bounded partition.
    pub floating_buffers_per_gate: u32,
    /// Optional ceiling on one input gate's requirement.
    pub max_required_buffers_per_gate: Option<u32>,
    /// Blocking fan-out at which sort-shuffle takes over (inclusive).
    pub sort_shuffle_min_parallelism: u32,
    /// Minimum pool size of a sort-shuffle partition.
    pub sort_shuffle_min_buffers: u32,
}

impl Default for TuningConstants {
    fn default() -> Self {
        Self {
            buffers_per_channel: DEFAULT_BUFFERS_PER_CHANNEL,
            floating_buffers_per_gate: DEFAULT_FLOATING_BUFFERS_PER_GATE,
            max_required_buffers_per_gate: None,
            sort_shuffle_min_parallelism: DEFAULT_SORT_SHUFFLE_MIN_PARALLELISM,
            sort_shuffle_min_buffers: DEFAULT_SORT_SHUFFLE_MIN_BUFFERS,
        }
    }
}

impl TuningConstants {
    /// Exclusive buffers per input channel and per subpartition.
    pub fn with_buffers_per_channel(mut self, value: u32) -> Self {
        self.buffers_per_channel = value;
        self
    }

    /// Floating buffers shared by a gate or bounded result partition.
    pub fn with_floating_buffers_per_gate(mut self, value: u32) -> Self {
        self.floating_buffers_per_gate = value;
        self
    }

    /// Cap on a gate's required buffers; `None` keeps the per-kind default.
    pub fn with_max_required_buffers_per_gate(mut self, value: Option<u32>) -> Self {
        self.max_required_buffers_per_gate = value;
        self
    }

    /// Subpartition count from which blocking partitions sort-shuffle.
    pub fn with_sort_shuffle_min_parallelism(mut self, value: u32) -> Self {
        self.sort_shuffle_min_parallelism = value;
        self
    }

    /// Minimum pool size of a sort-shuffle partition.
    pub fn with_sort_shuffle_min_buffers(mut self, value: u32) -> Self {
        self.sort_shuffle_min_buffers = value;
        self
    }

    /// Build constants from cluster options.
    ///
    /// Keys are the `taskmanager.network.*` names in [`crate::constants`].
    /// Unknown keys are ignored and absent keys keep their defaults.
    /// Values are trimmed and parsed as unsigned integers; an empty
    /// `required-per-gate.max` value clears the cap.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for unparsable values and
    /// [`ConfigError::OutOfRange`] for values below the key's minimum.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut constants = Self::default();
        for (key, value) in options {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                BUFFERS_PER_CHANNEL_KEY => {
                    constants.buffers_per_channel = parse_count(key, value)?;
                }
                FLOATING_BUFFERS_PER_GATE_KEY => {
                    constants.floating_buffers_per_gate = parse_count(key, value)?;
                }
                MAX_REQUIRED_BUFFERS_PER_GATE_KEY => {
                    constants.max_required_buffers_per_gate = if value.is_empty() {
                        None
                    } else {
                        Some(parse_count(key, value)?)
                    };
                }
                SORT_SHUFFLE_MIN_PARALLELISM_KEY => {
                    constants.sort_shuffle_min_parallelism = parse_count(key, value)?;
                }
                SORT_SHUFFLE_MIN_BUFFERS_KEY => {
                    constants.sort_shuffle_min_buffers = parse_count(key, value)?;
                }
                _ => {}
            }
        }
        constants.validate()?;
        Ok(constants)
    }

    /// Check the range of every value.
    ///
    /// Sort-shuffle parallelism and buffers and the per-gate cap must be at
    /// least 1; the per-channel and floating counts may be zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least_one(
            SORT_SHUFFLE_MIN_PARALLELISM_KEY,
            self.sort_shuffle_min_parallelism,
        )?;
        at_least_one(SORT_SHUFFLE_MIN_BUFFERS_KEY, self.sort_shuffle_min_buffers)?;
        if let Some(cap) = self.max_required_buffers_per_gate {
            at_least_one(MAX_REQUIRED_BUFFERS_PER_GATE_KEY, cap)?;
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn at_least_one(key: &str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: 0,
            min: 1,
        });
    }
    Ok(())
}

//! Conformance harness: stable surface of the planner.
//!
//! Pins the parts of the crate other components depend on by value:
//!
//! - Partition-kind predicate table and cluster names
//! - Error display strings and edge attribution
//! - Cluster option keys and their parsing
//!
//! Serde shapes are only checked with the `serde` feature.

mod error_display;
mod option_keys;
mod partition_kinds;

#[cfg(feature = "serde")]
mod descriptor_serde;

//! Edge identifiers.

use std::fmt;

/// Opaque identifier of one logical input or output edge of a task, i.e.
/// one upstream or downstream dataset connection.
///
/// Only used as a map key. The ordering exists so planning visits edges
/// in a stable order; it carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Wrap a raw edge id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw edge id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

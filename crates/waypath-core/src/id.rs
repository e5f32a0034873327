//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one candidate within a generation's batch.
///
/// Assigned by the external search engine; the harness only requires
/// that ids are unique within a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(pub u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CandidateId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Counter for unique [`FieldInstanceId`] allocation.
static FIELD_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an [`ObstacleField`](crate::ObstacleField).
///
/// Allocated from a monotonic atomic counter. Two separately constructed
/// fields always have different ids, even with identical obstacles.
/// Cloning a field preserves the id, which is sound because fields are
/// immutable. Nearest-neighbour caches use it to detect a swapped
/// obstacle set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldInstanceId(u64);

impl FieldInstanceId {
    /// Allocate a fresh, unique instance id. Thread-safe.
    pub fn next() -> Self {
        Self(FIELD_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FieldInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_are_unique() {
        let a = FieldInstanceId::next();
        let b = FieldInstanceId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn candidate_id_display() {
        assert_eq!(CandidateId::from(17).to_string(), "17");
    }
}

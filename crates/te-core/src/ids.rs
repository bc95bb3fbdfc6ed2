//! Strongly typed event identity.
//!
//! `EventId` is `Copy + Ord + Hash` so it can be used as a map key and sorted
//! collection element without ceremony.  Ids are allocated from a
//! monotonically increasing per-scheduler counter and never reused within a
//! process, which makes ascending id order equal to creation order — a useful
//! deterministic tiebreak for query snapshots.

use std::fmt;

/// Process-unique, opaque identity of a scheduled event.
///
/// The inner integer is `pub` for cheap logging and test assertions, but
/// callers should treat it as opaque: the only supported operations are
/// equality, ordering, and hashing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

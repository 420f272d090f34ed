use tel_types::{AuditEntry, ChainTip, ResourceRef};

use crate::error::StoreResult;

/// Result of a conditional commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The tip matched and the entry is durably appended.
    Committed(AuditEntry),
    /// Another writer advanced the tip first; nothing was written.
    Conflict,
}

/// Durable, ordered, append-only storage for one logical audit chain.
///
/// All implementations must satisfy these invariants:
/// - Entries are immutable once committed; the store never updates or
///   deletes them.
/// - `commit_if_tip_unchanged` is atomic: it compares the current tip
///   against the caller's expected tip and appends only on a match, as one
///   indivisible step. This is the chain's single mutation point and the
///   primitive that makes concurrent appends fork-free.
/// - A failed or conflicted commit leaves no trace — no partial entry, no
///   advanced tip.
/// - Scans observe only committed entries, in sequence order.
/// - All I/O errors are propagated, never silently ignored.
pub trait ChainStore: Send + Sync {
    /// The current chain tip: the latest entry's sequence and link, or
    /// [`ChainTip::Genesis`] for an empty chain.
    fn read_tip(&self) -> StoreResult<ChainTip>;

    /// Append `entry` if and only if the current tip still equals
    /// `expected`. Returns [`CommitOutcome::Conflict`] when another writer
    /// got there first.
    fn commit_if_tip_unchanged(
        &self,
        expected: &ChainTip,
        entry: AuditEntry,
    ) -> StoreResult<CommitOutcome>;

    /// All entries, ascending by sequence.
    fn scan_ordered(&self) -> StoreResult<Vec<AuditEntry>>;

    /// Entries for one resource, descending by sequence, at most `limit`.
    fn scan_filtered(&self, resource: &ResourceRef, limit: usize)
        -> StoreResult<Vec<AuditEntry>>;
}

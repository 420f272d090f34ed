use std::collections::HashSet;
use std::sync::RwLock;

use tel_types::{AuditEntry, ChainTip, LinkHash, ResourceRef};

use crate::error::{StoreError, StoreResult};
use crate::traits::{ChainStore, CommitOutcome};

/// In-memory chain store for tests and embedding.
///
/// Entries are held in commit order behind a `RwLock`; the write lock is the
/// critical section that makes `commit_if_tip_unchanged` atomic when one
/// process owns the store. A link set rejects duplicate links at commit
/// time.
pub struct InMemoryChainStore {
    inner: RwLock<ChainState>,
}

#[derive(Default)]
struct ChainState {
    entries: Vec<AuditEntry>,
    links: HashSet<LinkHash>,
}

impl ChainState {
    fn tip(&self) -> ChainTip {
        match self.entries.last() {
            None => ChainTip::Genesis,
            Some(entry) => ChainTip::of_entry(entry),
        }
    }
}

impl InMemoryChainStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ChainState::default()),
        }
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").entries.len()
    }

    /// Returns `true` if no entries have been committed.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").entries.is_empty()
    }

    /// Replace a committed entry in place, bypassing every chain check.
    ///
    /// This simulates storage-level tampering for integrity drills and
    /// verifier tests. Returns `false` if no entry with that sequence
    /// exists. Production code never mutates committed entries.
    pub fn overwrite_unchecked(
        &self,
        sequence: u64,
        mutate: impl FnOnce(&mut AuditEntry),
    ) -> bool {
        let mut state = self.inner.write().expect("lock poisoned");
        match state
            .entries
            .iter_mut()
            .find(|entry| entry.sequence == sequence)
        {
            Some(entry) => {
                mutate(entry);
                true
            }
            None => false,
        }
    }
}

impl Default for InMemoryChainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainStore for InMemoryChainStore {
    fn read_tip(&self) -> StoreResult<ChainTip> {
        Ok(self.inner.read().expect("lock poisoned").tip())
    }

    fn commit_if_tip_unchanged(
        &self,
        expected: &ChainTip,
        entry: AuditEntry,
    ) -> StoreResult<CommitOutcome> {
        let mut state = self.inner.write().expect("lock poisoned");

        let actual = state.tip();
        if actual != *expected {
            return Ok(CommitOutcome::Conflict);
        }

        if entry.sequence != actual.next_sequence() {
            return Err(StoreError::MisorderedAppend {
                expected: actual.next_sequence(),
                actual: entry.sequence,
            });
        }
        if entry.previous_link != actual.link() {
            return Err(StoreError::BrokenTipLink {
                sequence: entry.sequence,
            });
        }
        if state.links.contains(&entry.link) {
            return Err(StoreError::DuplicateLink(entry.link));
        }

        state.links.insert(entry.link);
        state.entries.push(entry.clone());
        Ok(CommitOutcome::Committed(entry))
    }

    fn scan_ordered(&self) -> StoreResult<Vec<AuditEntry>> {
        Ok(self.inner.read().expect("lock poisoned").entries.clone())
    }

    fn scan_filtered(
        &self,
        resource: &ResourceRef,
        limit: usize,
    ) -> StoreResult<Vec<AuditEntry>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .entries
            .iter()
            .rev()
            .filter(|entry| entry.resource == *resource)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for InMemoryChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryChainStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

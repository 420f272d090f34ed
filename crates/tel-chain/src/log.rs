use tel_crypto::{KeyProvider, LinkHasher};
use tel_store::ChainStore;
use tel_types::{AuditEntry, ChangeRecord, ResourceRef};

use crate::error::ChainError;
use crate::history::resource_history;
use crate::sequencer::{Sequencer, SequencerConfig};
use crate::verifier::{ChainVerifier, VerifyReport};

/// The audit log facade: one chain, one key, one store.
///
/// Bundles the sequencer, verifier, and history read path behind the three
/// public operations. Safe to share across threads (`&self` everywhere); the
/// store's conditional commit is the only synchronization point.
pub struct AuditLog<S: ChainStore> {
    store: S,
    hasher: LinkHasher,
    sequencer: Sequencer,
}

impl<S: ChainStore> AuditLog<S> {
    /// Open an audit log over `store` with the default sequencer tuning.
    pub fn new(store: S, keys: &dyn KeyProvider) -> Self {
        Self::with_config(store, keys, SequencerConfig::default())
    }

    /// Open an audit log with explicit sequencer tuning.
    pub fn with_config(store: S, keys: &dyn KeyProvider, config: SequencerConfig) -> Self {
        let hasher = LinkHasher::new(keys.signing_key());
        Self {
            sequencer: Sequencer::new(hasher.clone(), config),
            hasher,
            store,
        }
    }

    /// Append one change to the chain. Returns the committed entry.
    pub fn append(&self, record: ChangeRecord) -> Result<AuditEntry, ChainError> {
        self.sequencer.append(&self.store, record)
    }

    /// Recompute every link and report all divergences.
    pub fn verify(&self) -> Result<VerifyReport, ChainError> {
        ChainVerifier::verify(&self.store, &self.hasher)
    }

    /// Audit history for one resource, newest first, capped at `limit`.
    pub fn history(
        &self,
        resource: &ResourceRef,
        limit: usize,
    ) -> Result<Vec<AuditEntry>, ChainError> {
        resource_history(&self.store, resource, limit)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

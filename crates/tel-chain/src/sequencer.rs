use chrono::Utc;
use tracing::{debug, warn};

use tel_crypto::{CanonicalFields, LinkHasher};
use tel_store::{ChainStore, CommitOutcome};
use tel_types::{AuditEntry, ChangeRecord, EntryId};

use crate::error::ChainError;

/// Sequencer tuning.
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// How many times a lost optimistic race is retried before the append
    /// surfaces [`ChainError::Conflict`].
    pub max_retries: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self { max_retries: 8 }
    }
}

/// The append path: serializes concurrent writers into one total order.
///
/// Each attempt reads the chain tip, builds a candidate entry against it,
/// and hands it to the store's conditional commit. The commit succeeds only
/// if the tip is still what was read — so no two committed entries can ever
/// be produced from the same observed `previous_link`. A lost race retries
/// from a fresh tip, up to [`SequencerConfig::max_retries`] times.
///
/// An attempt aborted before its commit leaves no trace; commit is
/// all-or-nothing at the store boundary.
pub struct Sequencer {
    hasher: LinkHasher,
    config: SequencerConfig,
}

impl Sequencer {
    pub fn new(hasher: LinkHasher, config: SequencerConfig) -> Self {
        Self { hasher, config }
    }

    /// Validate, canonicalize, link, and commit one change record.
    pub fn append<S: ChainStore>(
        &self,
        store: &S,
        record: ChangeRecord,
    ) -> Result<AuditEntry, ChainError> {
        validate(&record)?;

        for attempt in 0..self.config.max_retries {
            let tip = store.read_tip()?;
            let timestamp = Utc::now();
            let canonical = CanonicalFields::of_record(&record, &timestamp).to_bytes()?;
            let link = self.hasher.link(&tip.link(), &canonical);

            let entry = AuditEntry {
                id: EntryId::new(),
                sequence: tip.next_sequence(),
                actor_id: record.actor_id.clone(),
                action: record.action.clone(),
                resource: record.resource.clone(),
                old_state: record.old_state.clone(),
                new_state: record.new_state.clone(),
                timestamp,
                previous_link: tip.link(),
                link,
            };

            match store.commit_if_tip_unchanged(&tip, entry)? {
                CommitOutcome::Committed(entry) => {
                    debug!(
                        sequence = entry.sequence,
                        link = %entry.link.short_hex(),
                        attempt,
                        "audit entry committed"
                    );
                    return Ok(entry);
                }
                CommitOutcome::Conflict => {
                    debug!(attempt, "append lost the tip race, retrying");
                }
            }
        }

        warn!(
            attempts = self.config.max_retries,
            "append exhausted its retries on tip conflicts"
        );
        Err(ChainError::Conflict {
            attempts: self.config.max_retries,
        })
    }
}

fn validate(record: &ChangeRecord) -> Result<(), ChainError> {
    if record.actor_id.is_empty() {
        return Err(ChainError::Validation {
            field: "actor_id",
            reason: "must not be empty".into(),
        });
    }
    if record.resource.resource_type.is_empty() {
        return Err(ChainError::Validation {
            field: "resource_type",
            reason: "must not be empty".into(),
        });
    }
    if record.resource.resource_id.is_empty() {
        return Err(ChainError::Validation {
            field: "resource_id",
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

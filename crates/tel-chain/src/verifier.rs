use tracing::warn;

use tel_crypto::{CanonicalFields, LinkHasher};
use tel_store::ChainStore;
use tel_types::{EntryId, LinkHash};

use crate::error::ChainError;

/// One divergence between a stored link and its recomputation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainBreak {
    /// The entry whose stored link does not match.
    pub entry_id: EntryId,
    /// The entry's position in the chain.
    pub sequence: u64,
    /// The link recomputed from the predecessor's stored link and this
    /// entry's canonical payload.
    pub expected_link: LinkHash,
    /// The link actually stored on the entry.
    pub found_link: LinkHash,
}

/// Outcome of a full-chain verification pass.
///
/// Breaks are findings, not failures: a tampered chain still verifies to
/// completion and reports every divergence it found, in sequence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    /// `true` when no breaks were found. An empty chain is trivially valid.
    pub valid: bool,
    /// All divergences, ascending by sequence.
    pub breaks: Vec<ChainBreak>,
}

/// Full-chain verifier: replays the stored order and recomputes every link.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Scan the chain in sequence order and recompute each entry's expected
    /// link from its predecessor's *stored* link.
    ///
    /// Advancing on the stored link (instead of cascading the recomputed
    /// value forward) is what localizes tampering: corrupting entry `k`'s
    /// payload is reported exactly once, at `k` — later entries still chain
    /// correctly against `k`'s unchanged stored link.
    pub fn verify<S: ChainStore>(
        store: &S,
        hasher: &LinkHasher,
    ) -> Result<VerifyReport, ChainError> {
        let entries = store.scan_ordered()?;
        let mut breaks = Vec::new();
        let mut running_link = LinkHash::GENESIS;

        for entry in &entries {
            let canonical = CanonicalFields::of_entry(entry).to_bytes()?;
            let expected = hasher.link(&running_link, &canonical);

            if expected != entry.link {
                warn!(
                    sequence = entry.sequence,
                    entry_id = %entry.id,
                    "hash chain break detected"
                );
                breaks.push(ChainBreak {
                    entry_id: entry.id.clone(),
                    sequence: entry.sequence,
                    expected_link: expected,
                    found_link: entry.link,
                });
            }

            running_link = entry.link;
        }

        Ok(VerifyReport {
            valid: breaks.is_empty(),
            breaks,
        })
    }
}

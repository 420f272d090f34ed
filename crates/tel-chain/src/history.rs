use tel_store::ChainStore;
use tel_types::{AuditEntry, ResourceRef};

use crate::error::ChainError;

/// Audit history for one resource: a filtered scan, newest first, capped at
/// `limit`. Pure delegation to the store — no chain logic.
pub fn resource_history<S: ChainStore>(
    store: &S,
    resource: &ResourceRef,
    limit: usize,
) -> Result<Vec<AuditEntry>, ChainError> {
    Ok(store.scan_filtered(resource, limit)?)
}

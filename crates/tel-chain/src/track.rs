use serde_json::Value;

use tel_store::ChainStore;
use tel_types::{Action, ActorId, AuditEntry, ChangeRecord, ResourceRef};

use crate::error::ChainError;
use crate::log::AuditLog;

/// Observer of a resource's externally visible state.
///
/// Implemented by the application: typically a query against the system of
/// record. Returns `None` when the resource does not (yet or anymore) exist.
pub trait StateSource {
    fn current_state(&self, resource: &ResourceRef) -> Result<Option<Value>, ChainError>;
}

/// Convenience collaborator that audits a mutation by observation: snapshot
/// the resource before, run the operation, snapshot after, and append an
/// `UPDATE` entry only if the observable state changed.
///
/// This carries no chain-correctness burden of its own — it is a thin client
/// of [`AuditLog::append`].
pub struct ChangeTracker<'a, S: ChainStore, O: StateSource> {
    log: &'a AuditLog<S>,
    source: &'a O,
}

impl<'a, S: ChainStore, O: StateSource> ChangeTracker<'a, S, O> {
    pub fn new(log: &'a AuditLog<S>, source: &'a O) -> Self {
        Self { log, source }
    }

    /// Snapshot `resource` and return a guard. Run the mutation while the
    /// guard is live, then call [`TrackGuard::finish`] to diff and append.
    /// Dropping the guard without finishing leaves no trace.
    pub fn begin(
        &self,
        actor_id: impl Into<ActorId>,
        resource: ResourceRef,
    ) -> Result<TrackGuard<'a, S, O>, ChainError> {
        let before = self.source.current_state(&resource)?;
        Ok(TrackGuard {
            log: self.log,
            source: self.source,
            actor_id: actor_id.into(),
            resource,
            before,
        })
    }
}

/// Open change-tracking scope holding the before-state snapshot.
pub struct TrackGuard<'a, S: ChainStore, O: StateSource> {
    log: &'a AuditLog<S>,
    source: &'a O,
    actor_id: ActorId,
    resource: ResourceRef,
    before: Option<Value>,
}

impl<S: ChainStore, O: StateSource> TrackGuard<'_, S, O> {
    /// Snapshot the after-state and append an `UPDATE` entry if it differs
    /// from the before-state. Returns the committed entry, or `None` when
    /// nothing observable changed.
    pub fn finish(self) -> Result<Option<AuditEntry>, ChainError> {
        let after = self.source.current_state(&self.resource)?;
        if self.before == after {
            return Ok(None);
        }
        let entry = self.log.append(ChangeRecord {
            actor_id: self.actor_id,
            action: Action::Update,
            resource: self.resource,
            old_state: self.before,
            new_state: after,
        })?;
        Ok(Some(entry))
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::actor::ActorId;
use crate::link::LinkHash;
use crate::resource::ResourceRef;

/// Unique identifier for an audit entry (UUID v7 for time-ordering).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(uuid::Uuid);

impl EntryId {
    /// Generate a new time-ordered entry ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.short_id())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied description of one state change.
///
/// This is the input to the append path. The sequencer turns it into an
/// [`AuditEntry`] by assigning the id, sequence, timestamp, and links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Who made the change.
    pub actor_id: ActorId,
    /// What was done.
    pub action: Action,
    /// The resource the change applies to.
    pub resource: ResourceRef,
    /// Observable state before the change, if any.
    pub old_state: Option<Value>,
    /// Observable state after the change, if any.
    pub new_state: Option<Value>,
}

impl ChangeRecord {
    /// Convenience constructor for a fully specified change.
    pub fn new(
        actor_id: impl Into<ActorId>,
        action: Action,
        resource: ResourceRef,
        old_state: Option<Value>,
        new_state: Option<Value>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            action,
            resource,
            old_state,
            new_state,
        }
    }
}

/// One committed link in the audit chain. Immutable once committed:
/// corrections are new entries referencing the original, never edits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Opaque unique identifier, assigned at commit.
    pub id: EntryId,
    /// Monotonic 1-based position assigned inside the guarded commit.
    /// This is the authoritative chain order.
    pub sequence: u64,
    /// Who made the change.
    pub actor_id: ActorId,
    /// What was done.
    pub action: Action,
    /// The resource the change applies to.
    pub resource: ResourceRef,
    /// Observable state before the change, if any.
    pub old_state: Option<Value>,
    /// Observable state after the change, if any.
    pub new_state: Option<Value>,
    /// Wall-clock capture time. Display only — never used for ordering.
    pub timestamp: DateTime<Utc>,
    /// The chain tip observed at append time ([`LinkHash::GENESIS`] for the
    /// first entry ever committed).
    pub previous_link: LinkHash,
    /// Keyed hash over the previous link and this entry's canonical payload.
    pub link: LinkHash,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AuditEntry {
        AuditEntry {
            id: EntryId::new(),
            sequence: 1,
            actor_id: ActorId::new("u1"),
            action: Action::Create,
            resource: ResourceRef::new("INVOICE", "inv-1"),
            old_state: None,
            new_state: Some(serde_json::json!({"status": "draft"})),
            timestamp: Utc::now(),
            previous_link: LinkHash::GENESIS,
            link: LinkHash::from_hash([3u8; 32]),
        }
    }

    #[test]
    fn entry_ids_are_unique() {
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn entry_ids_are_time_ordered() {
        let a = EntryId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = EntryId::new();
        assert!(a < b);
    }

    #[test]
    fn entry_id_display_roundtrip() {
        let id = EntryId::new();
        let parsed = EntryId::from_uuid(id.to_string().parse().unwrap());
        assert_eq!(id, parsed);
    }

    #[test]
    fn change_record_constructor() {
        let record = ChangeRecord::new(
            "u1",
            Action::Update,
            ResourceRef::new("USER", "7"),
            Some(serde_json::json!({"name": "a"})),
            Some(serde_json::json!({"name": "b"})),
        );
        assert_eq!(record.actor_id.as_str(), "u1");
        assert_eq!(record.action, Action::Update);
    }

    #[test]
    fn entry_serde_roundtrip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn absent_state_survives_serde() {
        let entry = sample_entry();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["old_state"], Value::Null);
        let parsed: AuditEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.old_state, None);
    }
}

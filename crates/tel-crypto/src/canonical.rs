use chrono::{DateTime, Utc};
use serde_json::Value;

use tel_types::{Action, ActorId, AuditEntry, ChangeRecord, ResourceRef};

/// Errors from canonicalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CanonicalError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Borrowed view of the logical fields that feed the link hash.
///
/// Excludes `link`, `previous_link`, `id`, and `sequence`: the link itself is
/// computed over these fields, the previous link enters the hash separately,
/// and id/sequence are storage-assigned. Both the append path (from a
/// [`ChangeRecord`]) and the verifier (from a stored [`AuditEntry`]) build
/// this view, which is what makes verification deterministic.
#[derive(Clone, Copy, Debug)]
pub struct CanonicalFields<'a> {
    pub actor_id: &'a ActorId,
    pub action: &'a Action,
    pub resource: &'a ResourceRef,
    pub timestamp: &'a DateTime<Utc>,
    pub old_state: Option<&'a Value>,
    pub new_state: Option<&'a Value>,
}

impl<'a> CanonicalFields<'a> {
    /// View of a caller-supplied change plus its capture timestamp.
    pub fn of_record(record: &'a ChangeRecord, timestamp: &'a DateTime<Utc>) -> Self {
        Self {
            actor_id: &record.actor_id,
            action: &record.action,
            resource: &record.resource,
            timestamp,
            old_state: record.old_state.as_ref(),
            new_state: record.new_state.as_ref(),
        }
    }

    /// View of a stored entry, for recomputing its expected link.
    pub fn of_entry(entry: &'a AuditEntry) -> Self {
        Self {
            actor_id: &entry.actor_id,
            action: &entry.action,
            resource: &entry.resource,
            timestamp: &entry.timestamp,
            old_state: entry.old_state.as_ref(),
            new_state: entry.new_state.as_ref(),
        }
    }

    /// Deterministic byte serialization: stable across process, platform,
    /// and locale. Two logically-equal entries always produce byte-identical
    /// output.
    ///
    /// The format is a JSON object with a fixed key sequence (never map
    /// iteration order), nested state values with recursively sorted keys,
    /// and an explicit `null` token for absent state:
    ///
    /// ```text
    /// {"action":…,"actor":…,"new":…,"old":…,"resource":"TYPE:id","timestamp":…}
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>, CanonicalError> {
        let mut out = Vec::with_capacity(128);

        out.extend_from_slice(b"{\"action\":");
        write_json_str(self.action.as_str(), &mut out)?;

        out.extend_from_slice(b",\"actor\":");
        write_json_str(self.actor_id.as_str(), &mut out)?;

        out.extend_from_slice(b",\"new\":");
        write_state(self.new_state, &mut out)?;

        out.extend_from_slice(b",\"old\":");
        write_state(self.old_state, &mut out)?;

        out.extend_from_slice(b",\"resource\":");
        write_json_str(&self.resource.to_string(), &mut out)?;

        out.extend_from_slice(b",\"timestamp\":");
        write_json_str(&canonical_timestamp(self.timestamp), &mut out)?;

        out.push(b'}');
        Ok(out)
    }
}

/// Fixed-precision UTC text form of a timestamp: microseconds, always six
/// fractional digits, always `Z`.
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Write a JSON value in canonical form: object keys in ascending byte order
/// recursively, array element order preserved, scalars in `serde_json`'s
/// standard token encoding.
pub fn canonical_json(value: &Value, out: &mut Vec<u8>) -> Result<(), CanonicalError> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => serde_json::to_writer(&mut *out, n)?,
        Value::String(s) => write_json_str(s, out)?,
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                canonical_json(item, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // Sort explicitly rather than trusting the map's iteration
            // order; serde_json's order depends on a feature flag.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_json_str(key, out)?;
                out.push(b':');
                canonical_json(&map[key.as_str()], out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

/// Absent state serializes as the explicit `null` token, never omitted.
/// `None` and `Some(Value::Null)` are both "no state" and canonicalize
/// identically; the marker itself is always present.
fn write_state(state: Option<&Value>, out: &mut Vec<u8>) -> Result<(), CanonicalError> {
    match state {
        None => {
            out.extend_from_slice(b"null");
            Ok(())
        }
        Some(value) => canonical_json(value, out),
    }
}

fn write_json_str(s: &str, out: &mut Vec<u8>) -> Result<(), CanonicalError> {
    serde_json::to_writer(&mut *out, s)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields_with_states<'a>(
        timestamp: &'a DateTime<Utc>,
        actor: &'a ActorId,
        action: &'a Action,
        resource: &'a ResourceRef,
        old_state: Option<&'a Value>,
        new_state: Option<&'a Value>,
    ) -> CanonicalFields<'a> {
        CanonicalFields {
            actor_id: actor,
            action,
            resource,
            timestamp,
            old_state,
            new_state,
        }
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    // -----------------------------------------------------------------------
    // Entry canonicalization
    // -----------------------------------------------------------------------

    #[test]
    fn canonical_bytes_are_deterministic() {
        let record = ChangeRecord::new(
            "u1",
            Action::Update,
            ResourceRef::new("INVOICE", "inv-1"),
            Some(json!({"status": "draft"})),
            Some(json!({"status": "paid"})),
        );
        let timestamp = ts();
        let a = CanonicalFields::of_record(&record, &timestamp)
            .to_bytes()
            .unwrap();
        let b = CanonicalFields::of_record(&record, &timestamp)
            .to_bytes()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn field_order_is_fixed() {
        let timestamp = ts();
        let actor = ActorId::new("u1");
        let action = Action::Create;
        let resource = ResourceRef::new("USER", "7");
        let fields = fields_with_states(&timestamp, &actor, &action, &resource, None, None);
        let bytes = fields.to_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "{\"action\":\"CREATE\",\"actor\":\"u1\",\"new\":null,\"old\":null,\
             \"resource\":\"USER:7\",\"timestamp\":\"2024-05-17T09:30:00.000000Z\"}"
        );
    }

    #[test]
    fn absent_and_json_null_state_are_identical() {
        let timestamp = ts();
        let actor = ActorId::new("u1");
        let action = Action::Delete;
        let resource = ResourceRef::new("USER", "7");
        let null = Value::Null;

        let absent = fields_with_states(&timestamp, &actor, &action, &resource, None, None)
            .to_bytes()
            .unwrap();
        let explicit =
            fields_with_states(&timestamp, &actor, &action, &resource, Some(&null), Some(&null))
                .to_bytes()
                .unwrap();
        assert_eq!(absent, explicit);
    }

    #[test]
    fn entry_and_record_views_agree() {
        let record = ChangeRecord::new(
            "u9",
            Action::Other("ARCHIVE".into()),
            ResourceRef::new("DOC", "d-3"),
            None,
            Some(json!({"archived": true})),
        );
        let timestamp = ts();
        let entry = AuditEntry {
            id: tel_types::EntryId::new(),
            sequence: 12,
            actor_id: record.actor_id.clone(),
            action: record.action.clone(),
            resource: record.resource.clone(),
            old_state: record.old_state.clone(),
            new_state: record.new_state.clone(),
            timestamp,
            previous_link: tel_types::LinkHash::GENESIS,
            link: tel_types::LinkHash::from_hash([1; 32]),
        };
        assert_eq!(
            CanonicalFields::of_record(&record, &timestamp)
                .to_bytes()
                .unwrap(),
            CanonicalFields::of_entry(&entry).to_bytes().unwrap()
        );
    }

    // -----------------------------------------------------------------------
    // Timestamps
    // -----------------------------------------------------------------------

    #[test]
    fn timestamp_has_fixed_precision() {
        let ts = Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap();
        assert_eq!(canonical_timestamp(&ts), "2023-11-14T22:13:20.123000Z");
    }

    #[test]
    fn timestamp_truncates_sub_microsecond() {
        let ts = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(canonical_timestamp(&ts), "2023-11-14T22:13:20.123456Z");
    }

    // -----------------------------------------------------------------------
    // Canonical JSON
    // -----------------------------------------------------------------------

    #[test]
    fn object_keys_are_sorted_recursively() {
        let value = json!({"z": {"b": 1, "a": 2}, "a": [3, 1, 2]});
        let mut out = Vec::new();
        canonical_json(&value, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"a\":[3,1,2],\"z\":{\"a\":2,\"b\":1}}"
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut forward = serde_json::Map::new();
        forward.insert("alpha".into(), json!(1));
        forward.insert("beta".into(), json!(2));
        let mut reverse = serde_json::Map::new();
        reverse.insert("beta".into(), json!(2));
        reverse.insert("alpha".into(), json!(1));

        let mut a = Vec::new();
        canonical_json(&Value::Object(forward), &mut a).unwrap();
        let mut b = Vec::new();
        canonical_json(&Value::Object(reverse), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scalars_encode_as_json_tokens() {
        for (value, expected) in [
            (json!(null), "null"),
            (json!(true), "true"),
            (json!(false), "false"),
            (json!(42), "42"),
            (json!(-1.5), "-1.5"),
            (json!("he\"llo"), "\"he\\\"llo\""),
        ] {
            let mut out = Vec::new();
            canonical_json(&value, &mut out).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), expected);
        }
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9 ]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_json_is_deterministic(value in arb_json()) {
            let mut a = Vec::new();
            canonical_json(&value, &mut a).unwrap();
            let mut b = Vec::new();
            canonical_json(&value, &mut b).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn canonical_json_parses_back_to_the_same_value(value in arb_json()) {
            let mut out = Vec::new();
            canonical_json(&value, &mut out).unwrap();
            let parsed: Value = serde_json::from_slice(&out).unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}

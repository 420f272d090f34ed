use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// What an actor did to a resource.
///
/// The vocabulary is open: the well-known verbs get dedicated variants, and
/// anything else travels as [`Action::Other`] with its label verbatim. The
/// wire form is always the label string (`"CREATE"`, `"UPDATE"`, ...), which
/// is also what the canonicalizer feeds into the link hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
    Other(String),
}

impl Action {
    /// The canonical label for this action.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Other(label) => label,
        }
    }

    /// Parse a label back into an action. Well-known labels map to their
    /// dedicated variants; everything else becomes [`Action::Other`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "CREATE" => Self::Create,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ActionVisitor;

        impl Visitor<'_> for ActionVisitor {
            type Value = Action;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an action label string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Action, E> {
                Ok(Action::from_label(value))
            }
        }

        deserializer.deserialize_str(ActionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_labels() {
        assert_eq!(Action::Create.as_str(), "CREATE");
        assert_eq!(Action::Update.as_str(), "UPDATE");
        assert_eq!(Action::Delete.as_str(), "DELETE");
    }

    #[test]
    fn other_carries_label_verbatim() {
        let action = Action::Other("ARCHIVE".into());
        assert_eq!(action.as_str(), "ARCHIVE");
        assert_eq!(format!("{action}"), "ARCHIVE");
    }

    #[test]
    fn from_label_maps_well_known_verbs() {
        assert_eq!(Action::from_label("CREATE"), Action::Create);
        assert_eq!(Action::from_label("UPDATE"), Action::Update);
        assert_eq!(Action::from_label("DELETE"), Action::Delete);
        assert_eq!(
            Action::from_label("RESTORE"),
            Action::Other("RESTORE".into())
        );
    }

    #[test]
    fn serde_uses_label_form() {
        let json = serde_json::to_string(&Action::Update).unwrap();
        assert_eq!(json, "\"UPDATE\"");
        let parsed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Action::Update);
    }

    #[test]
    fn serde_roundtrip_for_other() {
        let action = Action::Other("MERGE".into());
        let json = serde_json::to_string(&action).unwrap();
        let parsed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }
}

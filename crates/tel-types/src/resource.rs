use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to the resource a change applies to.
///
/// A resource is addressed by a `(resource_type, resource_id)` pair, e.g.
/// `INVOICE:inv-1`. Both parts are opaque to TEL and must be non-empty
/// (enforced at append time). The `TYPE:id` rendering is also the form the
/// canonicalizer hashes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Kind of resource (e.g. `USER`, `INVOICE`).
    pub resource_type: String,
    /// Identifier of the resource within its kind.
    pub resource_id: String,
}

impl ResourceRef {
    /// Create a resource reference.
    pub fn new(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)
    }
}

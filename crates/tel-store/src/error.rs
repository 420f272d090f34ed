use tel_types::LinkHash;

/// Errors from chain store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A commit carried a sequence number that does not extend the tip it
    /// was conditioned on. Indicates a buggy caller, not a lost race.
    #[error("misordered append: expected sequence {expected}, got {actual}")]
    MisorderedAppend { expected: u64, actual: u64 },

    /// A commit's `previous_link` does not match the tip it was conditioned
    /// on. Indicates a buggy caller, not a lost race.
    #[error("append at sequence {sequence} does not chain to the expected tip")]
    BrokenTipLink { sequence: u64 },

    /// The committed link already exists in the chain. Link collisions imply
    /// either a flawed hash function or tampering.
    #[error("duplicate link {0}")]
    DuplicateLink(LinkHash),

    /// Serialization or deserialization failure in a backend.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific infrastructure failure (connection lost, commit
    /// machinery broken). Propagated, never silently swallowed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

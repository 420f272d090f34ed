use tel_crypto::CanonicalError;
use tel_store::StoreError;

/// Errors produced by chain operations.
///
/// Detected tampering is deliberately NOT here: `verify()` reports breaks as
/// data in its [`VerifyReport`](crate::VerifyReport), because a tampered
/// entry is a diagnostic finding, not a failure of the call itself.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A required identifier was missing from the change record.
    #[error("validation failed for {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The optimistic commit lost the tip race on every allowed attempt.
    #[error("append conflicted with concurrent writers {attempts} times; giving up")]
    Conflict { attempts: u32 },

    /// Store adapter failure, propagated.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Canonicalization failure, propagated.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),

    /// A change-tracking state source failed to observe a resource.
    #[error("state capture failed: {0}")]
    StateCapture(String),
}

//! Cryptographic primitives for the Tamper-Evident Ledger.
//!
//! Provides deterministic canonicalization of audit entries and keyed BLAKE3
//! link hashing. The keyed hash binds authenticity to integrity: only holders
//! of the chain key can produce valid continuations of a chain, so an
//! attacker with raw storage access cannot rewrite history and recompute a
//! plausible-looking tail.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod canonical;
pub mod chain;

pub use canonical::{canonical_json, canonical_timestamp, CanonicalError, CanonicalFields};
pub use chain::{ChainKey, KeyProvider, LinkHasher, StaticKey};

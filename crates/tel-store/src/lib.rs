//! Store adapter boundary for the Tamper-Evident Ledger.
//!
//! This crate defines the [`ChainStore`] trait the core chains against —
//! latest-tip lookup, conditional/atomic append, and ordered scans — plus
//! [`InMemoryChainStore`], the reference implementation for tests and
//! embedding. Durable backends (SQL, KV, object storage) implement the same
//! trait; the only primitive they must supply atomically is
//! `commit_if_tip_unchanged`.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryChainStore;
pub use traits::{ChainStore, CommitOutcome};

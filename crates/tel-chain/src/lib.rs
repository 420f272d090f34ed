//! Core chain logic for the Tamper-Evident Ledger (TEL).
//!
//! This crate is the heart of TEL. It provides:
//! - [`Sequencer`] — the append path: validation, canonicalization, keyed
//!   linking, and bounded-retry conditional commit under concurrent writers
//! - [`ChainVerifier`] — full-chain replay that recomputes every link and
//!   localizes tampering to specific entries
//! - [`resource_history`] — per-resource history reads
//! - [`ChangeTracker`] — observe-before/observe-after change auditing
//! - [`AuditLog`] — the facade bundling all of the above over one store
//!
//! # Example
//!
//! ```
//! use tel_chain::AuditLog;
//! use tel_crypto::StaticKey;
//! use tel_store::InMemoryChainStore;
//! use tel_types::{Action, ChangeRecord, ResourceRef};
//!
//! let log = AuditLog::new(
//!     InMemoryChainStore::new(),
//!     &StaticKey::from_secret(b"app-secret"),
//! );
//!
//! log.append(ChangeRecord::new(
//!     "u1",
//!     Action::Create,
//!     ResourceRef::new("INVOICE", "inv-1"),
//!     None,
//!     Some(serde_json::json!({"status": "draft"})),
//! ))
//! .unwrap();
//!
//! let report = log.verify().unwrap();
//! assert!(report.valid);
//! ```

pub mod error;
pub mod history;
pub mod log;
pub mod sequencer;
pub mod track;
pub mod verifier;

pub use error::ChainError;
pub use history::resource_history;
pub use log::AuditLog;
pub use sequencer::{Sequencer, SequencerConfig};
pub use track::{ChangeTracker, StateSource, TrackGuard};
pub use verifier::{ChainBreak, ChainVerifier, VerifyReport};

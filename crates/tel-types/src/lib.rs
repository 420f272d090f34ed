//! Foundation types for the Tamper-Evident Ledger (TEL).
//!
//! This crate provides the core identity and structural types used throughout
//! the TEL system. Every other TEL crate depends on `tel-types`.
//!
//! # Key Types
//!
//! - [`AuditEntry`] — One committed, immutable link in the audit chain
//! - [`ChangeRecord`] — Caller-supplied description of a state change
//! - [`LinkHash`] — Keyed-hash link value, with [`LinkHash::GENESIS`] as the
//!   chain's starting marker
//! - [`ChainTip`] — The most recently committed link plus its sequence number
//! - [`EntryId`] — UUID v7 entry identifier (time-ordered)
//! - [`Action`] — Open CREATE/UPDATE/DELETE action vocabulary

pub mod action;
pub mod actor;
pub mod entry;
pub mod error;
pub mod link;
pub mod resource;
pub mod tip;

pub use action::Action;
pub use actor::ActorId;
pub use entry::{AuditEntry, ChangeRecord, EntryId};
pub use error::TypeError;
pub use link::LinkHash;
pub use resource::ResourceRef;
pub use tip::ChainTip;

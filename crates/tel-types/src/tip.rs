use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::AuditEntry;
use crate::link::LinkHash;

/// The most recently committed entry's link value plus its sequence number,
/// or `Genesis` for an empty chain.
///
/// The tip is the only mutable shared state in a chain. The sequencer reads
/// it, computes the next link against it, and hands it back to the store's
/// conditional commit, which succeeds only if the tip is still unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainTip {
    /// The chain has no entries yet.
    Genesis,
    /// The chain ends at the entry with this sequence and link.
    At { sequence: u64, link: LinkHash },
}

impl ChainTip {
    /// The tip as observed after committing the given entry.
    pub fn of_entry(entry: &AuditEntry) -> Self {
        Self::At {
            sequence: entry.sequence,
            link: entry.link,
        }
    }

    /// The link value a new entry must chain to.
    pub fn link(&self) -> LinkHash {
        match self {
            Self::Genesis => LinkHash::GENESIS,
            Self::At { link, .. } => *link,
        }
    }

    /// The sequence number the next committed entry will carry.
    pub fn next_sequence(&self) -> u64 {
        match self {
            Self::Genesis => 1,
            Self::At { sequence, .. } => sequence + 1,
        }
    }

    /// Returns `true` if the chain is empty.
    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }
}

impl fmt::Display for ChainTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => write!(f, "genesis"),
            Self::At { sequence, link } => write!(f, "#{sequence} [{}]", link.short_hex()),
        }
    }
}

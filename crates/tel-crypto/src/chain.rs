use std::fmt;

use tel_types::LinkHash;

/// Domain-separation context for folding secret material into a chain key.
const KEY_CONTEXT: &str = "tel-chain-key-v1";

/// Domain tag prepended to every link computation. Prevents a link from
/// colliding with any other keyed-hash use of the same secret.
const LINK_DOMAIN: &[u8] = b"tel-entry-v1:";

/// 32-byte secret key parameterizing the link hash.
///
/// A plain (unkeyed) hash would let anyone with storage access rewrite an
/// entry and recompute a valid-looking continuation. Keying the hash means
/// only key holders can produce links that verify.
#[derive(Clone)]
pub struct ChainKey([u8; 32]);

impl ChainKey {
    /// Fold arbitrary-length secret material into a chain key using the
    /// BLAKE3 key-derivation mode.
    pub fn derive(secret: &[u8]) -> Self {
        Self(blake3::derive_key(KEY_CONTEXT, secret))
    }

    /// Use a raw 32-byte key directly. Prefer [`ChainKey::derive`] unless the
    /// material is already a uniformly random 32-byte key.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for ChainKey {
    // Never print key material.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChainKey(..)")
    }
}

/// Source of the chain's signing key.
///
/// Provisioning and rotation live outside the core; this trait is the seam.
/// TEL assumes one stable key per chain lifetime — a versioned-key scheme
/// would slot in behind this trait.
pub trait KeyProvider: Send + Sync {
    fn signing_key(&self) -> ChainKey;
}

/// The single-stable-key provider: holds one key for the chain's lifetime.
pub struct StaticKey(ChainKey);

impl StaticKey {
    pub fn new(key: ChainKey) -> Self {
        Self(key)
    }

    /// Derive the key from secret material and hold it.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self(ChainKey::derive(secret))
    }
}

impl KeyProvider for StaticKey {
    fn signing_key(&self) -> ChainKey {
        self.0.clone()
    }
}

/// Keyed BLAKE3 link hasher.
///
/// Computes `link = KeyedHash(key, domain || previous_link || ":" ||
/// canonical_payload)`. The same `(previous, canonical)` pair always produces
/// the same link; a different key always produces a different link.
#[derive(Clone)]
pub struct LinkHasher {
    key: ChainKey,
}

impl LinkHasher {
    pub fn new(key: ChainKey) -> Self {
        Self { key }
    }

    /// Compute the link chaining `canonical` to `previous`.
    pub fn link(&self, previous: &LinkHash, canonical: &[u8]) -> LinkHash {
        let mut hasher = blake3::Hasher::new_keyed(&self.key.0);
        hasher.update(LINK_DOMAIN);
        hasher.update(previous.as_bytes());
        hasher.update(b":");
        hasher.update(canonical);
        LinkHash::from_hash(*hasher.finalize().as_bytes())
    }
}

//! Klaytn signatures as submitted against an account key.

use std::collections::{btree_map::Entry, BTreeMap};

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};

use crate::errors::SignatureError;

/// Offset Klaytn adds to the recovery id when writing `v`.
const V_OFFSET: u8 = 27;

/// A `[v, r, s]` signature made by the key at `index`.
///
/// `v` is 27 or 28 as Klaytn writes it; bare recovery ids 0 and 1 are
/// accepted too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSignature {
    index: u8,
    v: u8,
    r: [u8; 32],
    s: [u8; 32],
}

impl IndexedSignature {
    pub fn new(index: u8, v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { index, v, r, s }
    }

    /// Splits a 65-byte `r || s || v` signature, the layout produced when
    /// signing a message.
    pub fn from_rsv(index: u8, signature: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&signature[..32]);
        s.copy_from_slice(&signature[32..64]);
        Self::new(index, signature[64], r, s)
    }

    /// Position of the signing key in the account key's key list.
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// The recovery id carried in `v`, or `None` if `v` is not 0, 1, 27 or 28.
    pub fn recovery_id(&self) -> Option<RecoveryId> {
        let id = match self.v {
            0 | 1 => self.v,
            27 | 28 => self.v - V_OFFSET,
            _ => return None,
        };
        RecoveryId::from_i32(i32::from(id)).ok()
    }

    /// Converts to a signature the curve library can recover a key from.
    pub fn to_recoverable(&self) -> Result<RecoverableSignature, SignatureError> {
        let malformed = SignatureError::InvalidSignatureFormat { index: self.index };
        let recovery_id = self.recovery_id().ok_or_else(|| malformed.clone())?;

        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r);
        compact[32..].copy_from_slice(&self.s);
        RecoverableSignature::from_compact(&compact, recovery_id).map_err(|_| malformed)
    }
}

/// Signatures keyed by signer index, at most one per index.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    by_index: BTreeMap<u8, IndexedSignature>,
}

impl SignatureSet {
    /// Collects `signatures`, rejecting a second signature for the same index.
    pub fn new(
        signatures: impl IntoIterator<Item = IndexedSignature>,
    ) -> Result<Self, SignatureError> {
        let mut by_index = BTreeMap::new();
        for signature in signatures {
            match by_index.entry(signature.index) {
                Entry::Occupied(_) => {
                    return Err(SignatureError::DuplicateSignerIndex(signature.index))
                }
                Entry::Vacant(slot) => {
                    slot.insert(signature);
                }
            }
        }
        Ok(Self { by_index })
    }

    /// Signatures in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedSignature> + '_ {
        self.by_index.values()
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

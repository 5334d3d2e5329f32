//! Checking signatures against an account key.

use secp256k1::{Message, PublicKey, SECP256K1};
use tracing::trace;

use crate::{
    account_key::{AccountKey, WeightedMultiSig},
    errors::SignatureError,
    keys::PublicKeyMaterial,
    roles::Role,
    signature::{IndexedSignature, SignatureSet},
};

impl AccountKey {
    /// Checks that `signatures` over `message_hash` authorize `role`.
    ///
    /// The role is resolved first (see [`AccountKey::resolve`]). A public key
    /// needs a matching signature at index 0. A weighted multisig key needs
    /// matching signatures whose keys' weights reach the threshold;
    /// signatures that do not match their key are ignored.
    pub fn verify(
        &self,
        role: Role,
        signatures: &[IndexedSignature],
        message_hash: &[u8; 32],
    ) -> Result<(), SignatureError> {
        let policy = self.resolve(role)?;
        let signatures = SignatureSet::new(signatures.iter().cloned())?;

        match policy {
            AccountKey::Public(key) => verify_public_signature(key, &signatures, message_hash),
            AccountKey::WeightedMultiSig(multisig) => {
                verify_weighted_signatures(multisig, &signatures, message_hash)
            }
            AccountKey::Nil | AccountKey::Fail => {
                Err(SignatureError::Unsatisfiable(policy.key_type()))
            }
            AccountKey::Legacy | AccountKey::RoleBased(_) => {
                Err(SignatureError::UnsupportedKeyType(policy.key_type()))
            }
        }
    }
}

/// Checks that a signature at index 0 was made by `key`.
pub fn verify_public_signature(
    key: &PublicKeyMaterial,
    signatures: &SignatureSet,
    message_hash: &[u8; 32],
) -> Result<(), SignatureError> {
    let signers = matching_signers(&[key.point()], signatures, message_hash)?;
    if signers.is_empty() {
        return Err(SignatureError::InsufficientWeight {
            provided: 0,
            required: 1,
        });
    }
    Ok(())
}

/// Checks that the keys with matching signatures reach `multisig`'s threshold.
pub fn verify_weighted_signatures(
    multisig: &WeightedMultiSig,
    signatures: &SignatureSet,
    message_hash: &[u8; 32],
) -> Result<(), SignatureError> {
    let keys: Vec<&PublicKey> = multisig.keys().iter().map(|k| k.public_key().point()).collect();
    let signers = matching_signers(&keys, signatures, message_hash)?;

    let provided = multisig.weight_of(signers);
    if provided < u128::from(multisig.threshold()) {
        return Err(SignatureError::InsufficientWeight {
            provided,
            required: multisig.threshold(),
        });
    }

    trace!(provided, threshold = multisig.threshold(), "weighted signatures verified");
    Ok(())
}

/// Returns the indices whose signature recovers to the key at that index.
fn matching_signers(
    keys: &[&PublicKey],
    signatures: &SignatureSet,
    message_hash: &[u8; 32],
) -> Result<Vec<usize>, SignatureError> {
    let message = Message::from_digest(*message_hash);
    let mut signers = Vec::with_capacity(signatures.len());

    for indexed_sig in signatures.iter() {
        let index = indexed_sig.index() as usize;
        let Some(expected) = keys.get(index) else {
            return Err(SignatureError::SignerIndexOutOfBounds {
                index: indexed_sig.index(),
                max: keys.len(),
            });
        };

        match recover(&message, indexed_sig)? {
            Some(recovered) if &recovered == *expected => signers.push(index),
            _ => trace!(index, "signature does not match the key at its index"),
        }
    }

    Ok(signers)
}

fn recover(
    message: &Message,
    indexed_sig: &IndexedSignature,
) -> Result<Option<PublicKey>, SignatureError> {
    let recoverable = indexed_sig.to_recoverable()?;
    Ok(SECP256K1.recover_ecdsa(message, &recoverable).ok())
}

//! Weighted multisig account keys.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{errors::KeyError, weighted::WeightedPublicKey};

/// Maximum number of keys in a multisig key list.
pub const MAX_MULTISIG_KEYS: usize = 10;

/// Checks the length bounds shared by every multisig key list.
pub(crate) fn check_key_count(count: usize) -> Result<(), KeyError> {
    if count == 0 {
        return Err(KeyError::EmptyKeyList);
    }
    if count > MAX_MULTISIG_KEYS {
        return Err(KeyError::TooManyKeys {
            count,
            max: MAX_MULTISIG_KEYS,
        });
    }
    Ok(())
}

/// A weighted multisig policy.
///
/// A set of signers is authorized when the weights of the distinct keys that
/// signed add up to at least `threshold`. Key order is significant: signature
/// `i` is checked against key `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedMultiSig {
    threshold: u64,
    keys: Vec<WeightedPublicKey>,
}

impl WeightedMultiSig {
    /// Creates a new weighted multisig policy.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if:
    /// - `ZeroThreshold`: the threshold is zero
    /// - `EmptyKeyList`: there are no keys
    /// - `TooManyKeys`: there are more than [`MAX_MULTISIG_KEYS`] keys
    /// - `DuplicateKey`: two entries are the same curve point, in whatever
    ///   form each was supplied
    ///
    /// A threshold above the total weight is accepted but can never be met;
    /// see [`Self::is_satisfiable`].
    pub fn try_new(threshold: u64, keys: Vec<WeightedPublicKey>) -> Result<Self, KeyError> {
        if threshold == 0 {
            return Err(KeyError::ZeroThreshold);
        }
        check_key_count(keys.len())?;

        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !seen.insert(key.public_key().compressed()) {
                return Err(KeyError::DuplicateKey(key.public_key().as_hex().to_owned()));
            }
        }

        let multisig = Self { threshold, keys };
        if !multisig.is_satisfiable() {
            warn!(
                threshold,
                total_weight = %multisig.total_weight(),
                "weighted multisig threshold exceeds total key weight"
            );
        }
        debug!(threshold, keys = multisig.keys.len(), "constructed weighted multisig key");
        Ok(multisig)
    }

    /// Builds a policy from public keys and a parallel list of weights.
    pub fn from_public_keys(
        threshold: u64,
        public_keys: &[&str],
        weights: &[u64],
    ) -> Result<Self, KeyError> {
        if public_keys.len() != weights.len() {
            return Err(KeyError::InvalidShape(format!(
                "{} public keys but {} weights",
                public_keys.len(),
                weights.len()
            )));
        }

        let keys = public_keys
            .iter()
            .zip(weights)
            .map(|(key, weight)| WeightedPublicKey::new(*weight, key))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(threshold, keys)
    }

    /// Minimum total signer weight.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Weighted keys, in signer index order.
    pub fn keys(&self) -> &[WeightedPublicKey] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false for a constructed policy.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sum of every key's weight.
    pub fn total_weight(&self) -> u128 {
        self.keys.iter().map(|k| u128::from(k.weight())).sum()
    }

    /// Whether all keys together reach the threshold.
    pub fn is_satisfiable(&self) -> bool {
        self.total_weight() >= u128::from(self.threshold)
    }

    /// Sum of the weights of the distinct, in-range key indices given.
    pub fn weight_of(&self, indices: impl IntoIterator<Item = usize>) -> u128 {
        let distinct: HashSet<usize> = indices.into_iter().collect();
        distinct
            .into_iter()
            .filter_map(|i| self.keys.get(i))
            .map(|k| u128::from(k.weight()))
            .sum()
    }

    /// Whether the given signer indices carry enough weight.
    pub fn is_met_by(&self, indices: impl IntoIterator<Item = usize>) -> bool {
        self.weight_of(indices) >= u128::from(self.threshold)
    }
}

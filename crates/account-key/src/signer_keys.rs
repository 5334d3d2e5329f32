//! Signer-side key holders.
//!
//! A wallet keeps the raw key strings it signs with, which may be private
//! keys. These types expose, per role, which of those keys must produce
//! signatures, and convert to public keys through a caller-supplied derive
//! function such as [`derive_public_key`](crate::keys::derive_public_key).

use std::{collections::HashSet, slice};

use tracing::debug;

use crate::{
    account_key::{check_key_count, AccountKey, AccountKeyType, WeightedMultiSig},
    errors::KeyError,
    keys::utils::{
        is_hex_digits, strip_hex_prefix, COMPRESSED_HEX_LEN, PRIVATE_KEY_HEX_LEN, RAW_XY_HEX_LEN,
        UNCOMPRESSED_HEX_LEN,
    },
    roles::Role,
    weighted::WeightedPublicKey,
};

/// Checks that `key` looks like a hex private or public key.
fn check_key_shape(key: &str) -> Result<(), KeyError> {
    let body = strip_hex_prefix(key);
    let known_len = matches!(
        body.len(),
        PRIVATE_KEY_HEX_LEN | COMPRESSED_HEX_LEN | RAW_XY_HEX_LEN | UNCOMPRESSED_HEX_LEN
    );
    if known_len && is_hex_digits(body) {
        Ok(())
    } else {
        Err(KeyError::InvalidShape(format!(
            "expected a hex private or public key, got {key:?}"
        )))
    }
}

/// A single key that signs for every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountKeyPublic {
    key: String,
}

impl AccountKeyPublic {
    pub fn from_raw(key: &str) -> Result<Self, KeyError> {
        check_key_shape(key)?;
        Ok(Self {
            key: key.to_owned(),
        })
    }

    /// Copies the key held by `other`.
    pub fn from_existing(other: &AccountKeyPublic) -> Self {
        Self {
            key: other.key.clone(),
        }
    }

    pub fn key_type(&self) -> AccountKeyType {
        AccountKeyType::Public
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_key(&self) -> &str {
        &self.key
    }

    pub fn transaction_key(&self) -> &str {
        &self.key
    }

    pub fn update_key(&self) -> &str {
        &self.key
    }

    pub fn fee_payer_key(&self) -> &str {
        &self.key
    }

    /// Applies `derive` to the held key.
    pub fn to_public_key<F>(&self, derive: F) -> Result<Self, KeyError>
    where
        F: Fn(&str) -> Result<String, KeyError>,
    {
        Self::from_raw(&derive(&self.key)?)
    }

    pub fn update(&mut self, other: &AccountKeyPublic) {
        self.key.clone_from(&other.key);
    }

    /// The on-chain policy for this key. The held key must be public.
    pub fn to_account_key(&self) -> Result<AccountKey, KeyError> {
        AccountKey::public(&self.key)
    }
}

/// Several keys, each a candidate signer for every role.
///
/// Order is kept: signature `i` comes from key `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountKeyMultiSig {
    keys: Vec<String>,
}

impl AccountKeyMultiSig {
    /// Creates a multisig key holder.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if:
    /// - `EmptyKeyList`: `keys` is empty
    /// - `TooManyKeys`: `keys` has more than
    ///   [`MAX_MULTISIG_KEYS`](crate::account_key::MAX_MULTISIG_KEYS) entries
    /// - `DuplicateKey`: two entries are the exact same string
    /// - `InvalidShape`: an entry is not a hex key
    ///
    /// Duplicates are found by exact string comparison, before any
    /// normalization.
    pub fn from_raw(keys: Vec<String>) -> Result<Self, KeyError> {
        check_key_count(keys.len())?;

        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !seen.insert(key.as_str()) {
                return Err(KeyError::DuplicateKey(key.clone()));
            }
        }

        for key in &keys {
            check_key_shape(key)?;
        }

        debug!(keys = keys.len(), "constructed multisig signer keys");
        Ok(Self { keys })
    }

    /// Copies the keys held by `other`.
    pub fn from_existing(other: &AccountKeyMultiSig) -> Self {
        Self {
            keys: other.keys.clone(),
        }
    }

    pub fn key_type(&self) -> AccountKeyType {
        AccountKeyType::WeightedMultiSig
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The first key.
    pub fn default_key(&self) -> &str {
        &self.keys[0]
    }

    pub fn transaction_key(&self) -> &[String] {
        &self.keys
    }

    pub fn update_key(&self) -> &[String] {
        &self.keys
    }

    pub fn fee_payer_key(&self) -> &[String] {
        &self.keys
    }

    /// Applies `derive` to every key, keeping order.
    ///
    /// The derived list is not checked for duplicates again: entries that
    /// were distinct strings may derive to the same key.
    pub fn to_public_key<F>(&self, derive: F) -> Result<Self, KeyError>
    where
        F: Fn(&str) -> Result<String, KeyError>,
    {
        let keys = self
            .keys
            .iter()
            .map(|key| derive(key.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }

    pub fn update(&mut self, other: &AccountKeyMultiSig) {
        self.keys.clone_from(&other.keys);
    }

    /// The on-chain policy for these keys with the given weights. The held
    /// keys must be public.
    pub fn to_weighted_multisig(
        &self,
        threshold: u64,
        weights: &[u64],
    ) -> Result<WeightedMultiSig, KeyError> {
        if weights.len() != self.keys.len() {
            return Err(KeyError::InvalidShape(format!(
                "{} keys but {} weights",
                self.keys.len(),
                weights.len()
            )));
        }
        let keys = self
            .keys
            .iter()
            .zip(weights)
            .map(|(key, weight)| WeightedPublicKey::new(*weight, key))
            .collect::<Result<Vec<_>, _>>()?;
        WeightedMultiSig::try_new(threshold, keys)
    }
}

/// Either kind of signer-side key holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerKey {
    Public(AccountKeyPublic),
    MultiSig(AccountKeyMultiSig),
}

impl SignerKey {
    pub fn key_type(&self) -> AccountKeyType {
        match self {
            Self::Public(key) => key.key_type(),
            Self::MultiSig(keys) => keys.key_type(),
        }
    }

    pub fn default_key(&self) -> &str {
        match self {
            Self::Public(key) => key.default_key(),
            Self::MultiSig(keys) => keys.default_key(),
        }
    }

    /// Keys that must sign for `role`.
    pub fn keys_for(&self, role: Role) -> &[String] {
        match (self, role) {
            (Self::Public(key), _) => slice::from_ref(&key.key),
            (Self::MultiSig(keys), Role::Transaction) => keys.transaction_key(),
            (Self::MultiSig(keys), Role::AccountUpdate) => keys.update_key(),
            (Self::MultiSig(keys), Role::FeePayer) => keys.fee_payer_key(),
        }
    }

    pub fn to_public_key<F>(&self, derive: F) -> Result<Self, KeyError>
    where
        F: Fn(&str) -> Result<String, KeyError>,
    {
        Ok(match self {
            Self::Public(key) => Self::Public(key.to_public_key(derive)?),
            Self::MultiSig(keys) => Self::MultiSig(keys.to_public_key(derive)?),
        })
    }

    /// Replaces the held keys with `other`'s.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::ShapeMismatch`] if `other` is the other kind.
    pub fn update(&mut self, other: &SignerKey) -> Result<(), KeyError> {
        match (self, other) {
            (Self::Public(key), Self::Public(other)) => key.update(other),
            (Self::MultiSig(keys), Self::MultiSig(other)) => keys.update(other),
            (this, other) => {
                return Err(KeyError::ShapeMismatch {
                    expected: this.key_type(),
                    found: other.key_type(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        account_key::MAX_MULTISIG_KEYS,
        keys::derive_public_key,
        test_utils::{compressed_key_hex, private_key_hex, raw_xy_key_hex, uncompressed_key_hex},
    };

    fn uncompressed_keys(seeds: impl IntoIterator<Item = u8>) -> Vec<String> {
        seeds.into_iter().map(uncompressed_key_hex).collect()
    }

    #[test]
    fn test_public_key_serves_every_role() {
        let key = AccountKeyPublic::from_raw(&compressed_key_hex(1)).unwrap();
        assert_eq!(key.key_type(), AccountKeyType::Public);
        assert_eq!(key.default_key(), compressed_key_hex(1));
        assert_eq!(key.transaction_key(), key.update_key());
        assert_eq!(key.update_key(), key.fee_payer_key());
    }

    #[test]
    fn test_public_key_rejects_non_key_input() {
        assert!(matches!(
            AccountKeyPublic::from_raw("hello"),
            Err(KeyError::InvalidShape(_))
        ));
        assert!(matches!(
            AccountKeyPublic::from_raw(&format!("0x{}", "g".repeat(64))),
            Err(KeyError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_public_key_copy_and_update() {
        let first = AccountKeyPublic::from_raw(&compressed_key_hex(1)).unwrap();
        let second = AccountKeyPublic::from_raw(&private_key_hex(2)).unwrap();

        assert_eq!(AccountKeyPublic::from_existing(&first), first);

        let mut key = first.clone();
        key.update(&second);
        assert_eq!(key, second);
    }

    #[test]
    fn test_public_key_derivation() {
        let key = AccountKeyPublic::from_raw(&private_key_hex(3)).unwrap();
        let public = key.to_public_key(derive_public_key).unwrap();
        assert_eq!(public.key(), uncompressed_key_hex(3));
        assert_eq!(
            public.to_account_key().unwrap().encode(),
            AccountKey::public(&compressed_key_hex(3)).unwrap().encode()
        );
    }

    #[test]
    fn test_multisig_creation() {
        let keys = uncompressed_keys([1, 2, 3]);
        let multisig = AccountKeyMultiSig::from_raw(keys.clone()).unwrap();

        assert_eq!(multisig.keys().len(), 3);
        assert_eq!(multisig.default_key(), keys[0]);
        assert_eq!(multisig.transaction_key(), keys.as_slice());
        assert_eq!(multisig.update_key(), keys.as_slice());
        assert_eq!(multisig.fee_payer_key(), keys.as_slice());
    }

    #[test]
    fn test_multisig_count_bounds() {
        assert_eq!(
            AccountKeyMultiSig::from_raw(vec![]),
            Err(KeyError::EmptyKeyList)
        );
        assert!(AccountKeyMultiSig::from_raw(uncompressed_keys(1..=10)).is_ok());
        assert_eq!(
            AccountKeyMultiSig::from_raw(uncompressed_keys(1..=11)),
            Err(KeyError::TooManyKeys {
                count: 11,
                max: MAX_MULTISIG_KEYS
            })
        );
    }

    #[test]
    fn test_multisig_duplicates_are_exact_string_matches() {
        let key = uncompressed_key_hex(1);
        assert_eq!(
            AccountKeyMultiSig::from_raw(vec![key.clone(), uncompressed_key_hex(2), key.clone()]),
            Err(KeyError::DuplicateKey(key.clone()))
        );

        // Same key without the prefix is a different string.
        let unprefixed = strip_hex_prefix(&key).to_owned();
        assert!(AccountKeyMultiSig::from_raw(vec![key, unprefixed]).is_ok());
    }

    #[test]
    fn test_multisig_derivation_after_prefix_variants() {
        let key = uncompressed_key_hex(1);
        let unprefixed = strip_hex_prefix(&key).to_owned();
        let multisig = AccountKeyMultiSig::from_raw(vec![key.clone(), unprefixed]).unwrap();

        let public = multisig.to_public_key(derive_public_key).unwrap();
        assert_eq!(public.keys(), [key.clone(), key].as_slice());
    }

    #[test]
    fn test_multisig_derivation_keeps_order() {
        let privates = vec![private_key_hex(3), private_key_hex(1), private_key_hex(2)];
        let multisig = AccountKeyMultiSig::from_raw(privates).unwrap();
        let public = multisig.to_public_key(derive_public_key).unwrap();

        assert_eq!(public.keys(), uncompressed_keys([3, 1, 2]).as_slice());
    }

    #[test]
    fn test_multisig_update_replaces_keys() {
        let mut multisig = AccountKeyMultiSig::from_raw(uncompressed_keys([1, 2, 3])).unwrap();
        let other = AccountKeyMultiSig::from_raw(uncompressed_keys([4])).unwrap();

        multisig.update(&other);
        assert_eq!(multisig, other);
        assert_eq!(AccountKeyMultiSig::from_existing(&other), other);
    }

    #[test]
    fn test_multisig_to_weighted_multisig() {
        let multisig = AccountKeyMultiSig::from_raw(uncompressed_keys([1, 2])).unwrap();
        let weighted = multisig.to_weighted_multisig(2, &[1, 1]).unwrap();
        assert_eq!(weighted.len(), 2);
        assert!(matches!(
            multisig.to_weighted_multisig(2, &[1]),
            Err(KeyError::InvalidShape(_))
        ));

        let privates = AccountKeyMultiSig::from_raw(vec![private_key_hex(1)]).unwrap();
        assert!(matches!(
            privates.to_weighted_multisig(1, &[1]),
            Err(KeyError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_signer_key_update_checks_shape() {
        let public = SignerKey::Public(AccountKeyPublic::from_raw(&compressed_key_hex(1)).unwrap());
        let multisig =
            SignerKey::MultiSig(AccountKeyMultiSig::from_raw(uncompressed_keys([2, 3])).unwrap());

        let mut key = public.clone();
        assert_eq!(
            key.update(&multisig),
            Err(KeyError::ShapeMismatch {
                expected: AccountKeyType::Public,
                found: AccountKeyType::WeightedMultiSig,
            })
        );
        assert_eq!(key, public);

        let replacement =
            SignerKey::Public(AccountKeyPublic::from_raw(&compressed_key_hex(4)).unwrap());
        key.update(&replacement).unwrap();
        assert_eq!(key, replacement);
    }

    #[test]
    fn test_signer_key_role_keys() {
        let public = SignerKey::Public(AccountKeyPublic::from_raw(&compressed_key_hex(1)).unwrap());
        for role in Role::ALL {
            assert_eq!(public.keys_for(role), &[compressed_key_hex(1)]);
        }

        let keys = uncompressed_keys([2, 3]);
        let multisig = SignerKey::MultiSig(AccountKeyMultiSig::from_raw(keys.clone()).unwrap());
        for role in Role::ALL {
            assert_eq!(multisig.keys_for(role), keys.as_slice());
        }
        assert_eq!(multisig.default_key(), keys[0]);

        let derived = SignerKey::MultiSig(
            AccountKeyMultiSig::from_raw(vec![private_key_hex(2)]).unwrap(),
        )
        .to_public_key(derive_public_key)
        .unwrap();
        assert_eq!(derived.default_key(), uncompressed_key_hex(2));
    }

    fn key_in_form(seed: u8, form: u8) -> String {
        match form {
            0 => private_key_hex(seed),
            1 => compressed_key_hex(seed),
            2 => uncompressed_key_hex(seed),
            _ => raw_xy_key_hex(seed),
        }
    }

    proptest! {
        #[test]
        fn proptest_distinct_key_lists_are_accepted(
            seeds in prop::sample::subsequence((1u8..=40).collect::<Vec<_>>(), 1..=MAX_MULTISIG_KEYS),
            forms in prop::collection::vec(0u8..4, MAX_MULTISIG_KEYS),
        ) {
            let keys: Vec<String> = seeds
                .iter()
                .zip(&forms)
                .map(|(&seed, &form)| key_in_form(seed, form))
                .collect();

            let multisig = AccountKeyMultiSig::from_raw(keys.clone()).unwrap();
            prop_assert_eq!(multisig.keys(), keys.as_slice());
            prop_assert_eq!(multisig.default_key(), keys[0].as_str());
        }
    }
}

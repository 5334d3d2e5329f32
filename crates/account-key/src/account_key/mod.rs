//! The account key: an account's signing policy.
//!
//! [`AccountKey`] is a closed set of variants. Payload-carrying variants are
//! validated on construction and are never partially mutated; `update`
//! replaces the whole value.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    encoding,
    errors::{EncodingError, KeyError},
    keys::PublicKeyMaterial,
    roles::Role,
    weighted::WeightedPublicKey,
};

mod multisig;
mod role_based;

pub(crate) use multisig::check_key_count;
pub use multisig::{WeightedMultiSig, MAX_MULTISIG_KEYS};
pub use role_based::{RoleBased, MAX_ROLE_KEYS};

/// Type tag of an account key, as written on the wire.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKeyType {
    Nil = 0x00,
    Legacy = 0x01,
    Public = 0x02,
    Fail = 0x03,
    WeightedMultiSig = 0x04,
    RoleBased = 0x05,
}

impl AccountKeyType {
    /// Leading byte of the canonical encoding.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Looks up the type for a tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Self::Nil),
            0x01 => Some(Self::Legacy),
            0x02 => Some(Self::Public),
            0x03 => Some(Self::Fail),
            0x04 => Some(Self::WeightedMultiSig),
            0x05 => Some(Self::RoleBased),
            _ => None,
        }
    }

    /// Human-readable name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Legacy => "legacy",
            Self::Public => "public",
            Self::Fail => "fail",
            Self::WeightedMultiSig => "weighted multisig",
            Self::RoleBased => "role-based",
        }
    }
}

impl fmt::Display for AccountKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An account's authorization policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AccountKey {
    /// No key; the account cannot sign.
    Nil,

    /// The key is derived from the account address.
    Legacy,

    /// No signature ever satisfies the policy.
    Fail,

    /// One key authorizes every role.
    Public(PublicKeyMaterial),

    /// Weighted keys; signers must reach the threshold.
    #[serde(rename = "weighted_multisig")]
    WeightedMultiSig(WeightedMultiSig),

    /// Separate policies for the transaction, update and fee-payer roles.
    RoleBased(RoleBased),
}

impl AccountKey {
    /// Builds a [`AccountKey::Public`] from a hex public key.
    pub fn public(public_key: &str) -> Result<Self, KeyError> {
        let key = PublicKeyMaterial::from_hex(public_key)?;
        debug!(key = %key, "constructed public account key");
        Ok(Self::Public(key))
    }

    /// Builds a [`AccountKey::WeightedMultiSig`], see [`WeightedMultiSig::try_new`].
    pub fn weighted_multisig(
        threshold: u64,
        keys: Vec<WeightedPublicKey>,
    ) -> Result<Self, KeyError> {
        Ok(Self::WeightedMultiSig(WeightedMultiSig::try_new(
            threshold, keys,
        )?))
    }

    /// Builds a [`AccountKey::RoleBased`], see [`RoleBased::try_new`].
    pub fn role_based(keys: Vec<AccountKey>) -> Result<Self, KeyError> {
        Ok(Self::RoleBased(RoleBased::try_new(keys)?))
    }

    pub fn key_type(&self) -> AccountKeyType {
        match self {
            Self::Nil => AccountKeyType::Nil,
            Self::Legacy => AccountKeyType::Legacy,
            Self::Fail => AccountKeyType::Fail,
            Self::Public(_) => AccountKeyType::Public,
            Self::WeightedMultiSig(_) => AccountKeyType::WeightedMultiSig,
            Self::RoleBased(_) => AccountKeyType::RoleBased,
        }
    }

    /// Returns the policy that governs `role`.
    ///
    /// Keys that are not role-based govern every role themselves. For
    /// role-based keys see [`RoleBased::resolve`].
    pub fn resolve(&self, role: Role) -> Result<&AccountKey, KeyError> {
        match self {
            Self::RoleBased(role_based) => role_based.resolve(role),
            other => Ok(other),
        }
    }

    /// Replaces this key with `other`, whatever variant either one is.
    pub fn update(&mut self, other: &AccountKey) {
        debug!(from = %self.key_type(), to = %other.key_type(), "replacing account key");
        *self = other.clone();
    }

    /// Canonical encoding, see [`encoding::encode`].
    pub fn encode(&self) -> Vec<u8> {
        encoding::encode(self)
    }

    /// Canonical encoding as `0x`-prefixed hex.
    pub fn encode_hex(&self) -> String {
        encoding::encode_hex(&self.encode())
    }

    /// Inverse of [`Self::encode`], see [`encoding::decode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        encoding::decode(bytes)
    }

    pub fn decode_hex(hex: &str) -> Result<Self, EncodingError> {
        encoding::decode(&encoding::decode_hex(hex)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{compressed_key_hex, uncompressed_key_hex};

    fn multisig() -> AccountKey {
        AccountKey::weighted_multisig(
            2,
            vec![
                WeightedPublicKey::new(1, &compressed_key_hex(1)).unwrap(),
                WeightedPublicKey::new(1, &compressed_key_hex(2)).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_type_tags_roundtrip() {
        for tag in 0x00..=0x05 {
            let key_type = AccountKeyType::from_tag(tag).unwrap();
            assert_eq!(key_type.tag(), tag);
        }
        assert_eq!(AccountKeyType::from_tag(0x06), None);
    }

    #[test]
    fn test_non_role_based_keys_govern_every_role() {
        let public = AccountKey::public(&uncompressed_key_hex(1)).unwrap();
        let multisig = multisig();
        for role in Role::ALL {
            assert_eq!(public.resolve(role).unwrap(), &public);
            assert_eq!(multisig.resolve(role).unwrap(), &multisig);
            assert_eq!(AccountKey::Fail.resolve(role).unwrap(), &AccountKey::Fail);
        }
    }

    #[test]
    fn test_update_replaces_whole_key() {
        let public = AccountKey::public(&uncompressed_key_hex(1)).unwrap();
        let multisig = multisig();

        let mut key = public.clone();
        key.update(&multisig);
        assert_eq!(key, multisig);

        key.update(&AccountKey::Legacy);
        assert_eq!(key, AccountKey::Legacy);

        key.update(&public);
        assert_eq!(key, public);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(AccountKey::Legacy).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "legacy" }));

        let public = AccountKey::public(&compressed_key_hex(1)).unwrap();
        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "public", "value": compressed_key_hex(1) })
        );

        let json = serde_json::to_value(multisig()).unwrap();
        assert_eq!(json["type"], "weighted_multisig");
        assert_eq!(json["value"]["threshold"], 2);
    }
}

//! Validated secp256k1 public key material.

use std::{fmt, str::FromStr};

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use super::utils::{add_hex_prefix, parse_public_key, strip_hex_prefix, COMPRESSED_HEX_LEN};
use crate::errors::KeyError;

/// A public key as supplied by the caller, checked to be on the curve.
///
/// Keeps the `0x`-prefixed hex the caller gave, with its digit case, next to
/// the parsed point. Whether the input was compressed or not, the canonical
/// byte form is always the 33-byte compressed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    hex: String,
    point: PublicKey,
}

impl PublicKeyMaterial {
    /// Parses compressed (66 hex), uncompressed (130 hex, `04` prefix) or
    /// bare `X || Y` (128 hex) keys, with or without a `0x` prefix.
    pub fn from_hex(key: &str) -> Result<Self, KeyError> {
        let point = parse_public_key(key)?;
        Ok(Self {
            hex: add_hex_prefix(key),
            point,
        })
    }

    /// Parses a 33-byte compressed or 65-byte uncompressed SEC1 key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let point = PublicKey::from_slice(bytes).map_err(|e| KeyError::InvalidKey {
            key: hex::encode(bytes),
            reason: e.to_string(),
        })?;
        Ok(Self {
            hex: format!("0x{}", hex::encode(bytes)),
            point,
        })
    }

    /// The normalized `0x`-prefixed hex string.
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    pub fn point(&self) -> &PublicKey {
        &self.point
    }

    /// Whether the key was supplied in compressed form.
    pub fn is_compressed(&self) -> bool {
        strip_hex_prefix(&self.hex).len() == COMPRESSED_HEX_LEN
    }

    /// 33-byte SEC1 compressed form.
    pub fn compressed(&self) -> [u8; 33] {
        self.point.serialize()
    }

    /// 65-byte SEC1 uncompressed form.
    pub fn uncompressed(&self) -> [u8; 65] {
        self.point.serialize_uncompressed()
    }
}

impl From<PublicKey> for PublicKeyMaterial {
    fn from(point: PublicKey) -> Self {
        Self {
            hex: format!("0x{}", hex::encode(point.serialize())),
            point,
        }
    }
}

impl FromStr for PublicKeyMaterial {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl Serialize for PublicKeyMaterial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.hex)
    }
}

impl<'de> Deserialize<'de> for PublicKeyMaterial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as DeError;

        let hex_string: String = Deserialize::deserialize(deserializer)?;
        Self::from_hex(&hex_string).map_err(DeError::custom)
    }
}

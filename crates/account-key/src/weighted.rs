//! Weighted public keys, the members of a weighted multisig key.

use serde::Serialize;

use crate::{encoding::rlp::minimal_be_bytes, errors::KeyError, keys::PublicKeyMaterial};

/// A public key paired with the weight its signature contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedPublicKey {
    weight: u64,
    public_key: PublicKeyMaterial,
}

impl WeightedPublicKey {
    /// Validates `public_key` and pairs it with `weight`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKey`] if `public_key` is not a valid
    /// secp256k1 public key.
    pub fn new(weight: u64, public_key: &str) -> Result<Self, KeyError> {
        Ok(Self::from_material(weight, PublicKeyMaterial::from_hex(public_key)?))
    }

    /// Like [`Self::new`], with the weight given as a decimal or `0x` hex string.
    pub fn with_weight_str(weight: &str, public_key: &str) -> Result<Self, KeyError> {
        Self::new(parse_weight(weight)?, public_key)
    }

    /// Pairs already validated key material with `weight`.
    pub fn from_material(weight: u64, public_key: PublicKeyMaterial) -> Self {
        Self { weight, public_key }
    }

    /// Weight contributed by a signature from this key.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The key as supplied.
    pub fn public_key(&self) -> &PublicKeyMaterial {
        &self.public_key
    }

    /// Returns `(minimal big-endian weight, compressed key)`.
    ///
    /// A zero weight is the empty byte string. The key is always the 33-byte
    /// compressed point, whatever form it was supplied in.
    pub fn encode_to_bytes(&self) -> (Vec<u8>, [u8; 33]) {
        (minimal_be_bytes(self.weight), self.public_key.compressed())
    }
}

/// Parses a weight or threshold given as decimal or `0x`-prefixed hex.
pub fn parse_weight(value: &str) -> Result<u64, KeyError> {
    let invalid = || KeyError::InvalidWeight(value.to_owned());
    let trimmed = value.trim();

    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(digits, 16).map_err(|_| invalid()),
        None => trimmed.parse::<u64>().map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{compressed_key_hex, uncompressed_key_hex, G_COMPRESSED};

    #[test]
    fn test_encode_unit_weight_compressed_key() {
        let key = WeightedPublicKey::new(1, &compressed_key_hex(1)).unwrap();
        let (weight, compressed) = key.encode_to_bytes();

        assert_eq!(weight, vec![0x01]);
        assert_eq!(compressed.to_vec(), hex::decode(G_COMPRESSED).unwrap());
    }

    #[test]
    fn test_encode_zero_weight_is_empty() {
        let key = WeightedPublicKey::new(0, &uncompressed_key_hex(1)).unwrap();
        let (weight, compressed) = key.encode_to_bytes();

        assert!(weight.is_empty());
        assert_eq!(compressed.to_vec(), hex::decode(G_COMPRESSED).unwrap());
    }

    #[test]
    fn test_hex_and_decimal_weights_agree() {
        let hex_weight = WeightedPublicKey::with_weight_str("0x10", &compressed_key_hex(2)).unwrap();
        let dec_weight = WeightedPublicKey::with_weight_str("16", &compressed_key_hex(2)).unwrap();

        assert_eq!(hex_weight.weight(), 16);
        assert_eq!(hex_weight, dec_weight);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            WeightedPublicKey::new(1, "0x1234"),
            Err(KeyError::InvalidKey { .. })
        ));
        assert_eq!(
            parse_weight("ten"),
            Err(KeyError::InvalidWeight("ten".to_owned()))
        );
        assert!(parse_weight("0x").is_err());
        assert!(parse_weight("-1").is_err());
    }

    #[test]
    fn test_keeps_supplied_hex() {
        let bare = &uncompressed_key_hex(3)[2..];
        let key = WeightedPublicKey::new(2, bare).unwrap();
        assert_eq!(key.public_key().as_hex(), format!("0x{bare}"));
    }

    proptest! {
        #[test]
        fn proptest_encoding_shape(weight in any::<u64>(), seed in 1u8..=255, compressed in any::<bool>()) {
            let key_hex = if compressed { compressed_key_hex(seed) } else { uncompressed_key_hex(seed) };
            let key = WeightedPublicKey::new(weight, &key_hex).unwrap();
            let (weight_bytes, key_bytes) = key.encode_to_bytes();

            prop_assert_ne!(weight_bytes.first(), Some(&0u8));
            prop_assert!(key_bytes[0] == 0x02 || key_bytes[0] == 0x03);
            prop_assert_eq!(key_bytes.len(), 33);
        }
    }
}

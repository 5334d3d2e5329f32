//! Hex and key-format helpers shared by the key types.

use secp256k1::{PublicKey, SecretKey, SECP256K1};

use crate::errors::KeyError;

/// Hex length of a compressed SEC1 public key.
pub const COMPRESSED_HEX_LEN: usize = 66;

/// Hex length of an uncompressed SEC1 public key, `04` prefix included.
pub const UNCOMPRESSED_HEX_LEN: usize = 130;

/// Hex length of a bare `X || Y` public key.
pub const RAW_XY_HEX_LEN: usize = 128;

pub const PRIVATE_KEY_HEX_LEN: usize = 64;

const UNCOMPRESSED_TAG: &str = "04";

/// Returns `key` with a lowercase `0x` prefix, leaving the digits untouched.
pub fn add_hex_prefix(key: &str) -> String {
    format!("0x{}", strip_hex_prefix(key))
}

/// Returns `key` without its `0x`/`0X` prefix, if it has one.
pub fn strip_hex_prefix(key: &str) -> &str {
    key.strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key)
}

pub(crate) fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn invalid_key(key: &str, reason: impl Into<String>) -> KeyError {
    KeyError::InvalidKey {
        key: key.to_owned(),
        reason: reason.into(),
    }
}

/// Parses a hex public key in compressed, uncompressed or bare `X || Y` form.
///
/// The point must lie on secp256k1.
pub fn parse_public_key(key: &str) -> Result<PublicKey, KeyError> {
    let body = strip_hex_prefix(key);
    if !is_hex_digits(body) {
        return Err(invalid_key(key, "not a hex string"));
    }

    let bytes = match body.len() {
        COMPRESSED_HEX_LEN => hex::decode(body),
        UNCOMPRESSED_HEX_LEN if body.starts_with(UNCOMPRESSED_TAG) => hex::decode(body),
        UNCOMPRESSED_HEX_LEN => return Err(invalid_key(key, "uncompressed key must start with 04")),
        RAW_XY_HEX_LEN => hex::decode(format!("{UNCOMPRESSED_TAG}{body}")),
        len => return Err(invalid_key(key, format!("unexpected hex length {len}"))),
    }
    .map_err(|e| invalid_key(key, e.to_string()))?;

    PublicKey::from_slice(&bytes).map_err(|e| invalid_key(key, e.to_string()))
}

pub fn is_valid_public_key(key: &str) -> bool {
    parse_public_key(key).is_ok()
}

pub fn is_valid_private_key(key: &str) -> bool {
    parse_private_key(key).is_ok()
}

fn parse_private_key(key: &str) -> Result<SecretKey, KeyError> {
    let body = strip_hex_prefix(key);
    if body.len() != PRIVATE_KEY_HEX_LEN || !is_hex_digits(body) {
        return Err(invalid_key(key, "expected 32 hex-encoded bytes"));
    }
    let bytes = hex::decode(body).map_err(|e| invalid_key(key, e.to_string()))?;
    SecretKey::from_slice(&bytes).map_err(|e| invalid_key(key, e.to_string()))
}

/// Returns the 33-byte SEC1 compressed form of a public key.
pub fn compress_public_key(key: &str) -> Result<[u8; 33], KeyError> {
    Ok(parse_public_key(key)?.serialize())
}

/// Returns the 65-byte SEC1 uncompressed form of a public key.
pub fn decompress_public_key(key: &str) -> Result<[u8; 65], KeyError> {
    Ok(parse_public_key(key)?.serialize_uncompressed())
}

/// Derives a public key from a key that may be private.
///
/// A 32-byte private key yields its `0x04`-prefixed uncompressed public key.
/// A valid public key is returned as is, with a `0x` prefix. This is the
/// stock derive function for the signer-side `to_public_key` conversions.
pub fn derive_public_key(key: &str) -> Result<String, KeyError> {
    if strip_hex_prefix(key).len() == PRIVATE_KEY_HEX_LEN {
        let secret = parse_private_key(key)?;
        let public = PublicKey::from_secret_key(SECP256K1, &secret);
        return Ok(format!("0x{}", hex::encode(public.serialize_uncompressed())));
    }

    parse_public_key(key)?;
    Ok(add_hex_prefix(key))
}

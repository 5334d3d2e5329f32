//! Deterministic keys and signatures for tests.
//!
//! Seed `n` is the secret scalar `n`, so its public key is `n * G`.

use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

/// Compressed generator point `G`.
pub const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// Compressed `2 * G`.
pub const G2_COMPRESSED: &str =
    "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

/// Compressed `3 * G`.
pub const G3_COMPRESSED: &str =
    "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9";

pub fn secret_key(seed: u8) -> SecretKey {
    let mut sk_bytes = [0u8; 32];
    sk_bytes[31] = seed.max(1);
    SecretKey::from_slice(&sk_bytes).expect("non-zero scalar below the curve order")
}

pub fn public_key(seed: u8) -> PublicKey {
    PublicKey::from_secret_key(SECP256K1, &secret_key(seed))
}

pub fn private_key_hex(seed: u8) -> String {
    format!("0x{}", hex::encode(secret_key(seed).secret_bytes()))
}

pub fn compressed_key_hex(seed: u8) -> String {
    format!("0x{}", hex::encode(public_key(seed).serialize()))
}

pub fn uncompressed_key_hex(seed: u8) -> String {
    format!("0x{}", hex::encode(public_key(seed).serialize_uncompressed()))
}

/// Uncompressed key without the `04` tag.
pub fn raw_xy_key_hex(seed: u8) -> String {
    format!(
        "0x{}",
        hex::encode(&public_key(seed).serialize_uncompressed()[1..])
    )
}

/// Signs `message_hash`, returning `r || s || v` with `v` = 27 + recovery id.
pub fn sign_message(message_hash: &[u8; 32], secret_key: &SecretKey) -> [u8; 65] {
    let message = Message::from_digest(*message_hash);
    let sig = SECP256K1.sign_ecdsa_recoverable(&message, secret_key);
    let (recovery_id, compact) = sig.serialize_compact();

    let mut result = [0u8; 65];
    result[..64].copy_from_slice(&compact);
    result[64] = 27 + recovery_id.to_i32() as u8;
    result
}

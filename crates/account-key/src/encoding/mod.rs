//! Canonical account key encoding.
//!
//! The layout is `type tag || rlp(payload)`:
//!
//! | key              | bytes                                                  |
//! |------------------|--------------------------------------------------------|
//! | nil              | `0x80`                                                 |
//! | legacy           | `0x01 0xc0`                                            |
//! | public           | `0x02 rlp(key33)`                                      |
//! | fail             | `0x03 0xc0`                                            |
//! | weighted multisig| `0x04 rlp([threshold, [[weight, key33], ...]])`         |
//! | role-based       | `0x05 rlp([bytes(enc(role0)), bytes(enc(role1)), ..])` |
//!
//! Integers are minimal big-endian byte strings and keys are always
//! compressed, so a policy has exactly one encoding. The bytes end up in
//! transaction payloads that get hashed and signed.

use alloy_rlp::{EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use tracing::{debug, trace};

use crate::{
    account_key::{AccountKey, AccountKeyType, RoleBased, WeightedMultiSig},
    errors::EncodingError,
    keys::{strip_hex_prefix, PublicKeyMaterial},
    weighted::WeightedPublicKey,
};

pub mod rlp;

use self::rlp::{
    decode_minimal_be, ensure_consumed, minimal_be_bytes, take_item, write_bytes, write_list,
};

/// Encodes `key` into its canonical bytes.
pub fn encode(key: &AccountKey) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(key, &mut out);
    trace!(key_type = %key.key_type(), len = out.len(), "encoded account key");
    out
}

fn encode_into(key: &AccountKey, out: &mut Vec<u8>) {
    match key {
        AccountKey::Nil => out.push(EMPTY_STRING_CODE),
        AccountKey::Legacy | AccountKey::Fail => {
            out.push(key.key_type().tag());
            out.push(EMPTY_LIST_CODE);
        }
        AccountKey::Public(public_key) => {
            out.push(AccountKeyType::Public.tag());
            write_bytes(&public_key.compressed(), out);
        }
        AccountKey::WeightedMultiSig(multisig) => {
            out.push(AccountKeyType::WeightedMultiSig.tag());
            encode_multisig_payload(multisig, out);
        }
        AccountKey::RoleBased(role_based) => {
            out.push(AccountKeyType::RoleBased.tag());
            let mut payload = Vec::new();
            for role_key in role_based.keys() {
                write_bytes(&encode(role_key), &mut payload);
            }
            write_list(&payload, out);
        }
    }
}

fn encode_multisig_payload(multisig: &WeightedMultiSig, out: &mut Vec<u8>) {
    let mut keys_payload = Vec::new();
    for weighted in multisig.keys() {
        let (weight, key) = weighted.encode_to_bytes();
        let mut entry = Vec::new();
        write_bytes(&weight, &mut entry);
        write_bytes(&key, &mut entry);
        write_list(&entry, &mut keys_payload);
    }

    let mut payload = Vec::new();
    write_bytes(&minimal_be_bytes(multisig.threshold()), &mut payload);
    write_list(&keys_payload, &mut payload);
    write_list(&payload, out);
}

/// Decodes canonical bytes back into an account key.
///
/// Anything [`encode`] would not produce is rejected, including trailing
/// bytes, padded integers and keys that break the constructor invariants.
pub fn decode(bytes: &[u8]) -> Result<AccountKey, EncodingError> {
    let key = decode_key(bytes)?;
    debug!(key_type = %key.key_type(), "decoded account key");
    Ok(key)
}

fn decode_key(bytes: &[u8]) -> Result<AccountKey, EncodingError> {
    let (&tag, mut rest) = bytes.split_first().ok_or(EncodingError::Empty)?;
    if tag == EMPTY_STRING_CODE {
        ensure_consumed(rest)?;
        return Ok(AccountKey::Nil);
    }

    let key = match AccountKeyType::from_tag(tag) {
        Some(AccountKeyType::Legacy) => {
            ensure_consumed(take_item(&mut rest, true)?)?;
            AccountKey::Legacy
        }
        Some(AccountKeyType::Fail) => {
            ensure_consumed(take_item(&mut rest, true)?)?;
            AccountKey::Fail
        }
        Some(AccountKeyType::Public) => {
            AccountKey::Public(decode_public_key(take_item(&mut rest, false)?)?)
        }
        Some(AccountKeyType::WeightedMultiSig) => {
            AccountKey::WeightedMultiSig(decode_multisig_payload(take_item(&mut rest, true)?)?)
        }
        Some(AccountKeyType::RoleBased) => {
            let mut payload = take_item(&mut rest, true)?;
            let mut keys = Vec::new();
            while !payload.is_empty() {
                keys.push(decode_key(take_item(&mut payload, false)?)?);
            }
            AccountKey::RoleBased(RoleBased::try_new(keys)?)
        }
        // Nil has no tag on the wire.
        Some(AccountKeyType::Nil) | None => return Err(EncodingError::UnknownTag(tag)),
    };

    ensure_consumed(rest)?;
    Ok(key)
}

fn decode_multisig_payload(mut payload: &[u8]) -> Result<WeightedMultiSig, EncodingError> {
    let threshold = decode_minimal_be(take_item(&mut payload, false)?)?;
    let mut entries = take_item(&mut payload, true)?;
    ensure_consumed(payload)?;

    let mut keys = Vec::new();
    while !entries.is_empty() {
        let mut entry = take_item(&mut entries, true)?;
        let weight = decode_minimal_be(take_item(&mut entry, false)?)?;
        let public_key = decode_public_key(take_item(&mut entry, false)?)?;
        ensure_consumed(entry)?;
        keys.push(WeightedPublicKey::from_material(weight, public_key));
    }

    Ok(WeightedMultiSig::try_new(threshold, keys)?)
}

fn decode_public_key(bytes: &[u8]) -> Result<PublicKeyMaterial, EncodingError> {
    if bytes.len() != 33 {
        return Err(EncodingError::InvalidKeyLength(bytes.len()));
    }
    Ok(PublicKeyMaterial::from_slice(bytes)?)
}

/// Formats bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses hex with or without a `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(hex::decode(strip_hex_prefix(s))?)
}

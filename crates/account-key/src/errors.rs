//! Error types for account key construction, encoding and verification.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{account_key::AccountKeyType, roles::Role};

/// Errors raised while building or updating keys.
///
/// Validation is eager: a constructor either returns a fully valid value or
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Key material is not a valid secp256k1 key.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Input does not have the shape the constructor expects.
    #[error("invalid key input: {0}")]
    InvalidShape(String),

    /// A multisig key list was empty.
    #[error("key list cannot be empty")]
    EmptyKeyList,

    /// A multisig key list exceeded the key limit.
    #[error("too many keys: {count} exceeds the maximum of {max}")]
    TooManyKeys { count: usize, max: usize },

    /// The same key appears twice in a multisig key list.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("threshold must be greater than zero")]
    ZeroThreshold,

    /// A weight or threshold string is neither decimal nor `0x` hex.
    #[error("invalid weight {0:?}")]
    InvalidWeight(String),

    /// A required field was never provided.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("too many role keys: {count} exceeds the maximum of {max}")]
    TooManyRoles { count: usize, max: usize },

    /// The key type is not allowed inside a role-based key.
    #[error("{0} key cannot be used as a role key")]
    UnsupportedRoleKey(AccountKeyType),

    /// Neither the role's own slot nor the transaction slot is set.
    #[error("no key found for role {0}")]
    RoleKeyNotFound(Role),

    /// `update` was called with a key of a different shape.
    #[error("cannot update a {expected} key from a {found} key")]
    ShapeMismatch {
        expected: AccountKeyType,
        found: AccountKeyType,
    },
}

/// Errors raised while decoding the canonical account key encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("empty input")]
    Empty,

    #[error("unknown account key type tag {0:#04x}")]
    UnknownTag(u8),

    #[error("malformed rlp: {0}")]
    Rlp(String),

    #[error("expected an rlp {expected}")]
    UnexpectedItem { expected: &'static str },

    #[error("{0} unexpected trailing byte(s)")]
    TrailingBytes(usize),

    /// Integers must use the shortest big-endian form.
    #[error("non-canonical integer encoding")]
    NonCanonicalInteger,

    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,

    #[error("expected a 33-byte compressed public key, found {0} bytes")]
    InvalidKeyLength(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded structure violates a key invariant.
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl From<alloy_rlp::Error> for EncodingError {
    fn from(e: alloy_rlp::Error) -> Self {
        Self::Rlp(e.to_string())
    }
}

impl From<hex::FromHexError> for EncodingError {
    fn from(e: hex::FromHexError) -> Self {
        Self::InvalidHex(e.to_string())
    }
}

/// Errors raised while checking signatures against an account key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("duplicate signer index: {0}")]
    DuplicateSignerIndex(u8),

    #[error("signer index {index} out of bounds (max: {max})")]
    SignerIndexOutOfBounds { index: u8, max: usize },

    #[error("invalid signature format at index {index}")]
    InvalidSignatureFormat { index: u8 },

    /// Valid signers do not carry enough weight.
    #[error("insufficient weight: provided {provided}, required {required}")]
    InsufficientWeight { provided: u128, required: u64 },

    /// The key can never authorize a signature.
    #[error("{0} account key cannot authorize signatures")]
    Unsatisfiable(AccountKeyType),

    /// Legacy keys are checked against the account address, which lives
    /// outside this crate.
    #[error("{0} account key cannot be verified here")]
    UnsupportedKeyType(AccountKeyType),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Errors raised while loading declarative key descriptions.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse key file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Key(#[from] KeyError),
}

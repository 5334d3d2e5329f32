//! Klaytn account keys.
//!
//! An [`AccountKey`] is the validation policy attached to an account: no
//! policy, address-derived, always failing, a single public key, a weighted
//! multisig, or one policy per [`Role`]. Keys are validated on construction
//! and have one canonical byte encoding (see [`encoding`]).

pub mod account_key;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod keys;
pub mod roles;
pub mod signature;
pub mod signer_keys;
pub mod verification;
pub mod weighted;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use account_key::{AccountKey, AccountKeyType, RoleBased, WeightedMultiSig};
pub use config::{AccountKeyConfig, KeyFile};
pub use errors::{ConfigError, EncodingError, KeyError, SignatureError};
pub use keys::PublicKeyMaterial;
pub use roles::Role;
pub use signature::{IndexedSignature, SignatureSet};
pub use signer_keys::{AccountKeyMultiSig, AccountKeyPublic, SignerKey};
pub use weighted::WeightedPublicKey;

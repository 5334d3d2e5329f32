//! Key material handling.
//!
//! - [`utils`] - hex normalization, validity checks and (de)compression
//! - [`material`] - validated secp256k1 public key material

pub mod material;
pub mod utils;

pub use material::PublicKeyMaterial;
pub use utils::{
    add_hex_prefix, compress_public_key, decompress_public_key, derive_public_key,
    is_valid_private_key, is_valid_public_key, strip_hex_prefix,
};

//! Command line arguments for the `caver-keytool` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Encode(SubcEncode),
    Decode(SubcDecode),
    DerivePubkey(SubcDerivePubkey),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "encode",
    description = "encodes the account key described by a TOML key file"
)]
pub(crate) struct SubcEncode {
    #[argh(positional, description = "key file path")]
    pub(crate) path: PathBuf,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "decode",
    description = "decodes a hex-encoded account key and prints it as JSON"
)]
pub(crate) struct SubcDecode {
    #[argh(positional, description = "encoded account key hex")]
    pub(crate) encoded: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "derive-pubkey",
    description = "derives the public key of a secp256k1 private key"
)]
pub(crate) struct SubcDerivePubkey {
    #[argh(positional, description = "private key hex")]
    pub(crate) private_key: String,
}

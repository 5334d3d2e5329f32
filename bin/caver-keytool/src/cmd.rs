use anyhow::{bail, Context};
use caver_account_key::{
    encoding::encode_hex,
    keys::{derive_public_key, is_valid_private_key},
    AccountKey, KeyFile, PublicKeyMaterial,
};
use serde_json::json;
use tracing::info;

use crate::args::{SubcDecode, SubcDerivePubkey, SubcEncode, Subcommand};

pub(crate) fn exec_subc(subc: Subcommand) -> anyhow::Result<()> {
    match subc {
        Subcommand::Encode(subc) => exec_encode(subc),
        Subcommand::Decode(subc) => exec_decode(subc),
        Subcommand::DerivePubkey(subc) => exec_derive_pubkey(subc),
    }
}

fn exec_encode(cmd: SubcEncode) -> anyhow::Result<()> {
    let key_file = KeyFile::load(&cmd.path)?;
    let key = key_file
        .to_account_key()
        .with_context(|| format!("invalid account key in {}", cmd.path.display()))?;

    info!(key_type = %key.key_type(), "encoded account key");
    println!("{}", key.encode_hex());
    Ok(())
}

fn exec_decode(cmd: SubcDecode) -> anyhow::Result<()> {
    let key = AccountKey::decode_hex(&cmd.encoded).context("failed to decode account key")?;

    info!(key_type = %key.key_type(), "decoded account key");
    println!("{}", serde_json::to_string_pretty(&key)?);
    Ok(())
}

fn exec_derive_pubkey(cmd: SubcDerivePubkey) -> anyhow::Result<()> {
    if !is_valid_private_key(&cmd.private_key) {
        bail!("not a valid secp256k1 private key");
    }

    let public_key = PublicKeyMaterial::from_hex(&derive_public_key(&cmd.private_key)?)?;
    let output = json!({
        "uncompressed": encode_hex(&public_key.uncompressed()),
        "compressed": encode_hex(&public_key.compressed()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

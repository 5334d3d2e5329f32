//! Command line tool for working with Klaytn account keys.
//!
//! Set `RUST_LOG` to control log output, e.g. `RUST_LOG=caver_account_key=debug`.

mod args;
mod cmd;

use std::{io, process};

use cmd::exec_subc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        exec_subc(args.subc)?;
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}

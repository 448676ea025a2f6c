//! The `decode` subcommand

use anyhow::{Context, Result};
use clap::Args;
use splice::Pattern;
use std::path::PathBuf;

/// Arguments for the `decode` subcommand
#[derive(Args)]
#[clap(author, version, about = "Print a .splice file as backup text", long_about = None)]
pub struct DecodeArgs {
    /// The path to the .splice file to decode
    path: PathBuf,
}

/// Print a .splice file as backup text
pub fn decode(args: &DecodeArgs) -> Result<()> {
    let pattern = Pattern::from_path(&args.path)
        .context(format!("Could not decode {}", args.path.to_string_lossy()))?;

    print!("{}", pattern.backup());

    Ok(())
}

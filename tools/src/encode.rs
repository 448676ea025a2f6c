//! The `encode` subcommand

use crate::utils::check_for_overwrite;
use anyhow::{Context, Result};
use clap::Args;
use splice::Pattern;
use std::{
    fs,
    io::{stdout, Write},
    path::PathBuf,
};

/// Arguments for the `encode` subcommand
#[derive(Args)]
#[clap(author, version, about = "Encode backup text into a .splice file", long_about = None)]
pub struct EncodeArgs {
    /// The path to the backup text to encode
    path: PathBuf,

    /// Where to write the .splice file. Writes to stdout if omitted
    #[clap(short, long)]
    output: Option<PathBuf>,
}

/// Encode backup text into a .splice file
pub fn encode(args: &EncodeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.path)
        .context(format!("Could not read {}", args.path.to_string_lossy()))?;

    let pattern = Pattern::from_backup(&text)
        .context(format!("Could not parse {}", args.path.to_string_lossy()))?;

    match &args.output {
        Some(output) => {
            if check_for_overwrite(output)? {
                pattern.to_path(output).context(format!(
                    "Could not write pattern to {}",
                    output.to_string_lossy()
                ))?;

                println!("Wrote {}", output.to_string_lossy());
            }
        }
        None => {
            let bytes = pattern.to_bytes().context("Could not encode pattern")?;
            stdout()
                .write_all(&bytes)
                .context("Could not write pattern to stdout")?;
        }
    }

    Ok(())
}

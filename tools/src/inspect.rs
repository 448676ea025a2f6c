//! The `inspect` subcommand

use crate::utils::iter_files;
use anyhow::{Context, Result};
use clap::Args;
use std::{collections::BTreeMap, fs, path::PathBuf};

/// Arguments for the `inspect` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Show how every byte offset varies across a set of .splice files",
    long_about = "Inspect reads every .splice file it can find and lists, per byte offset, which values occur and how often.\n\nOffsets marked as uniform hold the same value in every file, which makes them good candidates for fixed fields. This is a tool for reverse engineering the format, not for everyday use."
)]
pub struct InspectArgs {
    /// Files or folders containing .splice files
    paths: Vec<PathBuf>,

    /// Search folders recursively
    #[clap(short, long)]
    recursive: bool,
}

/// How the byte at a single offset varies across files
#[derive(Debug, PartialEq, Eq)]
pub struct ByteStats {
    pub offset: usize,

    /// Is this offset present in every file, with the same value?
    pub uniform: bool,

    /// Every value found at this offset, and how many files have it
    pub frequencies: BTreeMap<u8, usize>,
}

/// Show how every byte offset varies across a set of .splice files
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let mut files = Vec::new();
    for entry in iter_files(&args.paths, args.recursive, &["splice"]) {
        let bytes = fs::read(entry.path())
            .context(format!("Could not read {}", entry.path().to_string_lossy()))?;
        files.push(bytes);
    }

    if files.is_empty() {
        println!("No .splice files found");
        return Ok(());
    }

    println!("Inspected {} files", files.len());
    for stats in analyze(&files) {
        let frequencies: Vec<_> = stats
            .frequencies
            .iter()
            .map(|(value, count)| format!("{}/{value}:{count}", printable(*value)))
            .collect();

        println!(
            "{:>5} | {:<5} | {}",
            stats.offset,
            stats.uniform,
            frequencies.join("  ")
        );
    }

    Ok(())
}

/// Tally the values found at every offset, up to the length of the longest file
pub fn analyze<B>(files: &[B]) -> Vec<ByteStats>
where
    B: AsRef<[u8]>,
{
    let longest = files
        .iter()
        .map(|file| file.as_ref().len())
        .max()
        .unwrap_or(0);

    (0..longest)
        .map(|offset| {
            let mut frequencies = BTreeMap::new();
            for byte in files.iter().filter_map(|file| file.as_ref().get(offset)) {
                *frequencies.entry(*byte).or_insert(0) += 1;
            }

            let in_every_file = files.iter().all(|file| file.as_ref().len() > offset);

            ByteStats {
                offset,
                uniform: in_every_file && frequencies.len() == 1,
                frequencies,
            }
        })
        .collect()
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() {
        byte as char
    } else {
        '.'
    }
}

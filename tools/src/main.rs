use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use splice_tools::decode::{decode, DecodeArgs};
use splice_tools::encode::{encode, EncodeArgs};
use splice_tools::inspect::{inspect, InspectArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
enum Cli {
    Decode(DecodeArgs),
    Encode(EncodeArgs),
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse_from(wild::args()) {
        Cli::Decode(args) => decode(&args),
        Cli::Encode(args) => encode(&args),
        Cli::Inspect(args) => inspect(&args),
    }
}

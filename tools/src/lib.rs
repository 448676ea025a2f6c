//! # Splice Tools
//!
//! Command-line utilities for working with the `.splice` drum pattern files saved by
//! Splice drum machines, and their textual backups.
//!
//! ## Decode
//!
//! ```console
//! splice-tools-decode
//! Print a .splice file as backup text
//!
//! USAGE:
//!     splice-tools decode <PATH>
//!
//! ARGS:
//!     <PATH>    The path to the .splice file to decode
//! ```
//!
//! ### Example
//!
//! ```console
//! > splice-tools decode pattern_1.splice
//! Saved with HW Version: 0.808-alpha
//! Tempo: 120
//! (0) kick	|x---|x---|x---|x---|
//! (1) snare	|----|x---|----|x---|
//! (2) clap	|----|x-x-|----|----|
//! (3) hh-open	|--x-|--x-|x-x-|--x-|
//! (4) hh-close	|x---|x---|----|x--x|
//! (5) cowbell	|----|----|--x-|----|
//! ```
//!
//! ## Encode
//!
//! ```console
//! splice-tools-encode
//! Encode backup text into a .splice file
//!
//! USAGE:
//!     splice-tools encode [OPTIONS] <PATH>
//!
//! ARGS:
//!     <PATH>    The path to the backup text to encode
//!
//! OPTIONS:
//!     -o, --output <OUTPUT>    Where to write the .splice file. Writes to stdout if omitted
//! ```
//!
//! ## Inspect
//!
//! ```console
//! splice-tools-inspect
//! Show how every byte offset varies across a set of .splice files
//!
//! USAGE:
//!     splice-tools inspect [OPTIONS] [PATH]...
//!
//! ARGS:
//!     <PATH>...    Files or folders containing .splice files
//!
//! OPTIONS:
//!     -r, --recursive    Search folders recursively
//! ```
//!
//! Logging goes to stderr, and can be tuned with the `RUST_LOG` environment variable.

pub mod decode;
pub mod encode;
pub mod inspect;
pub(crate) mod utils;

//! Reading and writing drum patterns saved by Splice drum machines
//!
//! A [`Pattern`] can be stored in two ways: the binary `.splice` files the hardware
//! writes (see the [`binary`] module), and a line-based textual backup (see the
//! [`backup`] module). Both describe exactly the same data.
//!
//! ```no_run
//! let pattern = splice::decode_file("pattern_1.splice")?;
//! assert_eq!(splice::parse_backup_text(&pattern.backup())?, pattern);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The binary format has been reverse engineered from a handful of sample files. Only
//! patterns saved by `0.808-alpha` hardware round-trip completely, see [`HardwareVersion`].

pub mod backup;
pub mod binary;
pub mod name;
pub mod pattern;
pub mod variant;

pub use name::TrackName;
pub use pattern::{Pattern, Track};
pub use variant::HardwareVersion;

use std::path::Path;

/// Decode a `.splice` file on disk
pub fn decode_file<P>(path: P) -> Result<Pattern, binary::FromPathError>
where
    P: AsRef<Path>,
{
    Pattern::from_path(path)
}

/// Decode an in-memory `.splice` file
pub fn decode_bytes(bytes: &[u8]) -> Result<Pattern, binary::DecodeError> {
    Pattern::from_bytes(bytes)
}

/// Encode a pattern to `.splice` bytes
pub fn encode_to_bytes(pattern: &Pattern) -> Result<Vec<u8>, binary::EncodeError> {
    pattern.to_bytes()
}

/// Parse a pattern from its backup text
pub fn parse_backup_text(text: &str) -> Result<Pattern, backup::ParseError> {
    Pattern::from_backup(text)
}

/// Render a pattern as backup text
pub fn format_backup_text(pattern: &Pattern) -> String {
    pattern.backup()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backup_to_file_and_back() {
        let text = include_str!("../test/pattern_1.txt");
        let pattern = parse_backup_text(text).unwrap();

        let bytes = encode_to_bytes(&pattern).unwrap();
        let decoded = decode_bytes(&bytes).unwrap();

        assert_eq!(decoded, pattern);
        assert_eq!(format_backup_text(&decoded), text);
    }

    #[test]
    fn file_to_backup() {
        let pattern = decode_bytes(include_bytes!("../test/pattern_2.splice")).unwrap();
        assert_eq!(
            format_backup_text(&pattern),
            include_str!("../test/pattern_2.txt")
        );
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            decode_file("test/does_not_exist.splice"),
            Err(binary::FromPathError::FileOpen(_))
        ));
    }
}

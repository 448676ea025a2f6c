//! The fixed-size record at the start of every `.splice` file

use crate::variant::{HardwareVersion, RawTempo};
use std::io::{self, Read, Write};
use thiserror::Error;

/// The header of a `.splice` file
///
/// ```text
/// 0..6    chunk id ("SPLICE")
/// 6..14   padding, reserved
/// 14..45  hardware version, NUL padded
/// 45..47  reserved
/// 47      tempo decimal
/// 48      tempo
/// 49      reserved
/// ```
///
/// The reserved bytes vary between files in ways that haven't been figured out. They're
/// ignored on read and written as zeroes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Header {
    chunk_id: [u8; 6],
    version: [u8; Self::VERSION_LEN],
    pub raw_tempo: RawTempo,
}

impl Header {
    /// The number of bytes taken up by the header
    pub const LEN: usize = 50;

    /// The chunk id every file starts with
    pub const CHUNK_ID: [u8; 6] = *b"SPLICE";

    /// The capacity of the hardware version field
    pub const VERSION_LEN: usize = 31;

    const VERSION_OFFSET: usize = 14;
    const TEMPO_DECIMAL_OFFSET: usize = 47;
    const TEMPO_OFFSET: usize = 48;

    /// Construct a header for a given version and tempo
    pub fn new(version: &str, raw_tempo: RawTempo) -> Result<Self, VersionError> {
        let bytes = version.as_bytes();
        if bytes.len() > Self::VERSION_LEN {
            return Err(VersionError::TooLong { len: bytes.len() });
        }

        if HardwareVersion::contains_line_break(version) {
            return Err(VersionError::LineBreak);
        }

        let mut dest = [0; Self::VERSION_LEN];
        dest[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            chunk_id: Self::CHUNK_ID,
            version: dest,
            raw_tempo,
        })
    }

    /// Deserialize a [`Header`] from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> io::Result<Self>
    where
        R: Read,
    {
        let mut bytes = [0; Self::LEN];
        reader.read_exact(bytes.as_mut_slice())?;

        let mut chunk_id = [0; 6];
        chunk_id.copy_from_slice(&bytes[..6]);

        let mut version = [0; Self::VERSION_LEN];
        version.copy_from_slice(
            &bytes[Self::VERSION_OFFSET..Self::VERSION_OFFSET + Self::VERSION_LEN],
        );

        Ok(Self {
            chunk_id,
            version,
            raw_tempo: RawTempo {
                tempo: bytes[Self::TEMPO_OFFSET],
                decimal: bytes[Self::TEMPO_DECIMAL_OFFSET],
            },
        })
    }

    /// Serialize the [`Header`] to an arbitrary I/O writer
    pub fn to_writer<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: Write,
    {
        let mut bytes = [0; Self::LEN];
        bytes[..6].copy_from_slice(&self.chunk_id);
        bytes[Self::VERSION_OFFSET..Self::VERSION_OFFSET + Self::VERSION_LEN]
            .copy_from_slice(&self.version);
        bytes[Self::TEMPO_DECIMAL_OFFSET] = self.raw_tempo.decimal;
        bytes[Self::TEMPO_OFFSET] = self.raw_tempo.tempo;

        writer.write_all(&bytes)
    }

    /// Does the header start with the expected chunk id?
    pub fn has_chunk_id(&self) -> bool {
        self.chunk_id == Self::CHUNK_ID
    }

    /// The hardware version string, up to the NUL padding
    ///
    /// Fails if the version holds a line break, which would corrupt backups.
    pub fn version(&self) -> Result<String, VersionError> {
        let len = self
            .version
            .iter()
            .position(|c| *c == 0)
            .unwrap_or(Self::VERSION_LEN);

        let version = String::from_utf8_lossy(&self.version[..len]).into_owned();
        if HardwareVersion::contains_line_break(&version) {
            return Err(VersionError::LineBreak);
        }

        Ok(version)
    }
}

/// Errors describing why a hardware version can't be stored in a header
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The version string doesn't fit in the header
    #[error("The hardware version is {len} bytes long, while the header fits at most 31")]
    TooLong { len: usize },

    /// Backups store the version on a single line
    #[error("The hardware version contains a line break")]
    LineBreak,
}

//! The binary `.splice` format
//!
//! A file is a fixed-size header followed by track records until the end of the file.
//! See [`Pattern::from_reader()`] and [`Pattern::to_writer()`].

mod header;
pub mod track;
mod utils;

pub use header::VersionError;

use crate::{
    pattern::Pattern,
    variant::{EncodeTempoError, HardwareVersion, ResolveTempoError},
};
use header::Header;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Cursor, Read, Write},
    path::Path,
};
use thiserror::Error;
use track::{Record, TrackReadError, read_track, write_track};

impl Pattern {
    /// Deserialize a [`Pattern`] from an arbitrary I/O reader
    ///
    /// Tracks are read until the reader is exhausted. A track record that is cut off
    /// halfway is dropped, and the tracks before it are returned as if the file ended
    /// cleanly.
    pub fn from_reader<R>(mut reader: R) -> Result<Self, DecodeError>
    where
        R: Read,
    {
        let header = Header::from_reader(&mut reader).map_err(DecodeError::Header)?;
        if !header.has_chunk_id() {
            tracing::warn!("file does not start with the SPLICE chunk id");
        }

        let hardware_version = header.version()?;
        let tempo = HardwareVersion::from(hardware_version.as_str())
            .resolve_tempo(header.raw_tempo)?;

        let mut pattern = Pattern::new(hardware_version, tempo.bpm, tempo.decimal);

        loop {
            match read_track(&mut reader) {
                Ok(Record::Track(track)) => {
                    tracing::debug!(
                        id = track.id,
                        name = %track.name,
                        unknown_steps = track.has_unknown_steps(),
                        "decoded track"
                    );
                    pattern.tracks.push(track);
                }
                Ok(Record::EndOfFile) => break,
                Ok(Record::Truncated) => {
                    tracing::warn!(
                        tracks = pattern.tracks.len(),
                        "file ends in the middle of a track record, dropping it"
                    );
                    break;
                }
                Err(source) => {
                    return Err(DecodeError::Track {
                        partial: pattern,
                        source,
                    });
                }
            }
        }

        Ok(pattern)
    }

    /// Deserialize a [`Pattern`] from an in-memory `.splice` file
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Deserialize a [`Pattern`] from a path on disk (.splice)
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }

    /// Serialize the [`Pattern`] to an arbitrary I/O writer
    ///
    /// Only `0.808-alpha` patterns can be encoded, because that's the only hardware version
    /// for which the tempo encoding is known.
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), EncodeError>
    where
        W: Write,
    {
        let raw_tempo = self.variant().encode_tempo(self.full_tempo())?;
        let header = Header::new(&self.hardware_version, raw_tempo)?;

        header.to_writer(&mut writer)?;
        for track in &self.tracks {
            write_track(track, &mut writer)?;
        }

        Ok(())
    }

    /// Serialize the [`Pattern`] to an in-memory `.splice` file
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();
        self.to_writer(&mut bytes)?;
        Ok(bytes)
    }

    /// Serialize the [`Pattern`] to a path on disk (.splice)
    pub fn to_path<P>(&self, path: P) -> Result<(), EncodeError>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl TryFrom<&[u8]> for Pattern {
    type Error = DecodeError;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

/// Errors that might be returned from [`Pattern::from_reader()`]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The header couldn't be read in its entirety
    #[error("Reading the header failed")]
    Header(#[source] io::Error),

    /// The hardware version can't be represented in a backup
    #[error("Reading the hardware version failed")]
    Version(#[from] VersionError),

    /// The tempo couldn't be derived from the header
    #[error("Resolving the tempo failed")]
    Tempo(#[from] ResolveTempoError),

    /// Reading a track failed
    ///
    /// The tracks read up until the failure are available in `partial`
    #[error("Reading track {} failed", .partial.tracks.len())]
    Track {
        partial: Pattern,
        source: TrackReadError,
    },
}

impl DecodeError {
    /// The part of the pattern that was decoded before things went wrong
    pub fn partial(&self) -> Option<&Pattern> {
        match self {
            Self::Track { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

/// Errors that might be returned from [`Pattern::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Could not open the file for reading
    #[error("Could not open the file for reading")]
    FileOpen(#[from] io::Error),

    /// Deserialization from the file failed
    #[error("Reading the pattern from file failed")]
    Decode(#[from] DecodeError),
}

/// Errors that might be returned from [`Pattern::to_writer()`]
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The hardware version doesn't have a known tempo encoding, or the tempo doesn't fit
    #[error("Encoding the tempo failed")]
    Tempo(#[from] EncodeTempoError),

    /// The hardware version can't be stored in the header
    #[error("Encoding the header failed")]
    Version(#[from] VersionError),

    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        name::{NameError, TrackName},
        pattern::Track,
        variant::Tempo,
    };
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const PATTERN_1: &[u8] = include_bytes!("../../test/pattern_1.splice");
    const PATTERN_2: &[u8] = include_bytes!("../../test/pattern_2.splice");

    // Header bytes that differ between files for reasons not yet understood
    const OPAQUE_OFFSETS: [usize; 4] = [13, 45, 46, 49];

    fn assert_same_file(actual: &[u8], expected: &[u8]) {
        assert_eq!(actual.len(), expected.len());
        for (index, (actual, expected)) in actual.iter().zip(expected).enumerate() {
            if !OPAQUE_OFFSETS.contains(&index) {
                assert_eq!(actual, expected, "byte {index} differs");
            }
        }
    }

    fn track(id: u8, name: &str, sequence: [u8; Track::STEPS]) -> Track {
        Track {
            id,
            name: TrackName::from_str(name).unwrap(),
            sequence,
        }
    }

    #[test]
    fn pattern_1() {
        let pattern = Pattern::from_bytes(PATTERN_1).unwrap();

        assert_eq!(pattern.hardware_version, "0.808-alpha");
        assert_eq!(pattern.tempo, 120);
        assert_eq!(pattern.tempo_decimal, 0);

        let names: Vec<_> = pattern.tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["kick", "snare", "clap", "hh-open", "hh-close", "cowbell"]
        );

        assert_eq!(
            pattern.tracks[0],
            track(0, "kick", [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0])
        );
        assert_eq!(
            pattern.tracks[4],
            track(4, "hh-close", [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1])
        );

        assert_same_file(&pattern.to_bytes().unwrap(), PATTERN_1);
    }

    #[test]
    fn pattern_2() {
        let pattern = Pattern::from_bytes(PATTERN_2).unwrap();

        // The decimal offset is our best current understanding of the format
        assert_eq!(pattern.tempo, 98);
        assert_eq!(pattern.tempo_decimal, 4);

        let ids: Vec<_> = pattern.tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, [0, 1, 3, 5]);

        assert_same_file(&pattern.to_bytes().unwrap(), PATTERN_2);
    }

    #[test]
    fn round_trip() {
        let mut pattern = Pattern::new("0.808-alpha", 91, 3);
        pattern
            .tracks
            .push(track(40, "low conga", [1, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1]));
        pattern.tracks.push(track(7, "", [0; Track::STEPS]));
        pattern
            .tracks
            .push(track(255, "anomaly", [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255]));

        let bytes = pattern.to_bytes().unwrap();
        assert_eq!(Pattern::from_bytes(&bytes).unwrap(), pattern);
    }

    #[test]
    fn truncated_track() {
        let expected = Pattern::from_bytes(PATTERN_1).unwrap();

        // The cowbell record is the last 28 bytes: cut it off in the middle of its sequence
        let pattern = Pattern::from_bytes(&PATTERN_1[..PATTERN_1.len() - 5]).unwrap();
        assert_eq!(pattern.tracks.as_slice(), &expected.tracks[..5]);

        // Cut off right after its id
        let pattern = Pattern::from_bytes(&PATTERN_1[..PATTERN_1.len() - 27]).unwrap();
        assert_eq!(pattern.tracks.as_slice(), &expected.tracks[..5]);

        // Cut off exactly at the record boundary
        let pattern = Pattern::from_bytes(&PATTERN_1[..PATTERN_1.len() - 28]).unwrap();
        assert_eq!(pattern.tracks.as_slice(), &expected.tracks[..5]);
    }

    #[test]
    fn header_only() {
        let pattern = Pattern::from_bytes(&PATTERN_1[..Header::LEN]).unwrap();
        assert_eq!(pattern.tempo, 120);
        assert!(pattern.tracks.is_empty());
    }

    #[test]
    fn truncated_header() {
        assert!(matches!(
            Pattern::from_bytes(&PATTERN_1[..Header::LEN - 1]),
            Err(DecodeError::Header(_))
        ));
    }

    #[test]
    fn invalid_track_keeps_partial_pattern() {
        let mut bytes = PATTERN_1.to_vec();

        // Put a bar separator in the snare's name
        let snare_name = Header::LEN + 25 + 5;
        bytes[snare_name] = b'|';

        let error = Pattern::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            error,
            DecodeError::Track {
                source: TrackReadError::Name(NameError::InvalidChar { char: '|', .. }),
                ..
            }
        ));
        let partial = error.partial().expect("no partial pattern");
        assert_eq!(partial.tempo, 120);
        assert_eq!(partial.tracks.len(), 1);
        assert_eq!(partial.tracks[0].name.as_str(), "kick");
    }

    fn with_version(version: &str) -> Vec<u8> {
        let mut bytes = PATTERN_1.to_vec();
        bytes[14..45].fill(0);
        bytes[14..14 + version.len()].copy_from_slice(version.as_bytes());
        bytes
    }

    #[test]
    fn v909() {
        let pattern = Pattern::from_bytes(&with_version("0.909")).unwrap();
        assert_eq!(pattern.hardware_version, "0.909");
        assert_eq!(pattern.tempo, 240);
        assert_eq!(pattern.tracks.len(), 6);

        assert!(matches!(
            pattern.to_bytes(),
            Err(EncodeError::Tempo(EncodeTempoError::Unsupported(
                HardwareVersion::V909
            )))
        ));
    }

    #[test]
    fn alpha_708_is_unsupported() {
        assert!(matches!(
            Pattern::from_bytes(&with_version("0.708-alpha")),
            Err(DecodeError::Tempo(ResolveTempoError::Unsupported(
                HardwareVersion::Alpha708
            )))
        ));
    }

    #[test]
    fn unknown_version() {
        let pattern = Pattern::from_bytes(&with_version("1.2.3")).unwrap();
        assert_eq!(pattern.hardware_version, "1.2.3");
        assert_eq!(pattern.tempo, 0);
        assert_eq!(pattern.tempo_decimal, 0);
        assert_eq!(pattern.tracks.len(), 6);
    }

    #[test]
    fn version_with_line_break() {
        assert!(matches!(
            Pattern::from_bytes(&with_version("0.808\nalpha")),
            Err(DecodeError::Version(VersionError::LineBreak))
        ));
    }

    #[test]
    fn encode_errors() {
        let pattern = Pattern::new("0.808-alpha", 200, 0);
        assert!(matches!(
            pattern.to_bytes(),
            Err(EncodeError::Tempo(EncodeTempoError::OutOfRange(Tempo {
                bpm: 200,
                decimal: 0
            })))
        ));

        let pattern = Pattern::new("something else entirely", 120, 0);
        assert!(matches!(
            pattern.to_bytes(),
            Err(EncodeError::Tempo(EncodeTempoError::Unsupported(
                HardwareVersion::Unknown(_)
            )))
        ));
    }
}

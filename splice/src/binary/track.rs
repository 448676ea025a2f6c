//! Reading and writing single track records

use super::utils::{read_byte, try_read_byte};
use crate::{
    name::{NameError, TrackName},
    pattern::Track,
};
use std::io::{self, ErrorKind, Read, Write};
use thiserror::Error;

/// The result of reading a track record
///
/// See [`read_track`] for more information on when each of these is returned
#[derive(Debug, PartialEq, Eq)]
pub enum Record {
    /// A complete track record has been read
    Track(Track),

    /// The reader was exhausted right at a record boundary
    EndOfFile,

    /// The reader was exhausted somewhere within a record
    Truncated,
}

/// The number of padding bytes between the id and the name length
const PADDING_LEN: usize = 3;

/// Read a single track record from an arbitrary I/O reader
///
/// A record consists of a one byte id, three padding bytes, a one byte name length,
/// the name and 16 step bytes. The call returns:
///
///  * [`Record::Track`] when an entire record was read
///  * [`Record::EndOfFile`] when no bytes were left at all
///  * [`Record::Truncated`] when the reader ran dry after the record started. Files cut
///    off like that are common enough that this is not considered an error.
pub fn read_track<R>(mut reader: R) -> Result<Record, TrackReadError>
where
    R: Read,
{
    let Some(id) = try_read_byte(&mut reader)? else {
        return Ok(Record::EndOfFile);
    };

    match read_track_body(id, &mut reader) {
        Ok(track) => Ok(Record::Track(track)),
        Err(TrackReadError::Io(error)) if error.kind() == ErrorKind::UnexpectedEof => {
            Ok(Record::Truncated)
        }
        Err(error) => Err(error),
    }
}

fn read_track_body<R>(id: u8, mut reader: R) -> Result<Track, TrackReadError>
where
    R: Read,
{
    let mut padding = [0; PADDING_LEN];
    reader.read_exact(&mut padding)?;

    let name = {
        let len = read_byte(&mut reader)?;
        let mut bytes = vec![0; len as usize];
        reader.read_exact(&mut bytes)?;
        TrackName::from_bytes(&bytes)?
    };

    let mut sequence = [0; Track::STEPS];
    reader.read_exact(&mut sequence)?;

    Ok(Track { id, name, sequence })
}

/// Serialize a single track record to an arbitrary I/O writer
pub fn write_track<W>(track: &Track, mut writer: W) -> io::Result<()>
where
    W: Write,
{
    // TrackName guarantees the length fits in a byte
    let len = track.name.len() as u8;

    writer.write_all(&[track.id])?;
    writer.write_all(&[0; PADDING_LEN])?;
    writer.write_all(&[len])?;
    writer.write_all(track.name.bytes())?;
    writer.write_all(&track.sequence)
}

/// Errors that might be returned from [`read_track()`]
#[derive(Debug, Error)]
pub enum TrackReadError {
    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[from] io::Error),

    /// The name bytes don't make up a valid track name
    #[error("Reading the track name failed")]
    Name(#[from] NameError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Cursor, str::FromStr};

    const CLAP: [u8; 25] = [
        2, 0, 0, 0, //
        4, b'c', b'l', b'a', b'p', //
        1, 0, 0, 0, //
        0, 1, 0, 0, //
        0, 1, 0, 1, //
        0, 0, 1, 1,
    ];

    fn clap() -> Track {
        Track {
            id: 2,
            name: TrackName::from_str("clap").unwrap(),
            sequence: [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 1, 1],
        }
    }

    #[test]
    fn write() {
        let mut dest = Vec::new();
        write_track(&clap(), &mut dest).unwrap();
        assert_eq!(dest, CLAP);
    }

    #[test]
    fn read() {
        let mut reader = Cursor::new(CLAP);
        assert_eq!(read_track(&mut reader).unwrap(), Record::Track(clap()));
        assert_eq!(read_track(&mut reader).unwrap(), Record::EndOfFile);
    }

    #[test]
    fn padding_is_ignored() {
        let mut source = CLAP;
        source[1..4].copy_from_slice(&[0xDE, 0xAD, 0xBF]);
        assert_eq!(
            read_track(Cursor::new(source)).unwrap(),
            Record::Track(clap())
        );
    }

    #[test]
    fn truncated() {
        // Cut off in the padding, the name length, the name and the sequence
        for len in [2, 4, 6, CLAP.len() - 1] {
            assert_eq!(
                read_track(Cursor::new(&CLAP[..len])).unwrap(),
                Record::Truncated,
                "cut off after {len} bytes"
            );
        }
    }

    #[test]
    fn invalid_name() {
        let mut source = CLAP;
        source[6] = b'|';
        assert!(matches!(
            read_track(Cursor::new(source)),
            Err(TrackReadError::Name(NameError::InvalidChar { char: '|', .. }))
        ));
    }

    #[test]
    fn anomalous_steps_are_kept() {
        let mut source = CLAP;
        source[9] = 7;
        match read_track(Cursor::new(source)).unwrap() {
            Record::Track(track) => assert_eq!(track.sequence[0], 7),
            record => panic!("expected a track, got {record:?}"),
        }
    }
}

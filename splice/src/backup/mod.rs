//! The textual backup format
//!
//! Backups are a human readable rendition of a [`Pattern`], one line per track:
//!
//! ```text
//! Saved with HW Version: 0.808-alpha
//! Tempo: 120
//! (0) kick	|x---|x---|x---|x---|
//! (1) snare	|----|x---|----|x---|
//! (2) clap	|----|x-x-|----|----|
//! ```

mod format;
mod parse;

pub use parse::{
    ParseError, ParseErrorKind, TrackParseError, parse_bar, parse_hardware_version, parse_tempo,
    parse_track, parse_track_id,
};

use crate::pattern::Pattern;
use std::str::FromStr;

impl Pattern {
    /// Parse a [`Pattern`] from its backup text
    pub fn from_backup(text: &str) -> Result<Self, ParseError> {
        parse::parse(text)
    }
}

impl FromStr for Pattern {
    type Err = ParseError;

    #[inline]
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        Self::from_backup(str)
    }
}

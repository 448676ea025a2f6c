//! A length-restricted track name that is safe to embed in both file formats
use std::{
    fmt,
    str::{self, FromStr},
};
use thiserror::Error;

/// The name of a [`Track`](crate::Track)
///
/// In the binary format a name is stored as a single length byte followed by the raw
/// name bytes, which caps it at [`TrackName::MAX_LEN`] bytes. In the backup text format
/// the name sits between the track id and the first bar separator, so it can't contain
/// the separator itself, tabs or line breaks. Backups pad the name before its bars, so
/// trailing whitespace wouldn't survive a round trip either.
///
/// Both restrictions are checked on construction, so any [`TrackName`] can be written
/// to either format without further checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TrackName {
    name: String,
}

impl TrackName {
    /// The maximal number of bytes a name can span
    pub const MAX_LEN: usize = u8::MAX as usize;

    /// Try to convert a byte slice to a name
    ///
    /// This function fails if the bytes are longer than the allowed length, aren't
    /// valid UTF-8 or contain a forbidden character.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NameError> {
        let str = str::from_utf8(bytes)?;
        Self::new(str)
    }

    /// Try to construct a name from a string slice
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.len() > Self::MAX_LEN {
            return Err(NameError::TooLong { len: name.len() });
        }

        if let Some((index, char)) = name.char_indices().find(|(_, c)| Self::is_forbidden(*c)) {
            return Err(NameError::InvalidChar { char, index });
        }

        if name.ends_with(char::is_whitespace) {
            return Err(NameError::TrailingWhitespace);
        }

        Ok(Self {
            name: name.to_owned(),
        })
    }

    /// Access the underlying bytes that make up the name
    pub fn bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }

    /// The number of bytes in the name
    pub fn len(&self) -> usize {
        self.name.len()
    }

    /// Are there _any_ characters in the name string?
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Convert to a [`prim@str`] slice
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Is a character unusable inside a name?
    pub fn is_forbidden(char: char) -> bool {
        matches!(char, '|' | '\t' | '\n' | '\r')
    }
}

impl fmt::Display for TrackName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'a> TryFrom<&'a [u8]> for TrackName {
    type Error = NameError;

    #[inline]
    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl<'a> TryFrom<&'a str> for TrackName {
    type Error = NameError;

    #[inline]
    fn try_from(str: &'a str) -> Result<Self, Self::Error> {
        Self::new(str)
    }
}

impl FromStr for TrackName {
    type Err = NameError;

    #[inline]
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        Self::new(str)
    }
}

/// Errors that can result from trying to construct a [`TrackName`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// The name doesn't fit in the single length byte of a track record
    #[error("The name is {len} bytes long, while at most 255 are allowed")]
    TooLong { len: usize },

    /// Bar separators, tabs and line breaks would corrupt the backup format
    #[error("Character {char:?} at position {index} is not allowed in a track name")]
    InvalidChar { char: char, index: usize },

    /// Whitespace at the end is indistinguishable from the padding before the bars
    #[error("A track name can't end in whitespace")]
    TrailingWhitespace,

    /// The name bytes read from a file weren't valid UTF-8
    #[error("The name is not valid UTF-8")]
    Utf8(#[from] str::Utf8Error),
}

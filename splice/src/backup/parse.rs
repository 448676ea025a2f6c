use crate::{
    name::{NameError, TrackName},
    pattern::{Pattern, Track},
    variant::HardwareVersion,
};
use regex::Regex;
use std::{num::ParseIntError, sync::OnceLock};
use thiserror::Error;

pub const HARDWARE_VERSION_PREFIX: &str = "Saved with HW Version: ";
pub const TEMPO_PREFIX: &str = "Tempo: ";

const TEMPO_PATTERN: &str = r"^(\d+)(?:\.(\d+))?\s*$";
const TRACK_ID_PATTERN: &str = r"^\((\d+)\) ?";
const BAR_PATTERN: &str = r"([^|]{4})\|";

static TEMPO_REGEX: OnceLock<Regex> = OnceLock::new();
static TRACK_ID_REGEX: OnceLock<Regex> = OnceLock::new();
static BAR_REGEX: OnceLock<Regex> = OnceLock::new();

fn tempo_regex() -> &'static Regex {
    TEMPO_REGEX.get_or_init(|| Regex::new(TEMPO_PATTERN).expect("invalid regex pattern"))
}

fn track_id_regex() -> &'static Regex {
    TRACK_ID_REGEX.get_or_init(|| Regex::new(TRACK_ID_PATTERN).expect("invalid regex pattern"))
}

fn bar_regex() -> &'static Regex {
    BAR_REGEX.get_or_init(|| Regex::new(BAR_PATTERN).expect("invalid regex pattern"))
}

/// Parse an entire backup into a [`Pattern`]
///
/// The first line holds the hardware version, the second the tempo and every other
/// non-empty line a track.
pub fn parse(text: &str) -> Result<Pattern, ParseError> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    let (line, version) = lines.next().ok_or(ParseError {
        line: 1,
        kind: ParseErrorKind::MissingLine("hardware version"),
    })?;
    let hardware_version =
        parse_hardware_version(version).map_err(|kind| ParseError { line, kind })?;

    let (line, tempo) = lines.next().ok_or(ParseError {
        line: line + 1,
        kind: ParseErrorKind::MissingLine("tempo"),
    })?;
    let (tempo, tempo_decimal) = parse_tempo(tempo).map_err(|kind| ParseError { line, kind })?;

    let mut pattern = Pattern::new(hardware_version, tempo, tempo_decimal);

    for (line, track) in lines {
        if track.trim().is_empty() {
            continue;
        }

        let track = parse_track(track).map_err(|error| ParseError {
            line,
            kind: ParseErrorKind::Track(error),
        })?;

        pattern.tracks.push(track);
    }

    Ok(pattern)
}

/// Extract the version from a `Saved with HW Version: <version>` line
pub fn parse_hardware_version(line: &str) -> Result<&str, ParseErrorKind> {
    let version = line
        .strip_prefix(HARDWARE_VERSION_PREFIX)
        .ok_or(ParseErrorKind::HardwareVersion)?;

    if HardwareVersion::contains_line_break(version) {
        return Err(ParseErrorKind::HardwareVersionLineBreak);
    }

    Ok(version)
}

/// Extract the tempo and its decimal from a `Tempo: <tempo>[.<decimal>]` line
///
/// A tempo without decimal results in a decimal of 0.
pub fn parse_tempo(line: &str) -> Result<(u32, u32), ParseErrorKind> {
    let captures = line
        .strip_prefix(TEMPO_PREFIX)
        .and_then(|tempo| tempo_regex().captures(tempo))
        .ok_or_else(|| ParseErrorKind::Tempo(line.to_owned()))?;

    let tempo = captures[1].parse().map_err(ParseErrorKind::TempoValue)?;
    let decimal = match captures.get(2) {
        Some(decimal) => decimal
            .as_str()
            .parse()
            .map_err(ParseErrorKind::TempoValue)?,
        None => 0,
    };

    Ok((tempo, decimal))
}

/// Split the leading `(<id>) ` off a track line
///
/// Returns the id and whatever follows it.
pub fn parse_track_id(line: &str) -> Result<(u8, &str), TrackParseError> {
    let captures = track_id_regex()
        .captures(line)
        .ok_or(TrackParseError::MissingId)?;

    let id = captures[1].parse().map_err(TrackParseError::InvalidId)?;
    let rest = &line[captures.get(0).map_or(0, |all| all.end())..];

    Ok((id, rest))
}

/// Parse `groups` consecutive bars of steps, each closed by a `|`
///
/// `x` is a hit, any other character is silence.
pub fn parse_bar(bars: &str, groups: usize) -> Result<Vec<u8>, TrackParseError> {
    let mut steps = Vec::with_capacity(groups * Track::STEPS_PER_BAR);
    let mut end = 0;

    for found in bar_regex().find_iter(bars).take(groups) {
        // Bars have to follow each other directly
        if found.start() != end {
            break;
        }
        end = found.end();

        for step in found.as_str().trim_end_matches(Track::BAR_SEPARATOR).chars() {
            if step != Track::ON_STEP && step != Track::OFF_STEP {
                tracing::debug!(%step, "unrecognized step character, treating it as silence");
            }
            steps.push(u8::from(step == Track::ON_STEP));
        }
    }

    let found = steps.len() / Track::STEPS_PER_BAR;
    if found < groups {
        return Err(TrackParseError::Bars {
            found,
            expected: groups,
        });
    }

    Ok(steps)
}

/// Parse a single `(<id>) <name>\t|xxxx|xxxx|xxxx|xxxx|` line
pub fn parse_track(line: &str) -> Result<Track, TrackParseError> {
    let (id, rest) = parse_track_id(line)?;

    let (name, bars) = rest
        .split_once(Track::BAR_SEPARATOR)
        .ok_or(TrackParseError::MissingBars)?;
    let name = TrackName::new(name.trim_end())?;

    let steps = parse_bar(bars, Track::BARS)?;
    let mut sequence = [0; Track::STEPS];
    sequence.copy_from_slice(&steps);

    Ok(Track { id, name, sequence })
}

/// An error describing what went wrong parsing a backup, and where
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct ParseError {
    /// The line the error occurred on, starting at 1
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// The different ways parsing a backup can fail
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The backup ended before a required line
    #[error("Expected a {0} line")]
    MissingLine(&'static str),

    /// The first line doesn't start with `Saved with HW Version: `
    #[error("Expected the line to start with \"Saved with HW Version: \"")]
    HardwareVersion,

    /// A lone carriage return in the version would be lost when reading the backup back
    #[error("The hardware version contains a line break")]
    HardwareVersionLineBreak,

    /// The tempo line isn't `Tempo: ` followed by a number
    #[error("Could not parse {0:?} as a tempo")]
    Tempo(String),

    /// The tempo didn't fit in an integer
    #[error("The tempo is out of range")]
    TempoValue(#[source] ParseIntError),

    /// A track line is malformed
    #[error("Could not parse track")]
    Track(#[source] TrackParseError),
}

/// The different ways parsing a track line can fail
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackParseError {
    /// The line doesn't start with `(<id>)`
    #[error("Expected the track to start with an id between parentheses")]
    MissingId,

    /// The id isn't a number between 0 and 255
    #[error("The track id is out of range")]
    InvalidId(#[source] ParseIntError),

    /// There's no `|` to end the name with
    #[error("Expected bars after the track name")]
    MissingBars,

    /// Not enough well-formed bars were found
    #[error("Found {found} well-formed bars, while {expected} were expected")]
    Bars { found: usize, expected: usize },

    /// The name can't be used as a track name
    #[error("Invalid track name")]
    Name(#[from] NameError),
}

//! Patterns and the tracks they're made of

use crate::{
    name::TrackName,
    variant::{HardwareVersion, Tempo},
};

/// A drum pattern: a tempo and a set of step sequenced tracks
///
/// Patterns are stored in `.splice` files (see [`Pattern::from_reader()`] and
/// [`Pattern::to_writer()`]) and have an equivalent textual backup format (see
/// [`Pattern::from_backup()`] and [`Pattern::backup()`]).
///
/// ```no_run
/// # use splice::Pattern;
/// // Load a pattern from a path on disk
/// let pattern = Pattern::from_path("pattern_1.splice")?;
///
/// // Print it in backup format
/// print!("{}", pattern.backup());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    /// The version of the hardware that saved the pattern
    pub hardware_version: String,

    /// Whole beats per minute
    pub tempo: u32,

    /// The digits after the tempo's decimal point, or 0 if there are none
    pub tempo_decimal: u32,

    /// The tracks, in the order they're stored in
    pub tracks: Vec<Track>,
}

impl Pattern {
    /// Construct an empty pattern
    pub fn new(hardware_version: impl Into<String>, tempo: u32, tempo_decimal: u32) -> Self {
        Self {
            hardware_version: hardware_version.into(),
            tempo,
            tempo_decimal,
            tracks: Vec::new(),
        }
    }

    /// The hardware version, interpreted
    pub fn variant(&self) -> HardwareVersion {
        self.hardware_version.as_str().into()
    }

    /// Whole tempo and decimal combined
    pub fn full_tempo(&self) -> Tempo {
        Tempo {
            bpm: self.tempo,
            decimal: self.tempo_decimal,
        }
    }
}

/// A named, identified sequence of drum hits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub id: u8,
    pub name: TrackName,

    /// One byte per step, 1 for a hit and 0 for silence
    ///
    /// Files have been found to contain other values. Those are kept as-is and show up as
    /// [`Track::UNKNOWN_STEP`] in backups.
    pub sequence: [u8; Self::STEPS],
}

impl Track {
    /// The number of steps in a sequence
    pub const STEPS: usize = 16;

    /// The number of steps per bar
    pub const STEPS_PER_BAR: usize = 4;

    /// The number of bars in a sequence
    pub const BARS: usize = Self::STEPS / Self::STEPS_PER_BAR;

    pub const ON_STEP: char = 'x';
    pub const OFF_STEP: char = '-';
    pub const UNKNOWN_STEP: char = '?';
    pub const BAR_SEPARATOR: char = '|';

    /// Construct a track with an empty sequence
    pub fn new(id: u8, name: TrackName) -> Self {
        Self {
            id,
            name,
            sequence: [0; Self::STEPS],
        }
    }

    /// Iterate over the sequence, one bar at a time
    pub fn bars(&self) -> impl Iterator<Item = &[u8]> {
        self.sequence.chunks(Self::STEPS_PER_BAR)
    }

    /// Does the sequence contain values other than 0 and 1?
    pub fn has_unknown_steps(&self) -> bool {
        self.sequence.iter().any(|step| *step > 1)
    }
}

use super::parse::{HARDWARE_VERSION_PREFIX, TEMPO_PREFIX};
use crate::pattern::{Pattern, Track};

impl Pattern {
    /// Render the pattern in backup format
    ///
    /// ```text
    /// Saved with HW Version: 0.808-alpha
    /// Tempo: 120
    /// (0) kick	|x---|x---|x---|x---|
    /// (1) snare	|----|x---|----|x---|
    /// ```
    pub fn backup(&self) -> String {
        let mut backup = format!("{HARDWARE_VERSION_PREFIX}{}\n", self.hardware_version);

        backup.push_str(TEMPO_PREFIX);
        backup.push_str(&self.tempo.to_string());
        if self.tempo_decimal != 0 {
            backup.push('.');
            backup.push_str(&self.tempo_decimal.to_string());
        }
        backup.push('\n');

        for track in &self.tracks {
            backup.push_str(&track.backup());
            backup.push('\n');
        }

        backup
    }
}

impl Track {
    /// Render the track as a single backup line, without line ending
    ///
    /// Steps that are neither on nor off show up as [`Track::UNKNOWN_STEP`].
    pub fn backup(&self) -> String {
        let mut line = format!("({}) {}\t", self.id, self.name);

        for bar in self.bars() {
            line.push(Self::BAR_SEPARATOR);
            line.extend(bar.iter().map(|step| match step {
                1 => Self::ON_STEP,
                0 => Self::OFF_STEP,
                _ => Self::UNKNOWN_STEP,
            }));
        }
        line.push(Self::BAR_SEPARATOR);

        line
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        backup::parse::{ParseError, ParseErrorKind, parse},
        name::{NameError, TrackName},
        pattern::{Pattern, Track},
    };
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn track() {
        let track = Track {
            id: 3,
            name: TrackName::from_str("hh-open").unwrap(),
            sequence: [0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0],
        };
        assert_eq!(track.backup(), "(3) hh-open\t|--x-|--x-|x-x-|--x-|");
    }

    #[test]
    fn unknown_steps() {
        let mut track = Track::new(9, TrackName::from_str("glitch").unwrap());
        track.sequence[0] = 1;
        track.sequence[5] = 2;
        track.sequence[15] = 0xFF;
        assert_eq!(track.backup(), "(9) glitch\t|x---|-?--|----|---?|");
    }

    #[test]
    fn tempo_decimal() {
        let pattern = Pattern::new("0.808-alpha", 98, 4);
        assert_eq!(pattern.backup(), "Saved with HW Version: 0.808-alpha\nTempo: 98.4\n");
    }

    #[test]
    fn pattern_1() {
        let source = include_str!("../../test/pattern_1.txt");
        assert_eq!(parse(source).unwrap().backup(), source);
    }

    #[test]
    fn pattern_2() {
        let source = include_str!("../../test/pattern_2.txt");
        assert_eq!(parse(source).unwrap().backup(), source);
    }

    #[test]
    fn round_trip() {
        let mut pattern = Pattern::new("0.909", 240, 0);
        for id in [0, 17, 255] {
            let mut track = Track::new(id, TrackName::from_str(&format!("track {id}")).unwrap());
            for (index, step) in track.sequence.iter_mut().enumerate() {
                *step = u8::from((index + id as usize) % 3 == 0);
            }
            pattern.tracks.push(track);
        }

        assert_eq!(parse(&pattern.backup()), Ok(pattern));
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(
            TrackName::from_str("kick "),
            Err(NameError::TrailingWhitespace)
        );

        let mut pattern = Pattern::new("0.808-alpha", 120, 0);
        for name in [" kick", "hh open", "", "x"] {
            pattern
                .tracks
                .push(Track::new(1, TrackName::from_str(name).unwrap()));
        }

        assert_eq!(parse(&pattern.backup()), Ok(pattern));
    }

    #[test]
    fn version_line_break_is_rejected() {
        let pattern = Pattern::new("0.808\ralpha", 120, 0);
        assert_eq!(
            parse(&pattern.backup()),
            Err(ParseError {
                line: 1,
                kind: ParseErrorKind::HardwareVersionLineBreak
            })
        );
    }
}

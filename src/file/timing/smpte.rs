#![doc = r#"
SMPTE (Society of Motion Picture and Television Engineers) time code support

A MIDI file may express its time division as frames per second times
sub-frame resolution instead of ticks per quarter note. The high byte of the
division holds the negated frame rate, the low byte holds the resolution.
"#]

/// The possible FPS (Frames Per Second) for MIDI files
///
/// The MIDI specification defines only four possible frame types:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (drop frame)
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// Decode the high byte of an SMPTE time division.
    ///
    /// The byte is the two's complement of the frame rate: `0xE8` is -24.
    pub const fn from_division_byte(byte: u8) -> Option<Self> {
        match byte {
            232 => Some(Self::TwentyFour),
            231 => Some(Self::TwentyFive),
            227 => Some(Self::TwentyNine),
            226 => Some(Self::Thirty),
            _ => None,
        }
    }

    /// The high byte of an SMPTE time division for this rate
    pub const fn division_byte(&self) -> u8 {
        (self.as_division() as i8).wrapping_neg() as u8
    }

    /// Frames per second as used for tick arithmetic.
    ///
    /// Drop-frame counts as 29 here, matching the header encoding.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 29,
            Self::Thirty => 30,
        }
    }

    /// The precise frame rate, including 30000/1001 for drop-frame.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

/// The precise value for NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;

#[test]
fn division_bytes_round_trip() {
    for fps in [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ] {
        assert_eq!(SmpteFps::from_division_byte(fps.division_byte()), Some(fps));
    }
    assert_eq!(SmpteFps::from_division_byte(0xE0), None);
}

mod smpte;
pub use smpte::*;

use crate::ParseError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or the alternative
/// SMPTE format of frames per second times ticks per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The file's delta times are defined using SMPTE frames
    Smpte(SmpteHeader),
}

impl Timing {
    /// Decode the 16 bit time division field of the header chunk.
    pub fn from_division(division: u16) -> Result<Self, ParseError> {
        let [hi, lo] = division.to_be_bytes();
        if hi & 0x80 == 0 {
            return Ok(Self::TicksPerQuarterNote(division));
        }
        let fps = SmpteFps::from_division_byte(hi).ok_or(ParseError::UnknownFrameRate(hi))?;
        Ok(Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame: lo,
        }))
    }

    /// Ticks per quarter note the playback clock runs at.
    ///
    /// For SMPTE timing this is frames per second times ticks per frame.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => *t,
            Self::Smpte(s) => s.fps.as_division() as u16 * s.ticks_per_frame as u16,
        }
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

use super::{FormatType, Timing};
use core::fmt;

#[doc = r#"
The contents of a file's `MThd` chunk.

Immutable once the file is open.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFileHeader {
    format: FormatType,
    track_count: u16,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header
    pub const fn new(format: FormatType, track_count: u16, timing: Timing) -> Self {
        Self {
            format,
            track_count,
            timing,
        }
    }
    /// Format 0 or 1
    pub const fn format(&self) -> FormatType {
        self.format
    }
    /// Number of track chunks in the file
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// Get the timing props
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl fmt::Display for MidiFileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File format: {}, Tracks: {}, Time division: {}",
            u16::from(self.format),
            self.track_count,
            self.timing.ticks_per_quarter_note()
        )
    }
}

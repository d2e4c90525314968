use thiserror::Error;

#[doc = r#"
Format errors found while reading a Standard MIDI File.

Header and track-chunk variants are reported by
[`MidiPlayer::open`](crate::player::MidiPlayer::open) and leave no session
behind. [`ParseError::RunningStatusWithoutContext`] only ever ends the track it
was found in.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file did not begin with `MThd`
    #[error("Expected header tag \"MThd\", found {0:02X?}")]
    BadHeaderMagic([u8; 4]),
    /// The header chunk declared a length other than 6
    #[error("Header chunk length must be 6, got {0}")]
    BadHeaderLength(u32),
    /// Only formats 0 and 1 are played
    #[error("Unsupported file format {0}")]
    UnsupportedFormat(u16),
    /// A format 0 file must contain exactly one track
    #[error("Format 0 requires exactly one track, header declares {0}")]
    FormatTrackMismatch(u16),
    /// More tracks than the player was configured for
    #[error("File declares {count} tracks, at most {max} are supported")]
    TooManyTracks {
        /// Declared track count
        count: u16,
        /// Configured maximum
        max: usize,
    },
    /// The SMPTE division byte is not one of -24, -25, -29 or -30
    #[error("Unknown SMPTE frame rate code {0:#04X}")]
    UnknownFrameRate(u8),
    /// A track chunk did not begin with `MTrk`
    #[error("Track {track}: expected tag \"MTrk\", found {found:02X?}")]
    BadTrackMagic {
        /// Index of the offending track
        track: u16,
        /// The four bytes that were read instead
        found: [u8; 4],
    },
    /// A data byte arrived before any channel status on this track
    #[error("Running status used with no previous channel message")]
    RunningStatusWithoutContext,
}

#![doc = r#"
Meta events: file-only metadata such as tempo, time signature or track names.

A [`MetaMessage`] keeps the bytes that fit its receive buffer together with
the length the file declared, so a handler can tell when a long text or
sequencer-specific payload was cut short.
"#]

mod key;
pub use key::*;

mod smpte_offset;
pub use smpte_offset::*;

use num_enum::{FromPrimitive, IntoPrimitive};
use std::borrow::Cow;

/// The type byte following `0xFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaType {
    /// `FF 00 02 ss ss`
    SequenceNumber = 0x00,
    /// Any text
    Text = 0x01,
    /// Copyright notice
    Copyright = 0x02,
    /// Sequence or track name
    TrackName = 0x03,
    /// Instrument name
    InstrumentName = 0x04,
    /// Lyric
    Lyric = 0x05,
    /// Marker
    Marker = 0x06,
    /// Cue point
    CuePoint = 0x07,
    /// `FF 20 01 cc`
    ChannelPrefix = 0x20,
    /// `FF 21 01 pp`
    PortPrefix = 0x21,
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03 tt tt tt`
    Tempo = 0x51,
    /// `FF 54 05 hr mn se fr ff`
    SmpteOffset = 0x54,
    /// `FF 58 04 nn dd cc bb`
    TimeSignature = 0x58,
    /// `FF 59 02 sf mi`
    KeySignature = 0x59,
    /// Sequencer specific data
    SequencerSpecific = 0x7F,
    /// Any type not listed above
    #[num_enum(catch_all)]
    Other(u8),
}

impl MetaType {
    /// True for the types whose payload is conventionally text
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Copyright
                | Self::TrackName
                | Self::InstrumentName
                | Self::Lyric
                | Self::Marker
                | Self::CuePoint
        )
    }
}

#[doc = r#"
A meta event as delivered to a handler.

For most types [`MetaMessage::data`] holds the payload bytes as read from the
file. Key signatures are the exception: their data is the rendered key name
(`"CM"`, `"Am"`, `"Err"` for an out-of-range value) and [`MetaMessage::len`]
is the length of that name.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaMessage {
    track: u16,
    kind: MetaType,
    data: Vec<u8>,
    len: u32,
}

impl MetaMessage {
    /// Create a meta message
    pub fn new(track: u16, kind: MetaType, data: Vec<u8>, len: u32) -> Self {
        Self {
            track,
            kind,
            data,
            len,
        }
    }

    /// The track the event was read from
    pub const fn track(&self) -> u16 {
        self.track
    }

    /// The meta type
    pub const fn kind(&self) -> MetaType {
        self.kind
    }

    /// The bytes that were copied
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The logical payload length declared by the file
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// True if the event carried no payload
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if the declared payload did not fit the receive buffer
    pub fn is_truncated(&self) -> bool {
        (self.data.len() as u64) < u64::from(self.len)
    }

    /// True for the end-of-track marker
    pub fn is_end_of_track(&self) -> bool {
        self.kind == MetaType::EndOfTrack
    }

    /// The payload as text, for text types and key signatures.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        (self.kind.is_text() || self.kind == MetaType::KeySignature)
            .then(|| String::from_utf8_lossy(&self.data))
    }

    /// Microseconds per quarter note of a set-tempo event
    pub fn tempo_micros(&self) -> Option<u32> {
        match (self.kind, self.data.as_slice()) {
            (MetaType::Tempo, &[a, b, c]) => Some(u32::from_be_bytes([0, a, b, c])),
            _ => None,
        }
    }

    /// Beats per minute of a set-tempo event
    pub fn tempo_bpm(&self) -> Option<u32> {
        self.tempo_micros()
            .filter(|m| *m != 0)
            .map(|m| 60_000_000 / m)
    }

    /// `(numerator, denominator exponent)` of a time-signature event
    pub fn time_signature(&self) -> Option<(u8, u8)> {
        match (self.kind, self.data.as_slice()) {
            (MetaType::TimeSignature, &[n, d, ..]) => Some((n, d)),
            _ => None,
        }
    }

    /// The rendered key name of a key-signature event
    pub fn key_name(&self) -> Option<&str> {
        if self.kind != MetaType::KeySignature {
            return None;
        }
        std::str::from_utf8(&self.data).ok()
    }

    /// The number carried by a sequence-number event
    pub fn sequence_number(&self) -> Option<u16> {
        match (self.kind, self.data.as_slice()) {
            (MetaType::SequenceNumber, &[hi, lo]) => Some(u16::from_be_bytes([hi, lo])),
            _ => None,
        }
    }

    /// The channel or port of a prefix event
    pub fn prefix(&self) -> Option<u8> {
        match (self.kind, self.data.as_slice()) {
            (MetaType::ChannelPrefix | MetaType::PortPrefix, &[v]) => Some(v),
            _ => None,
        }
    }

    /// Parse an SMPTE offset event
    pub fn smpte_offset(&self) -> Option<Result<SmpteOffset, SmpteError>> {
        (self.kind == MetaType::SmpteOffset).then(|| SmpteOffset::parse(&self.data))
    }
}

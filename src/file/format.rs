use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The arrangement of tracks in a MIDI file.

Format 2 files (sequentially independent patterns) are not played.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: a single track carrying every channel
    SingleMultiChannel = 0,
    /// Format 1: several tracks played together
    Simultaneous = 1,
}

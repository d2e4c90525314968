/// A system-exclusive event.
///
/// When the event was introduced by `0xF0`, that byte is the first byte of
/// [`SysexMessage::data`] and counts towards [`SysexMessage::len`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysexMessage {
    track: u16,
    data: Vec<u8>,
    len: u32,
}

impl SysexMessage {
    /// Create a sysex message
    pub fn new(track: u16, data: Vec<u8>, len: u32) -> Self {
        Self { track, data, len }
    }

    /// The track the event was read from
    pub const fn track(&self) -> u16 {
        self.track
    }

    /// The bytes that fit the receive buffer
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The logical size of the event
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// True if the event had no bytes at all
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if [`SysexMessage::data`] holds fewer bytes than the event
    pub fn is_truncated(&self) -> bool {
        (self.data.len() as u64) < u64::from(self.len)
    }
}

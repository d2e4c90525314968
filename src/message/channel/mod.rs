#![doc = r#"
Channel voice messages as they are stored in a track.

```text
 status byte          data bytes
|-------------|  |-----------------|
| cmd | chan  |  | 0ddddddd (x1/2) |
|-------------|  |-----------------|
  4 bit  4 bit
```
"#]

use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The high nibble of a channel status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceCommand {
    /// Note off
    NoteOff = 0x8,
    /// Note on
    NoteOn = 0x9,
    /// Polyphonic key pressure
    PolyTouch = 0xA,
    /// Control change
    ControlChange = 0xB,
    /// Program change
    ProgramChange = 0xC,
    /// Channel pressure
    ChannelTouch = 0xD,
    /// Pitch bend
    PitchBend = 0xE,
}

impl VoiceCommand {
    /// Number of data bytes following the status byte
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelTouch => 1,
            _ => 2,
        }
    }

    /// Split a status byte into its command and channel
    pub fn from_status(status: u8) -> Option<(Self, Channel)> {
        let command = Self::try_from(status >> 4).ok()?;
        Some((command, Channel(status & 0x0F)))
    }
}

/// A MIDI channel, stored zero based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(u8);

impl Channel {
    /// Create a channel from a zero-based index. Only the low nibble is kept.
    pub const fn new(index: u8) -> Self {
        Self(index & 0x0F)
    }
    /// 0 to 15
    pub const fn index(&self) -> u8 {
        self.0
    }
    /// 1 to 16, as printed on a synthesizer
    pub const fn number(&self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ch {}", self.number())
    }
}

#[doc = r#"
A decoded channel message: command, channel and one or two data bytes.

[`ChannelMessage::as_bytes`] gives the 2 or 3 byte wire form, status byte
first, ready for a transport.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelMessage {
    command: VoiceCommand,
    channel: Channel,
    raw: [u8; 3],
}

impl ChannelMessage {
    /// Build a message. Data bytes beyond what the command uses are ignored.
    pub const fn new(command: VoiceCommand, channel: Channel, data: [u8; 2]) -> Self {
        let status = ((command as u8) << 4) | channel.index();
        let second = if command.data_len() == 2 { data[1] } else { 0 };
        Self {
            command,
            channel,
            raw: [status, data[0], second],
        }
    }

    /// The command
    pub const fn command(&self) -> VoiceCommand {
        self.command
    }

    /// The channel
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The full status byte
    pub const fn status(&self) -> u8 {
        self.raw[0]
    }

    /// Total size on the wire, status included
    pub const fn size(&self) -> usize {
        1 + self.command.data_len()
    }

    /// The data bytes
    pub fn data(&self) -> &[u8] {
        &self.raw[1..self.size()]
    }

    /// Status and data bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..self.size()]
    }
}

impl fmt::Display for ChannelMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.channel, self.command)?;
        for b in self.data() {
            write!(f, " {b:02X}")?;
        }
        Ok(())
    }
}

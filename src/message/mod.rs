#![doc = r#"
The events a track produces while it plays.

```text
                 |-----------|
                 | MidiEvent |
                 |-----------|
               /       |       \
|----------------| |-------| |------|
| ChannelMessage | | Sysex | | Meta |
|----------------| |-------| |------|
```

Events are transient: the player hands each one to a
[`MidiHandler`](crate::handler::MidiHandler) and keeps no history.
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod sysex;
pub use sysex::*;

/// Any event decoded from a track
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidiEvent {
    /// A channel voice message
    Channel(ChannelMessage),
    /// A system-exclusive message
    Sysex(SysexMessage),
    /// A meta message
    Meta(MetaMessage),
}

impl From<ChannelMessage> for MidiEvent {
    fn from(value: ChannelMessage) -> Self {
        Self::Channel(value)
    }
}

impl From<SysexMessage> for MidiEvent {
    fn from(value: SysexMessage) -> Self {
        Self::Sysex(value)
    }
}

impl From<MetaMessage> for MidiEvent {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}

#![doc = r#"
Where decoded events go.

The player is generic over a [`MidiHandler`]. Every method has an empty
default, so a handler only implements what it consumes. `()` drops
everything and `None` behaves like an absent handler.
"#]

use crate::message::{ChannelMessage, MetaMessage, SysexMessage};

/// Identifies the output a channel message is meant for.
///
/// The player passes along whatever port it was configured with; the handler
/// decides what it names (a serial line, a MIDI output, a synth instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputPort(pub u16);

/// Receives events as their ticks come due
pub trait MidiHandler {
    /// A channel voice message fired
    fn on_channel(&mut self, _port: OutputPort, _message: &ChannelMessage) {}
    /// A system-exclusive message fired
    fn on_sysex(&mut self, _message: &SysexMessage) {}
    /// A meta message fired
    fn on_meta(&mut self, _message: &MetaMessage) {}
}

impl MidiHandler for () {}

impl<H: MidiHandler> MidiHandler for Option<H> {
    fn on_channel(&mut self, port: OutputPort, message: &ChannelMessage) {
        if let Some(h) = self {
            h.on_channel(port, message);
        }
    }
    fn on_sysex(&mut self, message: &SysexMessage) {
        if let Some(h) = self {
            h.on_sysex(message);
        }
    }
    fn on_meta(&mut self, message: &MetaMessage) {
        if let Some(h) = self {
            h.on_meta(message);
        }
    }
}

impl<H: MidiHandler + ?Sized> MidiHandler for &mut H {
    fn on_channel(&mut self, port: OutputPort, message: &ChannelMessage) {
        (**self).on_channel(port, message);
    }
    fn on_sysex(&mut self, message: &SysexMessage) {
        (**self).on_sysex(message);
    }
    fn on_meta(&mut self, message: &MetaMessage) {
        (**self).on_meta(message);
    }
}

impl<H: MidiHandler + ?Sized> MidiHandler for Box<H> {
    fn on_channel(&mut self, port: OutputPort, message: &ChannelMessage) {
        (**self).on_channel(port, message);
    }
    fn on_sysex(&mut self, message: &SysexMessage) {
        (**self).on_sysex(message);
    }
    fn on_meta(&mut self, message: &MetaMessage) {
        (**self).on_meta(message);
    }
}

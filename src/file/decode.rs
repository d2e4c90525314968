#![doc = r#"
Decoding of a single track event body.

```text
track_event = <delta:varlen> <event>
event       = <channel message, possibly running status>
            | F0 <len:varlen> <bytes>     sysex
            | F7 <len:varlen> <bytes>     sysex continuation / escape
            | FF <type:1> <len:varlen> <bytes>   meta
```

The delta time is handled by [`TrackState`](super::TrackState); the
[`EventDecoder`] starts at the status byte.
"#]

use crate::{
    ParseError,
    clock::PlaybackClock,
    config::PlayerConfig,
    message::{
        ChannelMessage, MetaMessage, MetaType, MidiEvent, SysexMessage, VoiceCommand,
        key_signature_name,
    },
    reader::{ReadResult, Reader, ReaderError, Width},
};
use log::{debug, warn};
use std::io::{Read, Seek};

/// Receive buffer sizes for variable-length payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLimits {
    /// Bytes of a sysex payload kept
    pub sysex: usize,
    /// Bytes of a meta payload kept
    pub meta: usize,
}

impl From<&PlayerConfig> for BufferLimits {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            sysex: config.sysex_capacity,
            meta: config.meta_capacity,
        }
    }
}

/// What one event body produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The event to hand on, if the body held one
    pub event: Option<MidiEvent>,
    /// The track must not produce anything further
    pub end_of_track: bool,
}

impl Decoded {
    fn event(event: impl Into<MidiEvent>) -> Self {
        Self {
            event: Some(event.into()),
            end_of_track: false,
        }
    }
}

/// Decodes one event body of a track.
///
/// Tempo and time-signature meta events update the borrowed clock directly.
pub struct EventDecoder<'a, R> {
    reader: &'a mut Reader<R>,
    clock: &'a mut PlaybackClock,
    limits: BufferLimits,
    track: u16,
}

impl<'a, R: Read + Seek> EventDecoder<'a, R> {
    /// Decode from the reader's current position on behalf of `track`
    pub fn new(
        reader: &'a mut Reader<R>,
        clock: &'a mut PlaybackClock,
        limits: BufferLimits,
        track: u16,
    ) -> Self {
        Self {
            reader,
            clock,
            limits,
            track,
        }
    }

    /// Decode one event body.
    ///
    /// `running` is the last channel message of this track. It is replaced by
    /// any new channel message and reused when the body starts with a data
    /// byte.
    pub fn decode(&mut self, running: &mut Option<ChannelMessage>) -> ReadResult<Decoded> {
        let position = self.reader.position();
        let status = self.reader.read_u8()?;

        if let Some((command, channel)) = VoiceCommand::from_status(status) {
            let first = self.reader.read_u8()?;
            let second = self.read_second_data_byte(command)?;
            let message = ChannelMessage::new(command, channel, [first, second]);
            debug!("[MIDI] trk {} {}", self.track, message);
            *running = Some(message);
            return Ok(Decoded::event(message));
        }

        match status {
            0x00..=0x7F => {
                let Some(previous) = *running else {
                    return Err(ReaderError::parse_error(
                        position,
                        ParseError::RunningStatusWithoutContext,
                    ));
                };
                let command = previous.command();
                let second = self.read_second_data_byte(command)?;
                let message = ChannelMessage::new(command, previous.channel(), [status, second]);
                debug!("[MID+] trk {} {}", self.track, message);
                *running = Some(message);
                Ok(Decoded::event(message))
            }
            0xF0 | 0xF7 => self.decode_sysex(status).map(Decoded::event),
            0xFF => self.decode_meta(),
            _ => {
                warn!(
                    "track {}: unknown status byte {:#04X} at {}, track aborted",
                    self.track, status, position
                );
                Ok(Decoded {
                    event: None,
                    end_of_track: true,
                })
            }
        }
    }

    fn read_second_data_byte(&mut self, command: VoiceCommand) -> ReadResult<u8> {
        if command.data_len() == 2 {
            self.reader.read_u8()
        } else {
            Ok(0)
        }
    }

    /// Copy at most `keep` bytes of a `declared` length payload, then move to
    /// its end.
    fn read_capped(&mut self, declared: u32, keep: usize) -> ReadResult<Vec<u8>> {
        let keep = keep.min(declared as usize);
        let data = self.reader.read_bytes(keep)?;
        self.reader.skip(u64::from(declared) - keep as u64)?;
        Ok(data)
    }

    fn decode_sysex(&mut self, status: u8) -> ReadResult<SysexMessage> {
        let declared = self.reader.read_varlen()?;
        let capacity = self.limits.sysex;

        // a leading F0 is part of the message the consumer sees
        let mut data = Vec::new();
        let mut len = declared;
        if status == 0xF0 {
            len += 1;
            if capacity > 0 {
                data.push(status);
            }
        }
        let room = capacity.saturating_sub(data.len());
        data.extend(self.read_capped(declared, room)?);

        let message = SysexMessage::new(self.track, data, len);
        debug!(
            "[SYSX] trk {} {} of {} bytes",
            self.track,
            message.data().len(),
            message.len()
        );
        Ok(message)
    }

    fn decode_meta(&mut self) -> ReadResult<Decoded> {
        let kind = MetaType::from(self.reader.read_u8()?);
        let declared = self.reader.read_varlen()?;
        let end = self.reader.position() + u64::from(declared);

        let required = match kind {
            MetaType::Tempo => 3,
            MetaType::TimeSignature | MetaType::KeySignature | MetaType::SequenceNumber => 2,
            MetaType::ChannelPrefix | MetaType::PortPrefix => 1,
            _ => 0,
        };
        if (declared as usize) < required {
            warn!(
                "track {}: meta {:?} declares {} bytes, needs {}",
                self.track, kind, declared, required
            );
            let data = self.read_capped(declared, self.limits.meta)?;
            return Ok(Decoded::event(MetaMessage::new(
                self.track, kind, data, declared,
            )));
        }

        let mut end_of_track = false;
        let mut len = declared;
        let data = match kind {
            MetaType::EndOfTrack => {
                end_of_track = true;
                Vec::new()
            }
            MetaType::Tempo => {
                let micros = self.reader.read_fixed(Width::Tryte)?;
                if micros == 0 {
                    warn!("track {}: ignoring zero tempo", self.track);
                }
                self.clock.set_micros_per_quarter_note(micros);
                micros.to_be_bytes()[1..].to_vec()
            }
            MetaType::TimeSignature => {
                let [numerator, exponent] = self.reader.read_exact_size()?;
                match 1u16.checked_shl(u32::from(exponent)) {
                    Some(denominator) => self.clock.set_time_signature(numerator, denominator),
                    None => warn!(
                        "track {}: time signature exponent {} out of range",
                        self.track, exponent
                    ),
                }
                vec![numerator, exponent]
            }
            MetaType::KeySignature => {
                let [sharps, minor] = self.reader.read_exact_size()?;
                let name = key_signature_name(sharps as i8, minor);
                len = name.len() as u32;
                name.into_bytes()
            }
            MetaType::SequenceNumber => self.reader.read_bytes(2)?,
            MetaType::ChannelPrefix | MetaType::PortPrefix => self.reader.read_bytes(1)?,
            _ => self.read_capped(declared, self.limits.meta)?,
        };
        self.reader.seek_to(end)?;

        let message = MetaMessage::new(self.track, kind, data, len);
        debug!(
            "[META] trk {} {:?} {:02X?}",
            self.track,
            message.kind(),
            message.data()
        );
        Ok(Decoded {
            event: Some(message.into()),
            end_of_track,
        })
    }
}

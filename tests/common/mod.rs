#![allow(dead_code)]

use smfplay::prelude::*;
use std::io::Cursor;

pub type TestPlayer<'a> = MidiPlayer<Recorder, Cursor<Vec<u8>>, &'a ManualClock>;

/// Encode a variable-length quantity, most significant group first
pub fn encode_varlen(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    out.reverse();
    out
}

/// Assemble a file from a header and raw track bodies
pub fn smf(format: u16, division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&format.to_be_bytes());
    bytes.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&division.to_be_bytes());
    for track in tracks {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
        bytes.extend_from_slice(track);
    }
    bytes
}

/// Builds a track body event by event
#[derive(Default, Clone)]
pub struct TrackBuilder {
    bytes: Vec<u8>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta time followed by raw event bytes
    pub fn event(mut self, delta: u32, body: &[u8]) -> Self {
        self.bytes.extend(encode_varlen(delta));
        self.bytes.extend_from_slice(body);
        self
    }

    pub fn note_on(self, delta: u32, channel: u8, key: u8, velocity: u8) -> Self {
        self.event(delta, &[0x90 | channel, key, velocity])
    }

    pub fn note_off(self, delta: u32, channel: u8, key: u8) -> Self {
        self.event(delta, &[0x80 | channel, key, 0])
    }

    pub fn tempo(self, delta: u32, micros_per_quarter: u32) -> Self {
        let b = micros_per_quarter.to_be_bytes();
        self.event(delta, &[0xFF, 0x51, 0x03, b[1], b[2], b[3]])
    }

    pub fn end(self, delta: u32) -> Vec<u8> {
        self.event(delta, &[0xFF, 0x2F, 0x00]).bytes
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Records every event it is handed
#[derive(Default, Debug)]
pub struct Recorder {
    pub events: Vec<MidiEvent>,
    pub ports: Vec<OutputPort>,
}

impl Recorder {
    pub fn channel_bytes(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MidiEvent::Channel(c) => Some(c.as_bytes().to_vec()),
                _ => None,
            })
            .collect()
    }

    pub fn metas(&self) -> Vec<&MetaMessage> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MidiEvent::Meta(m) => Some(m),
                _ => None,
            })
            .collect()
    }
}

impl MidiHandler for Recorder {
    fn on_channel(&mut self, port: OutputPort, message: &ChannelMessage) {
        self.ports.push(port);
        self.events.push((*message).into());
    }
    fn on_sysex(&mut self, message: &SysexMessage) {
        self.events.push(message.clone().into());
    }
    fn on_meta(&mut self, message: &MetaMessage) {
        self.events.push(message.clone().into());
    }
}

pub fn player(bytes: Vec<u8>, config: PlayerConfig, clock: &ManualClock) -> TestPlayer<'_> {
    MidiPlayer::from_reader(Cursor::new(bytes), config, Recorder::default(), clock)
        .expect("test file should load")
}

pub fn load_err(bytes: Vec<u8>, config: PlayerConfig) -> ReaderError {
    match MidiPlayer::from_reader(Cursor::new(bytes), config, (), ManualClock::new()) {
        Ok(_) => panic!("file should have been rejected"),
        Err(e) => e,
    }
}

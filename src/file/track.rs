use super::{BufferLimits, EventDecoder};
use crate::{
    clock::PlaybackClock,
    message::{ChannelMessage, MidiEvent},
    reader::{ReadResult, Reader},
};
use core::fmt;
use std::io::{Read, Seek};

/// The outcome of offering ticks to a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next event is not due yet, or the track has ended
    Idle,
    /// An event was consumed. `None` when its body produced nothing to
    /// dispatch, such as an unknown status byte that ended the track.
    Fired(Option<MidiEvent>),
}

#[doc = r#"
Playback position within one `MTrk` chunk.

Events are decoded lazily: a track remembers where its next delta time
starts and how many ticks have accumulated towards it. The offset only moves
forward once an event actually fires, so a delta that is not yet due is read
again on the next call.

A track is either active or ended. Once ended, [`TrackState::advance`] does
nothing until [`TrackState::restart`].
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackState {
    id: u16,
    length: u32,
    start: u64,
    offset: u64,
    elapsed_ticks: u64,
    ended: bool,
    running: Option<ChannelMessage>,
}

impl TrackState {
    /// A track whose event data begins at absolute offset `start`
    pub fn new(id: u16, start: u64, length: u32) -> Self {
        Self {
            id,
            length,
            start,
            offset: 0,
            elapsed_ticks: 0,
            ended: false,
            running: None,
        }
    }

    /// Index of the track within the file
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Length of the chunk's event data in bytes
    pub const fn len(&self) -> u32 {
        self.length
    }

    /// True if the chunk holds no event data
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Absolute offset of the first event
    pub const fn start_offset(&self) -> u64 {
        self.start
    }

    /// Offset of the next event relative to [`TrackState::start_offset`]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Ticks accumulated towards the next event
    pub const fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// True once the track can produce nothing further
    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    /// Rewind to the first event
    pub fn restart(&mut self) {
        self.offset = 0;
        self.elapsed_ticks = 0;
        self.ended = false;
        self.running = None;
    }

    /// Drop accumulated ticks so the track lines up with a fresh clock
    pub fn sync_time(&mut self) {
        self.elapsed_ticks = 0;
    }

    /// Offer `ticks` to the track and decode its next event if it is due.
    ///
    /// A decode failure ends this track and is returned; the reader is left
    /// wherever the failure occurred.
    pub fn advance<R: Read + Seek>(
        &mut self,
        reader: &mut Reader<R>,
        clock: &mut PlaybackClock,
        limits: BufferLimits,
        ticks: u32,
    ) -> ReadResult<Advance> {
        if self.ended {
            return Ok(Advance::Idle);
        }
        self.step(reader, clock, limits, ticks).inspect_err(|_| {
            self.ended = true;
        })
    }

    fn step<R: Read + Seek>(
        &mut self,
        reader: &mut Reader<R>,
        clock: &mut PlaybackClock,
        limits: BufferLimits,
        ticks: u32,
    ) -> ReadResult<Advance> {
        if self.offset >= u64::from(self.length) {
            self.ended = true;
            return Ok(Advance::Idle);
        }

        reader.seek_to(self.start + self.offset)?;
        self.elapsed_ticks += u64::from(ticks);

        let delta = u64::from(reader.read_varlen()?);
        if self.elapsed_ticks < delta {
            return Ok(Advance::Idle);
        }
        // carry the overshoot so rounding never accumulates
        self.elapsed_ticks -= delta;

        let decoded =
            EventDecoder::new(reader, clock, limits, self.id).decode(&mut self.running)?;

        self.offset = reader.position() - self.start;
        self.ended = decoded.end_of_track || self.offset >= u64::from(self.length);
        Ok(Advance::Fired(decoded.event))
    }
}

impl fmt::Display for TrackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Track {}: Length: {}, File location: {}, End of track: {}, Current offset: {}",
            self.id, self.length, self.start, self.ended, self.offset
        )
    }
}

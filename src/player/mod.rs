#![doc = r#"
A playback session over one open MIDI file.

[`MidiPlayer`] owns the byte source, the header, the [`PlaybackClock`] and one
[`TrackState`] per track. It never waits: [`MidiPlayer::poll`] converts the
time since the previous poll into ticks, lets every track consume them and
returns straight away.

```text
poll ─► tick_clock ─► ticks ─► track 0 ─► event ─► handler
                        │  └─► track 1 ─► event ─► handler
                        └──── remainder carried to the next poll
```
"#]

mod schedule;

use crate::{
    clock::PlaybackClock,
    config::PlayerConfig,
    file::{self, BufferLimits, FormatType, MidiFileHeader, TrackState},
    handler::MidiHandler,
    micros::UMicros,
    reader::{ReadResult, Reader, ReaderError},
    time::{MonotonicClock, TimeSource},
};
use log::{debug, info, trace};
use std::{
    fs,
    io::{Cursor, Read, Seek},
    path::{Path, PathBuf},
};

/// Decodes and schedules the tracks of a MIDI file in real time.
///
/// `H` receives events, `R` is the byte source and `T` supplies the current
/// time in microseconds.
pub struct MidiPlayer<H, R = Cursor<Vec<u8>>, T = MonotonicClock> {
    reader: Reader<R>,
    header: MidiFileHeader,
    clock: PlaybackClock,
    tracks: Vec<TrackState>,
    handler: H,
    time: T,
    config: PlayerConfig,
    path: Option<PathBuf>,
    last_tick_check: UMicros,
    tick_error: UMicros,
    paused: bool,
    looping: bool,
    needs_sync: bool,
}

impl<H: MidiHandler> MidiPlayer<H> {
    /// Open a MIDI file from disk and load its header and track chunks.
    ///
    /// The whole file is read into memory up front, since every track
    /// advance seeks. Any error leaves nothing open. [`ReaderError::code`]
    /// maps it to the loader's numeric status.
    pub fn open(path: impl AsRef<Path>, config: PlayerConfig, handler: H) -> ReadResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ReaderError::new(0, e.into()))?;
        let mut player =
            Self::from_reader(Cursor::new(bytes), config, handler, MonotonicClock::new())?;
        player.path = Some(path.to_path_buf());
        info!("opened {}", path.display());
        Ok(player)
    }
}

impl<H, R, T> MidiPlayer<H, R, T>
where
    H: MidiHandler,
    R: Read + Seek,
    T: TimeSource,
{
    /// Load a MIDI file from any seekable byte source.
    pub fn from_reader(source: R, config: PlayerConfig, handler: H, time: T) -> ReadResult<Self> {
        let mut reader = Reader::new(source)?;
        let header = file::read_header(&mut reader, config.max_tracks)?;

        let mut clock = PlaybackClock::default();
        clock.set_ticks_per_quarter_note(header.timing().ticks_per_quarter_note());

        let tracks = file::read_tracks(&mut reader, &header)?;
        info!("loaded {header}");
        debug!("{clock}");

        let looping = config.looping;
        Ok(Self {
            reader,
            header,
            clock,
            tracks,
            handler,
            time,
            config,
            path: None,
            last_tick_check: UMicros::ZERO,
            tick_error: UMicros::ZERO,
            paused: false,
            looping,
            needs_sync: true,
        })
    }

    /// The file header
    pub const fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Format 0 or 1
    pub const fn format(&self) -> FormatType {
        self.header.format()
    }

    /// Number of tracks
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Per-track playback state, indexed by track id
    pub fn tracks(&self) -> &[TrackState] {
        &self.tracks
    }

    /// Tempo, resolution and time signature
    pub const fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Change tempo, resolution or time signature directly
    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    /// The configuration the file was opened with
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The event handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The event handler
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// The file this player was opened from, if it came from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True while paused
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// True if playback restarts once every track has ended
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// Pause or resume. Resuming resynchronises the clock on the next poll so
    /// the time spent paused is not played back as a burst of ticks.
    pub fn pause(&mut self, paused: bool) {
        self.paused = paused;
        if !paused {
            self.needs_sync = true;
        }
    }

    /// Enable or disable looping
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Offset the file's tempo by `delta` beats per minute.
    ///
    /// Returns `false`, keeping the previous offset, if the adjusted tempo
    /// would not be positive.
    pub fn set_tempo_adjust(&mut self, delta: i16) -> bool {
        self.clock.set_tempo_adjust(delta)
    }

    /// Clear every track's accumulated ticks and restart the tick clock from
    /// now.
    pub fn sync_tracks(&mut self) {
        for track in &mut self.tracks {
            track.sync_time();
        }
        self.last_tick_check = self.time.now();
    }

    /// Work out how many whole ticks have passed since the last check.
    ///
    /// The part of a tick left over is carried into the next check, so over
    /// any run of calls no time is lost or counted twice. Nothing changes
    /// when less than one tick has passed.
    pub fn tick_clock(&mut self) -> u32 {
        let now = self.time.now();
        let elapsed = self.tick_error + now.saturating_sub(self.last_tick_check);
        let per_tick = self.clock.micros_per_tick();
        if elapsed < per_tick {
            return 0;
        }

        let (ticks, error) = elapsed.div_rem(per_tick);
        self.tick_error = error;
        self.last_tick_check = now;
        trace!("{elapsed} elapsed -> {ticks} ticks, {error} carried");
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Play whatever has come due since the previous poll.
    ///
    /// Returns `true` if at least one tick elapsed and the tracks were
    /// offered it.
    pub fn poll(&mut self) -> bool {
        if self.paused {
            return false;
        }
        if self.needs_sync {
            self.sync_tracks();
            self.needs_sync = false;
        }

        let ticks = self.tick_clock();
        if ticks == 0 {
            return false;
        }
        self.process_ticks(ticks);
        true
    }

    /// Offer `ticks` to every track under the configured scheduling policy,
    /// bypassing the tick clock.
    pub fn process_ticks(&mut self, ticks: u32) {
        schedule::dispatch(self, ticks);
    }

    /// True once every track has ended.
    ///
    /// When looping, reaching the end restarts playback instead and `false` is
    /// returned.
    pub fn is_eof(&mut self) -> bool {
        let eof = self.tracks.iter().all(TrackState::is_ended);
        if eof {
            debug!("end of file");
        }
        if eof && self.looping {
            self.restart();
            return false;
        }
        eof
    }

    /// Rewind every track to its start.
    ///
    /// Track 0 carries file-wide tempo and metadata, so when looping a file
    /// with more than one track it keeps its position.
    pub fn restart(&mut self) {
        let first = if self.looping && self.tracks.len() > 1 {
            1
        } else {
            0
        };
        for track in self.tracks.iter_mut().skip(first) {
            track.restart();
        }
        self.needs_sync = true;
        info!("restarted from track {first}");
    }

    /// Close the file, handing back the event handler
    pub fn close(self) -> H {
        if let Some(path) = &self.path {
            info!("closed {}", path.display());
        }
        self.handler
    }

    fn buffer_limits(&self) -> BufferLimits {
        BufferLimits::from(&self.config)
    }
}

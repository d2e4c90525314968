#![doc = r#"
Tempo and resolution state shared by every track of a session.

Tempo and time-signature meta events arrive on individual tracks but change
the clock for the whole file, so the session owns one [`PlaybackClock`] and
lends it to whichever track is decoding.

One tick lasts `60_000_000 / (tempo + tempo_adjust) / ticks_per_quarter_note`
microseconds, in integer arithmetic.
"#]

use crate::micros::UMicros;
use core::fmt;
use log::trace;

const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Tempo, resolution and time signature of a playing file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackClock {
    tempo: u32,
    tempo_adjust: i16,
    ticks_per_quarter_note: u16,
    numerator: u8,
    denominator: u16,
    micros_per_tick: UMicros,
}

impl Default for PlaybackClock {
    /// 120 BPM, 48 ticks per quarter note, 4/4
    fn default() -> Self {
        let mut clock = Self {
            tempo: 120,
            tempo_adjust: 0,
            ticks_per_quarter_note: 48,
            numerator: 4,
            denominator: 4,
            micros_per_tick: UMicros::ZERO,
        };
        clock.recalculate();
        clock
    }
}

impl PlaybackClock {
    /// Beats per minute, before adjustment
    pub const fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Signed offset added to the tempo
    pub const fn tempo_adjust(&self) -> i16 {
        self.tempo_adjust
    }

    /// Resolution of the file's delta times
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// `(numerator, denominator)`, with the denominator already resolved from
    /// its power-of-two exponent
    pub const fn time_signature(&self) -> (u8, u16) {
        (self.numerator, self.denominator)
    }

    /// Real duration of one tick
    pub const fn micros_per_tick(&self) -> UMicros {
        self.micros_per_tick
    }

    fn effective_tempo(&self) -> i64 {
        i64::from(self.tempo) + i64::from(self.tempo_adjust)
    }

    /// Set the tempo in beats per minute.
    ///
    /// Ignored if `tempo + tempo_adjust` would not be positive.
    pub fn set_tempo(&mut self, tempo: u32) {
        if i64::from(tempo) + i64::from(self.tempo_adjust) > 0 {
            self.tempo = tempo;
        }
        self.recalculate();
    }

    /// Set the tempo adjustment. Returns `false`, keeping the previous
    /// adjustment, if `tempo + delta` would not be positive.
    pub fn set_tempo_adjust(&mut self, delta: i16) -> bool {
        let accepted = i64::from(self.tempo) + i64::from(delta) > 0;
        if accepted {
            self.tempo_adjust = delta;
        }
        self.recalculate();
        accepted
    }

    /// Set the tempo from a set-tempo meta payload.
    ///
    /// A zero payload is ignored.
    pub fn set_micros_per_quarter_note(&mut self, micros: u32) {
        if micros == 0 {
            return;
        }
        self.tempo = MICROS_PER_MINUTE / micros;
        self.recalculate();
    }

    /// Set the resolution of delta times
    pub fn set_ticks_per_quarter_note(&mut self, ticks: u16) {
        self.ticks_per_quarter_note = ticks;
        self.recalculate();
    }

    /// Set the time signature. The denominator is the resolved note value
    /// (4 for a quarter note), not the exponent.
    pub fn set_time_signature(&mut self, numerator: u8, denominator: u16) {
        self.numerator = numerator;
        self.denominator = denominator;
        self.recalculate();
    }

    /// Recompute microseconds per tick. The previous value is kept when the
    /// effective tempo or the resolution is zero.
    fn recalculate(&mut self) {
        let tempo = self.effective_tempo();
        if tempo == 0 || self.ticks_per_quarter_note == 0 {
            return;
        }
        let Ok(tempo) = u64::try_from(tempo) else {
            return;
        };
        let per_beat = u64::from(MICROS_PER_MINUTE) / tempo;
        let per_tick = (per_beat / u64::from(self.ticks_per_quarter_note)).max(1);
        self.micros_per_tick = UMicros::new(per_tick);
        trace!(
            "clock: {} bpm ({:+}) / {} tpqn -> {}",
            self.tempo, self.tempo_adjust, self.ticks_per_quarter_note, self.micros_per_tick
        );
    }
}

impl fmt::Display for PlaybackClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tempo: {} bpm ({:+}), Time division: {}, Microsec/tick: {}, Time signature: {}/{}",
            self.tempo,
            self.tempo_adjust,
            self.ticks_per_quarter_note,
            self.micros_per_tick.us(),
            self.numerator,
            self.denominator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_120_bpm_at_48_tpqn() {
        let clock = PlaybackClock::default();
        assert_eq!(clock.tempo(), 120);
        assert_eq!(clock.time_signature(), (4, 4));
        assert_eq!(clock.micros_per_tick(), UMicros::new(10_416));
    }

    #[test]
    fn tempo_meta_payload_resolves_bpm() {
        let mut clock = PlaybackClock::default();
        clock.set_micros_per_quarter_note(500_000);
        assert_eq!(clock.tempo(), 120);
        assert_eq!(clock.micros_per_tick(), UMicros::new(500_000 / 48));

        clock.set_micros_per_quarter_note(1_000_000);
        assert_eq!(clock.tempo(), 60);
        assert_eq!(clock.micros_per_tick(), UMicros::new(20_833));
    }

    #[test]
    fn zero_payload_is_ignored() {
        let mut clock = PlaybackClock::default();
        clock.set_micros_per_quarter_note(0);
        assert_eq!(clock, PlaybackClock::default());
    }

    #[test]
    fn zero_resolution_keeps_previous_tick_length() {
        let mut clock = PlaybackClock::default();
        clock.set_ticks_per_quarter_note(0);
        assert_eq!(clock.micros_per_tick(), UMicros::new(10_416));
        clock.set_ticks_per_quarter_note(96);
        assert_eq!(clock.micros_per_tick(), UMicros::new(5_208));
    }

    #[test]
    fn tempo_adjust_out_of_range_is_rejected() {
        let mut clock = PlaybackClock::default();
        assert!(clock.set_tempo_adjust(30));
        assert_eq!(clock.micros_per_tick(), UMicros::new(60_000_000 / 150 / 48));

        assert!(!clock.set_tempo_adjust(-120));
        assert_eq!(clock.tempo_adjust(), 30);

        assert!(clock.set_tempo_adjust(-119));
        assert_eq!(clock.micros_per_tick(), UMicros::new(60_000_000 / 48));
    }

    #[test]
    fn set_tempo_respects_adjustment() {
        let mut clock = PlaybackClock::default();
        clock.set_tempo_adjust(-100);
        clock.set_tempo(100);
        assert_eq!(clock.tempo(), 120);
        clock.set_tempo(101);
        assert_eq!(clock.tempo(), 101);
    }
}

use super::MidiPlayer;
use crate::{
    config::SchedulingPolicy,
    file::Advance,
    handler::{MidiHandler, OutputPort},
    message::MidiEvent,
    time::TimeSource,
};
use log::warn;
use std::io::{Read, Seek};

/// Hand `ticks` to the tracks of `player`. Only the first pull from a track in
/// a poll carries the ticks; later pulls carry zero, picking up events that
/// share the same instant.
pub(super) fn dispatch<H, R, T>(player: &mut MidiPlayer<H, R, T>, ticks: u32)
where
    H: MidiHandler,
    R: Read + Seek,
    T: TimeSource,
{
    let cap = player.config.max_events_per_poll;
    match player.config.policy {
        SchedulingPolicy::TrackPriority => {
            for index in 0..player.tracks.len() {
                for n in 0..cap {
                    if !next_track_event(player, index, if n == 0 { ticks } else { 0 }) {
                        break;
                    }
                }
            }
        }
        SchedulingPolicy::EventPriority => {
            for n in 0..cap {
                let mut fired = false;
                for index in 0..player.tracks.len() {
                    fired |= next_track_event(player, index, if n == 0 { ticks } else { 0 });
                }
                if !fired {
                    break;
                }
            }
        }
    }
}

/// Pull at most one event from a track and deliver it. Returns `false` when
/// the track had nothing due.
fn next_track_event<H, R, T>(player: &mut MidiPlayer<H, R, T>, index: usize, ticks: u32) -> bool
where
    H: MidiHandler,
    R: Read + Seek,
    T: TimeSource,
{
    let limits = player.buffer_limits();
    let MidiPlayer {
        reader,
        clock,
        tracks,
        handler,
        config,
        ..
    } = player;
    let Some(track) = tracks.get_mut(index) else {
        return false;
    };

    match track.advance(reader, clock, limits, ticks) {
        Ok(Advance::Idle) => false,
        Ok(Advance::Fired(event)) => {
            if let Some(event) = event {
                deliver(handler, config.output_port, &event);
            }
            true
        }
        Err(e) => {
            warn!("track {index} aborted: {e}");
            false
        }
    }
}

fn deliver<H: MidiHandler>(handler: &mut H, port: OutputPort, event: &MidiEvent) {
    match event {
        MidiEvent::Channel(message) => handler.on_channel(port, message),
        MidiEvent::Sysex(message) => handler.on_sysex(message),
        MidiEvent::Meta(message) => handler.on_meta(message),
    }
}

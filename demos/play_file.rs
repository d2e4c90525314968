//! Play a MIDI file, printing every event as it comes due.
//!
//! ```text
//! RUST_LOG=debug cargo run --example play_file -- song.mid [--loop] [--events]
//! ```

use smfplay::prelude::*;
use std::{process::ExitCode, thread, time::Duration};

struct Print;

impl MidiHandler for Print {
    fn on_channel(&mut self, port: OutputPort, message: &ChannelMessage) {
        println!("port {:>2} {message}", port.0);
    }
    fn on_sysex(&mut self, message: &SysexMessage) {
        println!(
            "sysex   trk {} {:02X?} ({} bytes)",
            message.track(),
            message.data(),
            message.len()
        );
    }
    fn on_meta(&mut self, message: &MetaMessage) {
        match message.text() {
            Some(text) => println!("meta    trk {} {:?} {text}", message.track(), message.kind()),
            None => println!(
                "meta    trk {} {:?} {:02X?}",
                message.track(),
                message.kind(),
                message.data()
            ),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: play_file <file.mid> [--loop] [--events]");
        return ExitCode::FAILURE;
    };
    let mut config = PlayerConfig::default();
    for flag in args {
        match flag.as_str() {
            "--loop" => config = config.with_looping(true),
            "--events" => config = config.with_policy(SchedulingPolicy::EventPriority),
            other => eprintln!("ignoring unknown flag {other}"),
        }
    }

    let mut player = match MidiPlayer::open(&path, config, Print) {
        Ok(player) => player,
        Err(e) => {
            eprintln!("{path}: {e} (status {})", e.code());
            return ExitCode::from(u8::try_from(e.code()).unwrap_or(u8::MAX));
        }
    };

    println!("{}", player.header());
    for track in player.tracks() {
        println!("{track}");
    }
    println!("{}", player.clock());

    while !player.is_eof() {
        player.poll();
        thread::sleep(Duration::from_millis(1));
    }
    player.close();
    ExitCode::SUCCESS
}

mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfplay::prelude::*;

/// An SMPTE-timed file whose single track opens with an SMPTE offset event
fn smpte_file(division_byte: u8, offset: [u8; 5]) -> Vec<u8> {
    let mut body = vec![0xFF, 0x54, 0x05];
    body.extend_from_slice(&offset);
    let track = TrackBuilder::new().event(0, &body).end(0);
    smf(0, u16::from_be_bytes([division_byte, 40]), &[track])
}

fn first_offset(bytes: Vec<u8>) -> Result<SmpteOffset, SmpteError> {
    let clock = ManualClock::new();
    let mut player = player(bytes, PlayerConfig::default(), &clock);
    player.process_ticks(0);
    let recorder = player.close();
    let MidiEvent::Meta(meta) = &recorder.events[0] else {
        panic!("expected a meta event, got {:?}", recorder.events[0]);
    };
    assert_eq!(meta.kind(), MetaType::SmpteOffset);
    meta.smpte_offset().expect("an SMPTE offset event")
}

#[test]
fn reads_offset_for_each_frame_rate() {
    for (division_byte, type_bits, fps) in [
        (0xE8u8, 0u8, SmpteFps::TwentyFour),
        (0xE7, 1, SmpteFps::TwentyFive),
        (0xE3, 2, SmpteFps::TwentyNine),
        (0xE2, 3, SmpteFps::Thirty),
    ] {
        let offset = first_offset(smpte_file(
            division_byte,
            [(type_bits << 5) | 1, 2, 3, 4, 5],
        ))
        .unwrap();

        assert_eq!(
            offset,
            SmpteOffset {
                fps,
                hour: 1,
                minute: 2,
                second: 3,
                frame: 4,
                subframe: 5,
            }
        );
    }
}

#[test]
fn offset_converts_to_micros() {
    let offset = first_offset(smpte_file(0xE7, [1 << 5, 0, 1, 5, 50])).unwrap();
    // 1s + 5 frames + half a frame at 25 fps
    assert_eq!(offset.as_micros(), 1_220_000.0);
}

#[test]
fn bad_offset_is_reported_not_fatal() {
    let bytes = smpte_file(0xE8, [0x18, 0, 0, 0, 0]);
    assert_eq!(first_offset(bytes), Err(SmpteError::HourOffset(24)));

    let bytes = smpte_file(0xE8, [0x00, 0, 0, 0, 100]);
    assert_eq!(first_offset(bytes), Err(SmpteError::Subframe(100)));
}

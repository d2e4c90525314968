mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfplay::prelude::*;

fn one_track() -> Vec<Vec<u8>> {
    vec![TrackBuilder::new().end(0)]
}

#[test]
fn loads_header_and_track_offsets() {
    let first = TrackBuilder::new().tempo(0, 500_000).end(0);
    let second = TrackBuilder::new().note_on(0, 0, 60, 100).end(48);
    let bytes = smf(1, 96, &[first.clone(), second.clone()]);

    let clock = ManualClock::new();
    let player = player(bytes, PlayerConfig::default(), &clock);

    assert_eq!(player.format(), FormatType::Simultaneous);
    assert_eq!(player.track_count(), 2);
    assert_eq!(player.clock().ticks_per_quarter_note(), 96);
    assert_eq!(player.clock().micros_per_tick(), UMicros::new(5208));

    let tracks = player.tracks();
    assert_eq!(tracks[0].start_offset(), 14 + 8);
    assert_eq!(tracks[0].len(), first.len() as u32);
    assert_eq!(
        tracks[1].start_offset(),
        14 + 8 + first.len() as u64 + 8
    );
    assert_eq!(tracks[1].len(), second.len() as u32);
    assert!(tracks.iter().all(|t| !t.is_ended() && t.offset() == 0));
}

#[test]
fn rejects_bad_header_magic() {
    let mut bytes = smf(0, 96, &one_track());
    bytes[..4].copy_from_slice(b"RIFF");
    let err = load_err(bytes, PlayerConfig::default());
    assert_eq!(err.parse(), Some(&ParseError::BadHeaderMagic(*b"RIFF")));
    assert_eq!(err.code(), 3);
}

#[test]
fn rejects_bad_header_length() {
    let mut bytes = smf(0, 96, &one_track());
    bytes[7] = 8;
    let err = load_err(bytes, PlayerConfig::default());
    assert_eq!(err.parse(), Some(&ParseError::BadHeaderLength(8)));
    assert_eq!(err.code(), 4);
}

#[test]
fn rejects_format_two() {
    let err = load_err(smf(2, 96, &one_track()), PlayerConfig::default());
    assert_eq!(err.parse(), Some(&ParseError::UnsupportedFormat(2)));
    assert_eq!(err.code(), 5);
}

#[test]
fn rejects_format_zero_with_several_tracks() {
    let tracks = vec![TrackBuilder::new().end(0), TrackBuilder::new().end(0)];
    let err = load_err(smf(0, 96, &tracks), PlayerConfig::default());
    assert_eq!(err.parse(), Some(&ParseError::FormatTrackMismatch(2)));
    assert_eq!(err.code(), 6);
}

#[test]
fn rejects_too_many_tracks() {
    let tracks = vec![TrackBuilder::new().end(0); 3];
    let err = load_err(
        smf(1, 96, &tracks),
        PlayerConfig::default().with_max_tracks(2),
    );
    assert_eq!(
        err.parse(),
        Some(&ParseError::TooManyTracks { count: 3, max: 2 })
    );
    assert_eq!(err.code(), 7);
}

#[test]
fn rejects_unknown_frame_rate() {
    let err = load_err(smf(0, 0xE0_28, &one_track()), PlayerConfig::default());
    assert_eq!(err.parse(), Some(&ParseError::UnknownFrameRate(0xE0)));
    assert_eq!(err.code(), 7);
}

#[test]
fn smpte_division_sets_resolution() {
    for (byte, fps, tpqn) in [
        (0xE8u8, SmpteFps::TwentyFour, 24 * 40),
        (0xE7, SmpteFps::TwentyFive, 25 * 40),
        (0xE3, SmpteFps::TwentyNine, 29 * 40),
        (0xE2, SmpteFps::Thirty, 30 * 40),
    ] {
        let division = u16::from_be_bytes([byte, 40]);
        let clock = ManualClock::new();
        let player = player(smf(0, division, &one_track()), PlayerConfig::default(), &clock);

        let Timing::Smpte(smpte) = player.header().timing() else {
            panic!("expected SMPTE timing for {byte:#04X}");
        };
        assert_eq!(smpte.fps(), fps);
        assert_eq!(smpte.ticks_per_frame(), 40);
        assert_eq!(player.clock().ticks_per_quarter_note(), tpqn);
    }
}

#[test]
fn rejects_bad_track_magic() {
    let tracks = vec![TrackBuilder::new().end(0), TrackBuilder::new().end(0)];
    let mut bytes = smf(1, 96, &tracks);
    // second chunk tag follows the header and the first chunk
    let second = 14 + 8 + tracks[0].len();
    bytes[second..second + 4].copy_from_slice(b"XTrk");

    let err = load_err(bytes, PlayerConfig::default());
    assert_eq!(
        err.parse(),
        Some(&ParseError::BadTrackMagic {
            track: 1,
            found: *b"XTrk"
        })
    );
    assert_eq!(err.code(), 20);
}

#[test]
fn rejects_track_past_end_of_file() {
    let mut bytes = smf(0, 96, &one_track());
    // declare a longer chunk than the file holds
    bytes[18..22].copy_from_slice(&100u32.to_be_bytes());

    let err = load_err(bytes, PlayerConfig::default());
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::SeekFailed { track: Some(0), .. }
    ));
    assert_eq!(err.code(), 11);
}

#[test]
fn file_ending_inside_track_header_names_the_track() {
    let tracks = vec![TrackBuilder::new().end(0), TrackBuilder::new().end(0)];
    let full = smf(1, 96, &tracks);
    let second = 14 + 8 + tracks[0].len();

    // cut inside the tag, then inside the length
    for cut in [second + 3, second + 6] {
        let err = load_err(full[..cut].to_vec(), PlayerConfig::default());
        assert!(err.is_truncated());
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::TrackTruncated { track: 1 }
        ));
        assert_eq!(err.code(), 20);
    }
}

#[test]
fn truncated_header_is_reported() {
    let bytes = smf(0, 96, &one_track())[..10].to_vec();
    let err = load_err(bytes, PlayerConfig::default());
    assert!(err.is_truncated());
    assert_eq!(err.code(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("smfplay-does-not-exist.mid");
    let Err(err) = MidiPlayer::open(&path, PlayerConfig::default(), ()) else {
        panic!("opening a missing file should fail");
    };
    assert!(matches!(err.error_kind(), ReaderErrorKind::Io(_)));
    assert_eq!(err.code(), 2);
}

#[test]
fn opens_file_from_disk() {
    let path = std::env::temp_dir().join(format!("smfplay-open-{}.mid", std::process::id()));
    std::fs::write(&path, smf(0, 96, &one_track())).unwrap();

    let player = MidiPlayer::open(&path, PlayerConfig::default(), ()).unwrap();
    assert_eq!(player.path(), Some(path.as_path()));
    assert_eq!(player.track_count(), 1);
    player.close();

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn opened_file_plays_from_memory() {
    let path = std::env::temp_dir().join(format!("smfplay-memory-{}.mid", std::process::id()));
    let track = TrackBuilder::new().note_on(0, 0, 60, 100).end(0);
    std::fs::write(&path, smf(0, 96, &[track])).unwrap();

    let mut player = MidiPlayer::open(&path, PlayerConfig::default(), Recorder::default()).unwrap();
    // later changes to the file do not reach a player that is already open
    std::fs::write(&path, b"garbage").unwrap();
    player.process_ticks(0);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(player.handler().channel_bytes(), vec![vec![0x90, 60, 100]]);
    assert!(player.is_eof());
}

#![doc = r#"
The container layout of a Standard MIDI File.

```text
MThd <len:4 = 6> <format:2> <tracks:2> <division:2>
MTrk <len:4> <track events...>
MTrk <len:4> <track events...>
...
```

Loading reads the header and the chunk header of every track, checking that
each chunk fits in the file. Track events are decoded later, during playback.
"#]

mod decode;
pub use decode::*;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

use crate::{
    ParseError,
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind, Width},
};
use log::debug;
use std::io::{Read, Seek};

const HEADER_TAG: &[u8; 4] = b"MThd";
const TRACK_TAG: &[u8; 4] = b"MTrk";
const HEADER_LEN: u32 = 6;

/// Read and validate the `MThd` chunk.
///
/// `max_tracks` bounds the declared track count.
pub fn read_header<R: Read + Seek>(
    reader: &mut Reader<R>,
    max_tracks: usize,
) -> ReadResult<MidiFileHeader> {
    let at = reader.position();
    let magic = reader.read_exact_size::<4>()?;
    if &magic != HEADER_TAG {
        return Err(ReaderError::parse_error(
            at,
            ParseError::BadHeaderMagic(magic),
        ));
    }

    let at = reader.position();
    let len = reader.read_fixed(Width::Long)?;
    if len != HEADER_LEN {
        return Err(ReaderError::parse_error(at, ParseError::BadHeaderLength(len)));
    }

    let at = reader.position();
    let raw_format = reader.read_fixed(Width::Word)? as u16;
    let format = FormatType::try_from(raw_format)
        .map_err(|_| ReaderError::parse_error(at, ParseError::UnsupportedFormat(raw_format)))?;

    let at = reader.position();
    let track_count = reader.read_fixed(Width::Word)? as u16;
    if format == FormatType::SingleMultiChannel && track_count != 1 {
        return Err(ReaderError::parse_error(
            at,
            ParseError::FormatTrackMismatch(track_count),
        ));
    }
    if usize::from(track_count) > max_tracks {
        return Err(ReaderError::parse_error(
            at,
            ParseError::TooManyTracks {
                count: track_count,
                max: max_tracks,
            },
        ));
    }

    let at = reader.position();
    let division = reader.read_fixed(Width::Word)? as u16;
    let timing = Timing::from_division(division).map_err(|e| ReaderError::parse_error(at, e))?;

    let header = MidiFileHeader::new(format, track_count, timing);
    debug!("{header}");
    Ok(header)
}

/// Read the chunk header of each declared track, leaving the events unread.
pub fn read_tracks<R: Read + Seek>(
    reader: &mut Reader<R>,
    header: &MidiFileHeader,
) -> ReadResult<Vec<TrackState>> {
    (0..header.track_count())
        .map(|id| read_track_chunk(reader, id))
        .collect()
}

fn read_track_chunk<R: Read + Seek>(reader: &mut Reader<R>, id: u16) -> ReadResult<TrackState> {
    let in_track = |e: ReaderError| match e.kind {
        ReaderErrorKind::Truncated => ReaderError::new(
            e.position(),
            ReaderErrorKind::TrackTruncated { track: id },
        ),
        _ => e,
    };

    let at = reader.position();
    let found = reader.read_exact_size::<4>().map_err(in_track)?;
    if &found != TRACK_TAG {
        return Err(ReaderError::parse_error(
            at,
            ParseError::BadTrackMagic { track: id, found },
        ));
    }
    let length = reader.read_fixed(Width::Long).map_err(in_track)?;
    let start = reader.position();

    let end = start + u64::from(length);
    reader.seek_to(end).map_err(|e| {
        let position = e.position();
        match e.kind {
            ReaderErrorKind::SeekFailed { offset, len, .. } => ReaderError::new(
                position,
                ReaderErrorKind::SeekFailed {
                    track: Some(id),
                    offset,
                    len,
                },
            ),
            kind => ReaderError::new(position, kind),
        }
    })?;

    let track = TrackState::new(id, start, length);
    debug!("{track}");
    Ok(track)
}

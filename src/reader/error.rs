use crate::ParseError;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a MIDI file from its byte source
"#]
#[derive(Debug, Error)]
#[error("Reading at position {position}, {kind}")]
pub struct ReaderError {
    position: u64,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The underlying medium failed
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// Fewer bytes were available than requested
    #[error("Unexpected end of data")]
    Truncated,
    /// The data ended inside a track chunk header
    #[error("Unexpected end of data in the header of track {track}")]
    TrackTruncated {
        /// The track whose chunk header was cut short
        track: u16,
    },
    /// A seek target lies outside the medium
    #[error("Cannot seek to {offset}, medium is {len} bytes long")]
    SeekFailed {
        /// The track chunk being validated, if any
        track: Option<u16>,
        /// Requested absolute offset
        offset: u64,
        /// Length of the medium
        len: u64,
    },
    /// Parsing errors
    #[error("Parsing {0}")]
    Parse(#[from] ParseError),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: u64, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// Create a new invalid data error
    pub const fn parse_error(position: u64, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Parse(error),
        }
    }

    /// Create a new truncation error
    pub const fn truncated(position: u64) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Truncated,
        }
    }

    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the position where the read error occurred.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// True if the data ran out before a complete value could be read
    pub const fn is_truncated(&self) -> bool {
        matches!(
            self.kind,
            ReaderErrorKind::Truncated | ReaderErrorKind::TrackTruncated { .. }
        )
    }

    /// Returns the parse error, if this is one
    pub fn parse(&self) -> Option<&ParseError> {
        match &self.kind {
            ReaderErrorKind::Parse(e) => Some(e),
            _ => None,
        }
    }

    /// The small integer status a loader reports for this failure.
    ///
    /// Track chunk failures are encoded as `10 * (track + 1)` plus 0 for a bad
    /// or cut-off chunk header and 1 for a chunk that runs past the end of the
    /// medium.
    pub fn code(&self) -> u32 {
        use ParseError::*;
        match &self.kind {
            ReaderErrorKind::Io(_) => 2,
            ReaderErrorKind::Truncated => 3,
            ReaderErrorKind::TrackTruncated { track } => 10 * (u32::from(*track) + 1),
            ReaderErrorKind::SeekFailed { track: Some(t), .. } => 10 * (u32::from(*t) + 1) + 1,
            ReaderErrorKind::SeekFailed { track: None, .. } => 1,
            ReaderErrorKind::Parse(p) => match p {
                BadHeaderMagic(_) => 3,
                BadHeaderLength(_) => 4,
                UnsupportedFormat(_) => 5,
                FormatTrackMismatch(_) => 6,
                TooManyTracks { .. } | UnknownFrameRate(_) => 7,
                BadTrackMagic { track, .. } => 10 * (u32::from(*track) + 1),
                RunningStatusWithoutContext => 8,
            },
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

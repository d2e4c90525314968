#![doc = r#"
The SMPTE offset meta event (`FF 54 05 hr mn se fr ff`).

It names the SMPTE time at which a track is meant to start. The player does
not delay tracks by it; a handler may read it from the meta message.
"#]

use crate::file::SmpteFps;
use thiserror::Error;

/// Errors found while reading an SMPTE offset payload
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// The payload was not five bytes long
    #[error("SMPTE offset must be 5 bytes, got {0}")]
    Length(usize),
    /// The reserved top bit of the rate/hour byte was set
    #[error("Invalid SMPTE offset rate code {0}")]
    TrackFrame(u8),
    /// Hour above 23
    #[error("Invalid SMPTE offset hour {0}")]
    HourOffset(u8),
    /// Minute above 59
    #[error("Invalid SMPTE offset minute {0}")]
    MinuteOffset(u8),
    /// Second above 59
    #[error("Invalid SMPTE offset second {0}")]
    SecondOffset(u8),
    /// Sub-frame above 99
    #[error("Invalid SMPTE offset subframe {0}")]
    Subframe(u8),
}

/// A track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// Rate the frame fields count in
    pub fps: SmpteFps,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// Frame within the second
    pub frame: u8,
    /// Hundredths of a frame (0-99).
    pub subframe: u8,
}

impl SmpteOffset {
    /// Microseconds from zero to this time code at its own frame rate.
    pub fn as_micros(&self) -> f64 {
        let whole_seconds =
            u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second);
        let frames = f64::from(self.frame) + f64::from(self.subframe) / 100.;
        (whole_seconds * 1_000_000) as f64 + frames * 1_000_000. / self.fps.as_f64()
    }

    /// Read the 5-byte payload of an `FF 54` event.
    ///
    /// The first byte packs the rate into bits 5-6 (24, 25, 29.97 or 30 fps)
    /// and the hour into bits 0-4.
    pub fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let &[rate_hour, minute, second, frame, subframe] = data else {
            return Err(SmpteError::Length(data.len()));
        };

        let fps = match (rate_hour >> 5) & 0b11 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            _ => SmpteFps::Thirty,
        };
        if rate_hour & 0x80 != 0 {
            return Err(SmpteError::TrackFrame(rate_hour >> 5));
        }
        let hour = rate_hour & 0b0001_1111;

        match (hour, minute, second, subframe) {
            (24.., ..) => Err(SmpteError::HourOffset(hour)),
            (_, 60.., ..) => Err(SmpteError::MinuteOffset(minute)),
            (_, _, 60.., _) => Err(SmpteError::SecondOffset(second)),
            (.., 100..) => Err(SmpteError::Subframe(subframe)),
            _ => Ok(Self {
                fps,
                hour,
                minute,
                second,
                frame,
                subframe,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_rate_and_fields() {
        let offset = SmpteOffset::parse(&[0x62, 0x0A, 0x14, 0x03, 0x32]).unwrap();
        assert_eq!(
            offset,
            SmpteOffset {
                fps: SmpteFps::Thirty,
                hour: 2,
                minute: 10,
                second: 20,
                frame: 3,
                subframe: 50,
            }
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            SmpteOffset::parse(&[0x1F, 0, 0, 0, 0]),
            Err(SmpteError::HourOffset(31))
        );
        assert_eq!(
            SmpteOffset::parse(&[0x00, 61, 0, 0, 0]),
            Err(SmpteError::MinuteOffset(61))
        );
        assert_eq!(
            SmpteOffset::parse(&[0x00, 0, 60, 0, 0]),
            Err(SmpteError::SecondOffset(60))
        );
        assert_eq!(
            SmpteOffset::parse(&[0x80, 0, 0, 0, 0]),
            Err(SmpteError::TrackFrame(4))
        );
        assert_eq!(SmpteOffset::parse(&[0x20]), Err(SmpteError::Length(1)));
    }

    #[test]
    fn converts_to_micros() {
        let offset = SmpteOffset {
            fps: SmpteFps::TwentyFour,
            hour: 0,
            minute: 1,
            second: 0,
            frame: 12,
            subframe: 0,
        };
        assert_eq!(offset.as_micros(), 60_500_000.);
    }
}

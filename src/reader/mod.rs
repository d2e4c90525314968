#![doc = r#"
A seekable byte cursor over a MIDI file.

Every track decodes through the same [`Reader`], so each track operation
begins by seeking to its own position. Reads never extend past the length of
the medium measured when the reader was created.
"#]

mod error;
pub use error::*;

mod varlen;

use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Width of a big-endian fixed-size integer in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// 1 byte
    Byte = 1,
    /// 2 bytes
    Word = 2,
    /// 3 bytes, used by the set-tempo payload
    Tryte = 3,
    /// 4 bytes
    Long = 4,
}

impl Width {
    /// Number of bytes read for this width
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// A cursor over a seekable byte source
pub struct Reader<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> Reader<R> {
    /// Wrap a byte source, measuring its length and rewinding to the start.
    pub fn new(mut inner: R) -> ReadResult<Self> {
        let len = inner
            .seek(SeekFrom::End(0))
            .map_err(|e| ReaderError::new(0, e.into()))?;
        inner
            .seek(SeekFrom::Start(0))
            .map_err(|e| ReaderError::new(0, e.into()))?;
        Ok(Self {
            inner,
            position: 0,
            len,
        })
    }

    /// The current absolute offset
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// The total length of the medium in bytes
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// True if the medium holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes remaining between the current position and the end of the medium
    pub const fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// Move to an absolute offset. The offset may equal the length of the
    /// medium but not exceed it.
    pub fn seek_to(&mut self, offset: u64) -> ReadResult<()> {
        if offset > self.len {
            return Err(ReaderError::new(
                self.position,
                ReaderErrorKind::SeekFailed {
                    track: None,
                    offset,
                    len: self.len,
                },
            ));
        }
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| ReaderError::new(self.position, e.into()))?;
        self.position = offset;
        Ok(())
    }

    /// Skip `count` bytes without reading them.
    pub fn skip(&mut self, count: u64) -> ReadResult<()> {
        let target = self.position.saturating_add(count);
        if target > self.len {
            return Err(ReaderError::truncated(self.position));
        }
        self.seek_to(target)
    }

    /// Fill `buf` completely or fail with [`ReaderErrorKind::Truncated`]
    pub fn read_into(&mut self, buf: &mut [u8]) -> ReadResult<()> {
        if (buf.len() as u64) > self.remaining() {
            return Err(ReaderError::truncated(self.position));
        }
        self.inner.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                ReaderError::truncated(self.position)
            } else {
                ReaderError::new(self.position, e.into())
            }
        })?;
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Read `n` bytes into a new buffer
    pub fn read_bytes(&mut self, n: usize) -> ReadResult<Vec<u8>> {
        let mut buf = vec![0; n];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `N` bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut buf = [0; N];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read a big-endian unsigned integer of the given width
    pub fn read_fixed(&mut self, width: Width) -> ReadResult<u32> {
        let mut buf = [0u8; 4];
        let n = width.bytes();
        self.read_into(&mut buf[4 - n..])?;
        Ok(u32::from_be_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn reads_fixed_widths_big_endian() {
        let mut reader = Reader::new(Cursor::new(vec![
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x01, 0x02,
        ]))
        .unwrap();
        assert_eq!(reader.read_fixed(Width::Byte).unwrap(), 0x12);
        assert_eq!(reader.read_fixed(Width::Word).unwrap(), 0x3456);
        assert_eq!(reader.read_fixed(Width::Long).unwrap(), 0x789A_BCDE);
        assert_eq!(reader.read_fixed(Width::Tryte).unwrap(), 0xF0_0102);
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn short_read_is_truncated() {
        let mut reader = Reader::new(Cursor::new(vec![0x01, 0x02])).unwrap();
        let err = reader.read_fixed(Width::Tryte).unwrap_err();
        assert!(err.is_truncated());
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn seek_past_end_fails() {
        let mut reader = Reader::new(Cursor::new(vec![0u8; 8])).unwrap();
        reader.seek_to(8).unwrap();
        let err = reader.seek_to(9).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::SeekFailed {
                offset: 9,
                len: 8,
                ..
            }
        ));
    }

    #[test]
    fn seek_then_read() {
        let mut reader = Reader::new(Cursor::new(b"MThdMTrk".to_vec())).unwrap();
        reader.seek_to(4).unwrap();
        assert_eq!(&reader.read_exact_size::<4>().unwrap(), b"MTrk");
        reader.seek_to(0).unwrap();
        assert_eq!(&reader.read_bytes(4).unwrap(), b"MThd");
    }

    #[test]
    fn skip_moves_forward_within_the_medium() {
        let mut reader = Reader::new(Cursor::new(vec![1, 2, 3, 4, 5])).unwrap();
        reader.skip(3).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 4);

        let err = reader.skip(2).unwrap_err();
        assert!(err.is_truncated());
        assert_eq!(err.position(), 4);
    }
}

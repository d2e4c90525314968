use super::{ReadResult, Reader};
use std::io::{Read, Seek};

/// Variable-length quantities in a MIDI file carry at most 28 bits of payload.
const MAX_VARLEN_BYTES: usize = 4;

impl<R: Read + Seek> Reader<R> {
    /// Read a variable-length quantity.
    ///
    /// Each byte contributes its low 7 bits, most significant group first.
    /// Decoding stops at the first byte with a clear top bit, or after four
    /// bytes regardless of the continuation bit.
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let mut value = 0u32;
        for _ in 0..MAX_VARLEN_BYTES {
            let byte = self.read_u8()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                break;
            }
        }
        Ok(value)
    }
}

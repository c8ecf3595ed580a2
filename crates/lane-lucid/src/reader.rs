use crate::endian::Endian;
use crate::error::{LucidError, Result};
use crate::word::Word;

/// Bounds-checked cursor over a capture buffer.
///
/// Every multi-byte read is extracted in host order and corrected to the
/// wire order. Reads past the end of the buffer fail with
/// [`LucidError::Truncated`] and leave the cursor where it was.
#[derive(Debug, Clone)]
pub struct WordReader<'a> {
    buf: &'a [u8],
    offset: usize,
    host: Endian,
}

impl<'a> WordReader<'a> {
    /// Create a reader at the start of `buf` for the native host.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_host(buf, Endian::native())
    }

    /// Create a reader that extracts fields as a host of `host` order would.
    pub fn with_host(buf: &'a [u8], host: Endian) -> Self {
        Self {
            buf,
            offset: 0,
            host,
        }
    }

    /// Current byte offset from the start of the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Host byte order this reader simulates.
    pub fn host(&self) -> Endian {
        self.host
    }

    fn peek_array<const N: usize>(&self) -> Result<[u8; N]> {
        let remaining = self.remaining();
        if remaining < N {
            return Err(LucidError::Truncated {
                offset: self.offset,
                needed: N,
                remaining,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.offset..self.offset + N]);
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.peek_array::<N>()?;
        self.offset += N;
        Ok(bytes)
    }

    /// The raw wire value of the word at the cursor, without moving.
    pub fn peek_u16(&self) -> Result<u16> {
        let bytes = self.peek_array::<2>()?;
        Ok(self.host.correct_u16(self.host.load_u16(bytes)))
    }

    /// Classify the word at the cursor, without moving.
    pub fn classify(&self) -> Result<Word> {
        self.peek_u16().map(Word::classify)
    }

    /// Move forward by `words` 16-bit words.
    pub fn advance(&mut self, words: usize) -> Result<()> {
        let needed = words.saturating_mul(2);
        let remaining = self.remaining();
        if remaining < needed {
            return Err(LucidError::Truncated {
                offset: self.offset,
                needed,
                remaining,
            });
        }
        self.offset += needed;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take_array::<2>()?;
        Ok(self.host.correct_u16(self.host.load_u16(bytes)))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take_array::<4>()?;
        Ok(self.host.correct_u32(self.host.load_u32(bytes)))
    }

    /// Classify the word at the cursor and move past it.
    pub fn read_word(&mut self) -> Result<Word> {
        self.read_u16().map(Word::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Control;

    #[test]
    fn classify_does_not_move() {
        let buf = [0x80, 0x05, 0x00, 0x03];
        let reader = WordReader::new(&buf);
        assert_eq!(reader.classify().unwrap(), Word::Payload(5));
        assert_eq!(reader.classify().unwrap(), Word::Payload(5));
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn advance_moves_two_bytes_per_word() {
        let buf = [0x80, 0x05, 0x00, 0x03, 0xDC, 0xDF];
        let mut reader = WordReader::new(&buf);
        reader.advance(2).unwrap();
        assert_eq!(reader.offset(), 4);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(
            reader.classify().unwrap(),
            Word::Control(Control::FrameStart)
        );
    }

    #[test]
    fn advance_past_end_is_truncated() {
        let buf = [0x00, 0x01, 0x00];
        let mut reader = WordReader::new(&buf);
        let err = reader.advance(2).unwrap_err();
        assert!(matches!(
            err,
            LucidError::Truncated {
                offset: 0,
                needed: 4,
                remaining: 3
            }
        ));
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn word_read_on_single_byte_is_truncated() {
        let buf = [0x80];
        let mut reader = WordReader::new(&buf);
        assert!(reader.classify().unwrap_err().is_truncated());
        assert!(reader.read_word().unwrap_err().is_truncated());
    }

    #[test]
    fn multi_byte_fields_are_big_endian_on_any_host() {
        let buf = [0x01, 0x02, 0x53, 0x9A, 0x1B, 0x00, 0x7F];
        for host in [Endian::Big, Endian::Little] {
            let mut reader = WordReader::with_host(&buf, host);
            assert_eq!(reader.host(), host);
            assert_eq!(reader.read_u16().unwrap(), 0x0102);
            assert_eq!(reader.read_u32().unwrap(), 0x539A_1B00);
            assert_eq!(reader.read_u8().unwrap(), 0x7F);
            assert!(reader.is_at_end());
        }
    }

    #[test]
    fn u32_past_end_is_truncated() {
        let buf = [0x00, 0x00, 0x00];
        let mut reader = WordReader::new(&buf);
        assert!(matches!(
            reader.read_u32(),
            Err(LucidError::Truncated { needed: 4, .. })
        ));
    }
}

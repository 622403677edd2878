use super::buffer::BitBuffer;
use super::error::BitsError;
use super::raw::RawBits;

/// Forward-only reader over a [`BitBuffer`].
///
/// # Examples
/// ```
/// use hdec_core::bits::{BitBuffer, BitCursor};
///
/// let buffer = BitBuffer::from_bytes(vec![0x41, 0x42]);
/// let mut cursor = BitCursor::new(&buffer);
/// assert_eq!(cursor.read_bits(8)?.value(), Some(0x41));
/// assert_eq!(cursor.position(), 8);
/// assert!(cursor.read_bits(9).is_err());
/// assert_eq!(cursor.position(), 8);
/// # Ok::<(), hdec_core::bits::BitsError>(())
/// ```
pub struct BitCursor<'a> {
    buffer: &'a BitBuffer,
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(buffer: &'a BitBuffer) -> Self {
        Self { buffer, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.buffer.bit_len().saturating_sub(self.pos)
    }

    /// Read the next `n` bits MSB first. On shortfall the position is left
    /// untouched.
    pub fn read_bits(&mut self, n: u64) -> Result<RawBits, BitsError> {
        let remaining = self.remaining();
        let width = match usize::try_from(n) {
            Ok(width) if width <= remaining => width,
            _ => {
                return Err(BitsError::InsufficientBits {
                    requested: n,
                    remaining,
                    position: self.pos,
                });
            }
        };

        let mut bytes = vec![0u8; width.div_ceil(8)];
        let pad = bytes.len() * 8 - width;
        for i in 0..width {
            if self.buffer.bit(self.pos + i) == Some(true) {
                let j = pad + i;
                bytes[j / 8] |= 0x80 >> (j % 8);
            }
        }

        self.pos += width;
        Ok(RawBits::from_aligned_bytes(width, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::BitCursor;
    use crate::bits::{BitBuffer, BitsError};

    #[test]
    fn reads_across_byte_boundaries() {
        let buffer = BitBuffer::from_bytes(vec![0x12, 0x34, 0x56]);
        let mut cursor = BitCursor::new(&buffer);
        assert_eq!(cursor.read_bits(4).unwrap().value(), Some(0x1));
        assert_eq!(cursor.read_bits(12).unwrap().value(), Some(0x234));
        assert_eq!(cursor.read_bits(3).unwrap().value(), Some(0b010));
        assert_eq!(cursor.position(), 19);
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn shortfall_reports_and_keeps_position() {
        let buffer = BitBuffer::from_bytes(vec![0xff]);
        let mut cursor = BitCursor::new(&buffer);
        cursor.read_bits(3).unwrap();
        let err = cursor.read_bits(6).unwrap_err();
        assert_eq!(
            err,
            BitsError::InsufficientBits {
                requested: 6,
                remaining: 5,
                position: 3,
            }
        );
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.read_bits(5).unwrap().value(), Some(0x1f));
    }

    #[test]
    fn zero_width_read_succeeds_at_end() {
        let buffer = BitBuffer::from_bytes(vec![0x00]);
        let mut cursor = BitCursor::new(&buffer);
        cursor.seek(8);
        let raw = cursor.read_bits(0).unwrap();
        assert_eq!(raw.width(), 0);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn seek_past_end_has_nothing_remaining() {
        let buffer = BitBuffer::from_bytes(vec![0x00]);
        let mut cursor = BitCursor::new(&buffer);
        cursor.seek(20);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.read_bits(1).is_err());
    }

    #[test]
    fn wide_read_keeps_every_bit() {
        let bytes: Vec<u8> = (1..=10).collect();
        let buffer = BitBuffer::from_bytes(bytes.clone());
        let mut cursor = BitCursor::new(&buffer);
        let raw = cursor.read_bits(80).unwrap();
        assert_eq!(raw.as_bytes(), bytes.as_slice());
        assert_eq!(raw.value(), None);
    }

    #[test]
    fn oversized_request_is_a_shortfall() {
        let buffer = BitBuffer::from_bytes(vec![0x00]);
        let mut cursor = BitCursor::new(&buffer);
        assert!(matches!(
            cursor.read_bits(u64::MAX),
            Err(BitsError::InsufficientBits { .. })
        ));
    }
}

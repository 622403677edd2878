/// Immutable input bits, addressed MSB first (bit 0 is the high bit of the
/// first byte).
///
/// # Examples
/// ```
/// use hdec_core::bits::BitBuffer;
///
/// let buffer = BitBuffer::from_bytes(vec![0x80]);
/// assert_eq!(buffer.bit_len(), 8);
/// assert_eq!(buffer.bit(0), Some(true));
/// assert_eq!(buffer.bit(8), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitBuffer {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bit_len = bytes.len() * 8;
        Self { bytes, bit_len }
    }

    /// Keep only the first `bit_len` bits of `bytes`. A length past the end
    /// of `bytes` is clamped.
    pub fn with_bit_len(bytes: Vec<u8>, bit_len: usize) -> Self {
        let bit_len = bit_len.min(bytes.len() * 8);
        Self { bytes, bit_len }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit(&self, pos: usize) -> Option<bool> {
        if pos >= self.bit_len {
            return None;
        }
        let byte = self.bytes[pos / 8];
        Some((byte >> (7 - pos % 8)) & 1 == 1)
    }
}

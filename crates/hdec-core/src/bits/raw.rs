/// A bit pattern read from the input, with its exact width.
///
/// The pattern is stored as big-endian bytes, right-aligned: when the width is
/// not a multiple of eight the unused high bits of the first byte are zero.
/// Widths above 64 bits are kept intact for rendering; [`RawBits::value`] only
/// answers when the pattern fits in a `u64`.
///
/// # Examples
/// ```
/// use hdec_core::bits::RawBits;
///
/// let raw = RawBits::from_value(12, 0x0ab);
/// assert_eq!(raw.to_hex(), "0ab");
/// assert_eq!(raw.to_bin(), "000010101011");
/// assert_eq!(raw.value(), Some(0xab));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBits {
    width: usize,
    bytes: Vec<u8>,
}

impl RawBits {
    pub(crate) fn from_aligned_bytes(width: usize, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), width.div_ceil(8));
        Self { width, bytes }
    }

    /// Build a pattern of `width` bits holding `value`. Bits of `value` above
    /// `width` are dropped.
    pub fn from_value(width: usize, value: u64) -> Self {
        let len = width.div_ceil(8);
        let mut bytes = vec![0u8; len];
        let be = value.to_be_bytes();
        for (dst, src) in bytes.iter_mut().rev().zip(be.iter().rev()) {
            *dst = *src;
        }
        let pad = len * 8 - width;
        if pad > 0 {
            bytes[0] &= 0xff >> pad;
        }
        Self { width, bytes }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Right-aligned big-endian bytes of the pattern.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Unsigned big-endian value, or `None` when it does not fit in 64 bits.
    pub fn value(&self) -> Option<u64> {
        let significant: Vec<u8> = self
            .bytes
            .iter()
            .copied()
            .skip_while(|byte| *byte == 0)
            .collect();
        if significant.len() > 8 {
            return None;
        }
        Some(
            significant
                .iter()
                .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)),
        )
    }

    /// Lowercase hex digits, zero-padded to `ceil(width / 4)` digits.
    pub fn to_hex(&self) -> String {
        let digits = self.width.div_ceil(4);
        let encoded = hex::encode(&self.bytes);
        encoded[encoded.len() - digits..].to_string()
    }

    /// Binary digits, zero-padded to exactly `width` digits.
    pub fn to_bin(&self) -> String {
        let encoded: String = self.bytes.iter().map(|b| format!("{b:08b}")).collect();
        encoded[encoded.len() - self.width..].to_string()
    }

    /// Unsigned decimal text of the full pattern, whatever its width.
    pub fn to_decimal(&self) -> String {
        match self.value() {
            Some(value) => value.to_string(),
            None => decimal_from_be_bytes(&self.bytes),
        }
    }
}

fn decimal_from_be_bytes(bytes: &[u8]) -> String {
    let mut work = bytes.to_vec();
    let mut digits = Vec::new();
    while work.iter().any(|byte| *byte != 0) {
        let mut rem = 0u16;
        for byte in work.iter_mut() {
            let acc = (rem << 8) | u16::from(*byte);
            *byte = (acc / 10) as u8;
            rem = acc % 10;
        }
        digits.push(b'0' + rem as u8);
    }
    if digits.is_empty() {
        return "0".to_string();
    }
    digits.iter().rev().map(|digit| char::from(*digit)).collect()
}

#[cfg(test)]
mod tests {
    use super::RawBits;

    #[test]
    fn hex_and_bin_keep_leading_zeros() {
        let raw = RawBits::from_value(16, 0x0001);
        assert_eq!(raw.to_hex(), "0001");
        assert_eq!(raw.to_bin(), "0000000000000001");
    }

    #[test]
    fn hex_width_rounds_up_to_nibble() {
        let raw = RawBits::from_value(5, 0b10001);
        assert_eq!(raw.to_hex(), "11");
        assert_eq!(raw.to_bin(), "10001");

        let raw = RawBits::from_value(3, 0b101);
        assert_eq!(raw.to_hex(), "5");
    }

    #[test]
    fn from_value_masks_excess_bits() {
        let raw = RawBits::from_value(4, 0xff);
        assert_eq!(raw.value(), Some(0xf));
        assert_eq!(raw.as_bytes(), &[0x0f]);
    }

    #[test]
    fn zero_width_pattern() {
        let raw = RawBits::from_value(0, 0);
        assert_eq!(raw.value(), Some(0));
        assert_eq!(raw.to_hex(), "");
        assert_eq!(raw.to_bin(), "");
        assert_eq!(raw.to_decimal(), "0");
    }

    #[test]
    fn wide_pattern_value_and_decimal() {
        let mut bytes = vec![0u8; 9];
        bytes[0] = 0x01;
        let raw = RawBits::from_aligned_bytes(72, bytes);
        assert_eq!(raw.value(), None);
        // 2^64
        assert_eq!(raw.to_decimal(), "18446744073709551616");
    }

    #[test]
    fn wide_pattern_with_leading_zero_fits() {
        let mut bytes = vec![0u8; 10];
        bytes[9] = 0x2a;
        let raw = RawBits::from_aligned_bytes(80, bytes);
        assert_eq!(raw.value(), Some(42));
        assert_eq!(raw.to_hex(), "0000000000000000002a");
    }
}

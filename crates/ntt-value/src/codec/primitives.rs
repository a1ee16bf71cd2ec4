//! Primitive encoding/decoding for the value wire format.
//!
//! Implements varints, sign-extended int32, fixed-width little-endian fields
//! and length-delimited payloads.

use crate::error::DecodeError;
use crate::limits::MAX_VARINT_BYTES;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the bytes consumed since `start` (a previous [`position`](Self::position)).
    pub(crate) fn consumed_since(&self, start: usize) -> &'a [u8] {
        &self.data[start..self.pos]
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::Truncated { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::Truncated { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads an unsigned varint (LEB128, at most 10 bytes).
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for _ in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let value = (byte & 0x7F) as u64;

            // The tenth byte may only carry the top bit of a u64
            if shift == 63 && value > 1 {
                return Err(DecodeError::MalformedVarint { context });
            }

            result |= value << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }

        Err(DecodeError::MalformedVarint { context })
    }

    /// Reads an int32 varint. Only the low 32 bits are kept, so both the
    /// sign-extended 10-byte form and a 5-byte form decode to the same value.
    #[inline]
    pub fn read_int32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(self.read_varint(context)? as i32)
    }

    /// Reads a little-endian fixed 64-bit word.
    #[inline]
    pub fn read_fixed64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let bytes = self.read_bytes(8, context)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(word))
    }

    /// Reads a little-endian fixed 32-bit word.
    #[inline]
    pub fn read_fixed32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4, context)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(word))
    }

    /// Reads a little-endian f64. NaN payloads are kept bit for bit.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_fixed64(context)?))
    }

    /// Reads a varint length prefix followed by that many bytes.
    #[inline]
    pub fn read_length_delimited(&mut self, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.read_varint(field)?;
        if len > self.remaining_len() as u64 {
            return Err(DecodeError::Truncated { context: field });
        }
        self.read_bytes(len as usize, field)
    }

    /// Reads a length-prefixed UTF-8 string.
    #[inline]
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let bytes = self.read_length_delimited(field)?;
        std::str::from_utf8(bytes)
            .map(|s| s.to_string())
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads a length-prefixed byte array.
    pub fn read_bytes_prefixed(&mut self, field: &'static str) -> Result<Vec<u8>, DecodeError> {
        Ok(self.read_length_delimited(field)?.to_vec())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes an unsigned varint (LEB128).
    #[inline]
    pub fn write_varint(&mut self, mut value: u64) {
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes an int32 sign-extended to 64 bits, so negative values always
    /// take ten bytes.
    #[inline]
    pub fn write_int32(&mut self, value: i32) {
        self.write_varint(value as i64 as u64);
    }

    /// Writes a little-endian fixed 64-bit word.
    pub fn write_fixed64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian fixed 32-bit word.
    pub fn write_fixed32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian f64.
    pub fn write_f64(&mut self, value: f64) {
        self.write_fixed64(value.to_bits());
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) {
        self.write_bytes_prefixed(s.as_bytes());
    }

    /// Writes a length-prefixed byte array.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }
}

// =============================================================================
// SIZES
// =============================================================================

/// Returns the number of bytes `value` occupies as a varint.
#[inline]
pub fn varint_len(value: u64) -> usize {
    // Each byte carries 7 bits; zero still takes one byte
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Returns the number of bytes a sign-extended int32 occupies.
#[inline]
pub fn int32_len(value: i32) -> usize {
    varint_len(value as i64 as u64)
}

/// Returns the size of a length-prefixed payload of `len` bytes.
#[inline]
pub fn length_delimited_len(len: usize) -> usize {
    varint_len(len as u64) + len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_roundtrip() {
        let test_values = [0u64, 1, 127, 128, 255, 256, 16383, 16384, u64::MAX];

        for v in test_values {
            let mut writer = Writer::new();
            writer.write_varint(v);
            assert_eq!(writer.len(), varint_len(v), "length mismatch for {}", v);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_varint("test").unwrap();
            assert_eq!(v, decoded, "failed for {}", v);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_varint_known_bytes() {
        let mut writer = Writer::new();
        writer.write_varint(300);
        assert_eq!(writer.as_bytes(), &[0xAC, 0x02]);
    }

    #[test]
    fn test_int32_sign_extension() {
        let mut writer = Writer::new();
        writer.write_int32(-1);
        assert_eq!(
            writer.as_bytes(),
            &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
        assert_eq!(int32_len(-1), 10);
        assert_eq!(int32_len(i32::MIN), 10);
        assert_eq!(int32_len(1), 1);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_int32("test").unwrap(), -1);
    }

    #[test]
    fn test_int32_roundtrip() {
        for v in [0i32, 1, -1, 127, -128, i32::MAX, i32::MIN] {
            let mut writer = Writer::new();
            writer.write_int32(v);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_int32("test").unwrap(), v, "failed for {}", v);
        }
    }

    #[test]
    fn test_int32_accepts_five_byte_form() {
        // -1 written as an unsigned 32-bit varint
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_int32("test").unwrap(), -1);
    }

    #[test]
    fn test_string_roundtrip() {
        let test_strings = ["", "hello", "hello world", "unicode: \u{1F600}"];

        for s in test_strings {
            let mut writer = Writer::new();
            writer.write_string(s);
            assert_eq!(writer.len(), length_delimited_len(s.len()));

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_string("test").unwrap();
            assert_eq!(s, decoded);
        }
    }

    #[test]
    fn test_string_invalid_utf8() {
        let mut writer = Writer::new();
        writer.write_bytes_prefixed(&[0xC3, 0x28]);

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_string("text");
        assert_eq!(result, Err(DecodeError::InvalidUtf8 { field: "text" }));
    }

    #[test]
    fn test_f64_roundtrip() {
        let test_values = [0.0, -0.0, 1.0, -1.0, f64::INFINITY, f64::NEG_INFINITY, 3.14159, f64::MIN_POSITIVE];

        for v in test_values {
            let mut writer = Writer::new();
            writer.write_f64(v);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_f64("test").unwrap();
            assert_eq!(v.to_bits(), decoded.to_bits(), "failed for {}", v);
        }
    }

    #[test]
    fn test_f64_nan_bits_preserved() {
        let nan = f64::from_bits(0x7FF8_0000_0000_1234);
        let mut writer = Writer::new();
        writer.write_f64(nan);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_f64("test").unwrap().to_bits(), nan.to_bits());
    }

    #[test]
    fn test_fixed32_roundtrip() {
        let mut writer = Writer::new();
        writer.write_fixed32(0xDEAD_BEEF);
        assert_eq!(writer.as_bytes(), &[0xEF, 0xBE, 0xAD, 0xDE]);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_fixed32("test").unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_varint_too_long() {
        // 11 continuation bytes should fail
        let data = [0x80u8; 11];
        let mut reader = Reader::new(&data);
        let result = reader.read_varint("test");
        assert!(matches!(result, Err(DecodeError::MalformedVarint { .. })));
    }

    #[test]
    fn test_varint_overflow() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02];
        let mut reader = Reader::new(&data);
        let result = reader.read_varint("test");
        assert!(matches!(result, Err(DecodeError::MalformedVarint { .. })));
    }

    #[test]
    fn test_varint_truncated() {
        let data = [0x80u8, 0x80];
        let mut reader = Reader::new(&data);
        let result = reader.read_varint("test");
        assert_eq!(result, Err(DecodeError::Truncated { context: "test" }));
    }

    #[test]
    fn test_length_exceeds_input() {
        let mut writer = Writer::new();
        writer.write_varint(10); // length
        writer.write_bytes(&[0u8; 3]);

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_length_delimited("bytes");
        assert_eq!(result, Err(DecodeError::Truncated { context: "bytes" }));
    }

    #[test]
    fn test_huge_length_prefix() {
        let mut writer = Writer::new();
        writer.write_varint(u64::MAX);

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_length_delimited("bytes");
        assert!(matches!(result, Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        let result = reader.read_bytes(10, "test");
        assert!(matches!(result, Err(DecodeError::Truncated { .. })));
    }
}

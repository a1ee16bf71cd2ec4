//! Bit strings of explicit length.

use std::fmt;
use std::str::FromStr;

use crate::codec::field::UnknownFields;

/// A bit string whose length need not be a multiple of eight.
///
/// Bits are packed most significant first; `nbits` counts the significant
/// bits and the low-order bits of the last byte are padding. The relation
/// between `nbits` and `data` is not enforced here; see
/// [`validate_binary_string`](crate::validate_binary_string).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BinaryString {
    pub(crate) data: Vec<u8>,
    pub(crate) nbits: i32,
    pub(crate) unknown_fields: UnknownFields,
}

impl BinaryString {
    /// Creates a bit string of `nbits` significant bits packed into `data`.
    pub fn new(data: impl Into<Vec<u8>>, nbits: i32) -> Self {
        Self {
            data: data.into(),
            nbits,
            unknown_fields: UnknownFields::default(),
        }
    }

    /// Creates a bit string covering every bit of `data`.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let nbits = i32::try_from(data.len().saturating_mul(8)).unwrap_or(i32::MAX);
        Self::new(data, nbits)
    }

    /// Packs a sequence of bits, first bit into the most significant position.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut data: Vec<u8> = Vec::new();
        let mut count: usize = 0;
        for bit in bits {
            if count % 8 == 0 {
                data.push(0);
            }
            if bit {
                if let Some(last) = data.last_mut() {
                    *last |= 0x80 >> (count % 8);
                }
            }
            count += 1;
        }
        let nbits = i32::try_from(count).unwrap_or(i32::MAX);
        Self::new(data, nbits)
    }

    /// Returns the packed bits.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the number of significant bits.
    pub fn nbits(&self) -> i32 {
        self.nbits
    }

    /// Replaces the packed bits.
    pub fn set_data(&mut self, data: impl Into<Vec<u8>>) {
        self.data = data.into();
    }

    /// Sets the number of significant bits.
    pub fn set_nbits(&mut self, nbits: i32) {
        self.nbits = nbits;
    }

    /// Returns true if there are no significant bits and no data.
    pub fn is_empty(&self) -> bool {
        self.nbits == 0 && self.data.is_empty()
    }

    /// Number of bits that are both significant and backed by data.
    fn available_bits(&self) -> usize {
        let nbits = usize::try_from(self.nbits).unwrap_or(0);
        nbits.min(self.data.len().saturating_mul(8))
    }

    /// Returns bit `index`, or `None` past the significant bits.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.available_bits() {
            return None;
        }
        Some(self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Iterates over the significant bits.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.available_bits()).map(move |i| self.data[i / 8] & (0x80 >> (i % 8)) != 0)
    }
}

/// Formats as a TTCN-3 bitstring literal, e.g. `'10110'B`.
impl fmt::Display for BinaryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("'")?;
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("'B")
    }
}

/// Error returned when parsing a bitstring literal fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bitstring literal {0:?}")]
pub struct ParseBinaryStringError(String);

impl FromStr for BinaryString {
    type Err = ParseBinaryStringError;

    /// Accepts `'0101'B` or a bare run of `0`/`1` digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = match s.strip_prefix('\'') {
            Some(rest) => rest
                .strip_suffix("'B")
                .ok_or_else(|| ParseBinaryStringError(s.to_string()))?,
            None => s,
        };
        let bits = digits
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseBinaryStringError(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BinaryString::from_bits(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_packs_msb_first() {
        let bs = BinaryString::from_bits([true, false, true, true, false]);
        assert_eq!(bs.data(), &[0b1011_0000]);
        assert_eq!(bs.nbits(), 5);

        let bs = BinaryString::from_bits([true; 9]);
        assert_eq!(bs.data(), &[0xFF, 0x80]);
        assert_eq!(bs.nbits(), 9);
    }

    #[test]
    fn test_from_bytes() {
        let bs = BinaryString::from_bytes(vec![0xAB, 0xCD]);
        assert_eq!(bs.nbits(), 16);
        assert_eq!(bs.to_string(), "'1010101111001101'B");
    }

    #[test]
    fn test_bit_access_ignores_padding() {
        let bs = BinaryString::new(vec![0xFF], 5);
        assert_eq!(bs.bits().count(), 5);
        assert_eq!(bs.bit(4), Some(true));
        assert_eq!(bs.bit(5), None);
        assert_eq!(bs.to_string(), "'11111'B");
    }

    #[test]
    fn test_inconsistent_lengths_do_not_panic() {
        let bs = BinaryString::new(vec![0x80], 12);
        assert_eq!(bs.bits().count(), 8);
        assert_eq!(bs.bit(9), None);

        let bs = BinaryString::new(vec![0x80], -4);
        assert_eq!(bs.bits().count(), 0);
    }

    #[test]
    fn test_empty() {
        assert!(BinaryString::default().is_empty());
        assert!(BinaryString::from_bits(std::iter::empty()).is_empty());
        assert_eq!(BinaryString::default().to_string(), "''B");
    }

    #[test]
    fn test_parse() {
        let bs: BinaryString = "'0110'B".parse().unwrap();
        assert_eq!(bs, BinaryString::new(vec![0b0110_0000], 4));
        assert_eq!("101".parse::<BinaryString>().unwrap().nbits(), 3);
        assert!("'012'B".parse::<BinaryString>().is_err());
        assert!("'01'H".parse::<BinaryString>().is_err());
    }
}

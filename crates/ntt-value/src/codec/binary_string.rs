//! Wire encoding for [`BinaryString`]: `data` is field 1 (bytes), `nbits`
//! field 2 (int32). Both are omitted at their defaults.

use crate::codec::field::{Tag, UnknownFields, WireType};
use crate::codec::message::sealed::{DecodeContext, EncodeContext, SizeCache, WireMessage};
use crate::codec::message::Message;
use crate::codec::primitives::{int32_len, length_delimited_len, Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::BinaryString;

/// Returns true if the decoder would read `tag` as `data` or `nbits`.
fn is_known_tag(tag: Tag) -> bool {
    matches!(
        (tag.field_number, tag.wire_type),
        (1, WireType::LengthDelimited) | (2, WireType::Varint)
    )
}

impl WireMessage for BinaryString {
    fn measure(&self, _sizes: &mut SizeCache, _ctx: EncodeContext) -> Result<usize, EncodeError> {
        let mut len = self.unknown_fields.checked_len(Self::NAME, is_known_tag)?;
        if !self.data.is_empty() {
            len += 1 + length_delimited_len(self.data.len());
        }
        if self.nbits != 0 {
            len += 1 + int32_len(self.nbits);
        }
        Ok(len)
    }

    fn encode_fields(&self, writer: &mut Writer, _sizes: &mut SizeCache) {
        if !self.data.is_empty() {
            writer.write_tag(1, WireType::LengthDelimited);
            writer.write_bytes_prefixed(&self.data);
        }
        if self.nbits != 0 {
            writer.write_tag(2, WireType::Varint);
            writer.write_int32(self.nbits);
        }
        self.unknown_fields.encode(writer);
    }

    fn merge_field(
        &mut self,
        tag: Tag,
        reader: &mut Reader<'_>,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => {
                self.data = reader.read_bytes_prefixed("data")?;
            }
            (2, WireType::Varint) => {
                self.nbits = reader.read_int32("nbits")?;
            }
            _ => self.unknown_fields.capture(tag, reader, ctx)?,
        }
        Ok(())
    }
}

impl Message for BinaryString {
    const NAME: &'static str = "ntt.BinaryString";

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

/// Encodes a bit string with default options.
pub fn encode_binary_string(bits: &BinaryString) -> Result<Vec<u8>, EncodeError> {
    bits.encode()
}

/// Decodes a bit string with default options. The `nbits`/`data`
/// relationship is not checked.
pub fn decode_binary_string(buf: &[u8]) -> Result<BinaryString, DecodeError> {
    BinaryString::decode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::field::UnknownField;

    #[test]
    fn test_partial_byte_roundtrip() {
        let bits = BinaryString::new(vec![0xFF], 5);
        let bytes = encode_binary_string(&bits).unwrap();
        assert_eq!(bytes, vec![0x0A, 0x01, 0xFF, 0x10, 0x05]);

        let decoded = decode_binary_string(&bytes).unwrap();
        assert_eq!(decoded.nbits(), 5);
        assert_eq!(decoded.data().len(), 1);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn test_default_encodes_empty() {
        assert!(encode_binary_string(&BinaryString::default()).unwrap().is_empty());
        assert_eq!(decode_binary_string(&[]).unwrap(), BinaryString::default());
    }

    #[test]
    fn test_fields_in_any_order() {
        let decoded = decode_binary_string(&[0x10, 0x03, 0x0A, 0x01, 0xE0]).unwrap();
        assert_eq!(decoded, BinaryString::new(vec![0xE0], 3));

        let decoded = decode_binary_string(&[0x10, 0x03]).unwrap();
        assert!(decoded.data().is_empty());
        assert_eq!(decoded.nbits(), 3);
    }

    #[test]
    fn test_inconsistent_lengths_not_rejected() {
        let bits = BinaryString::new(vec![0x01], 40);
        let decoded = decode_binary_string(&encode_binary_string(&bits).unwrap()).unwrap();
        assert_eq!(decoded, bits);

        let bits = BinaryString::new(Vec::new(), -1);
        let bytes = encode_binary_string(&bits).unwrap();
        assert_eq!(bytes.len(), 11);
        assert_eq!(decode_binary_string(&bytes).unwrap().nbits(), -1);
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let bytes = [0x10, 0x08, 0x1A, 0x02, 0x68, 0x69];
        let decoded = decode_binary_string(&bytes).unwrap();
        assert_eq!(decoded.nbits(), 8);
        assert_eq!(decoded.unknown_fields().iter().next().map(|f| f.payload()), Some(&b"hi"[..]));
        assert_eq!(encode_binary_string(&decoded).unwrap(), bytes);
    }

    #[test]
    fn test_unknown_field_shadowing_nbits_rejected() {
        let mut bits = BinaryString::new(vec![0xFF], 8);
        bits.unknown_fields_mut().push(UnknownField::varint(2, 3));
        assert_eq!(
            encode_binary_string(&bits),
            Err(EncodeError::KnownFieldConflict { message: "ntt.BinaryString", field_number: 2 })
        );

        let mut bits = BinaryString::new(vec![0xFF], 8);
        bits.unknown_fields_mut().push(UnknownField::fixed64(0, 3));
        assert_eq!(
            encode_binary_string(&bits),
            Err(EncodeError::InvalidFieldNumber { field_number: 0 })
        );
    }
}

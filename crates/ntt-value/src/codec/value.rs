//! Wire encoding for [`Value`].
//!
//! Each variant is a field of the `kind` oneof:
//!
//! | Variant      | Field | Wire type        |
//! |--------------|-------|------------------|
//! | ByteSequence | 1     | length-delimited |
//! | Boolean      | 2     | varint           |
//! | Verdict      | 3     | varint (int32)   |
//! | Text         | 4     | length-delimited |
//! | Real         | 5     | fixed64          |
//! | Integer      | 6     | varint (int32)   |
//! | BigNumber    | 7     | length-delimited |
//! | Aggregate    | 8     | nested Composite |

use crate::codec::field::{Tag, UnknownFields, WireType};
use crate::codec::message::sealed::{DecodeContext, EncodeContext, SizeCache, WireMessage};
use crate::codec::message::{encode_nested, measure_nested, merge_nested, Message};
use crate::codec::primitives::{int32_len, length_delimited_len, Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Composite, Kind, KindCase, Value, Verdict};

/// Every `Value` field tag fits in one byte.
const TAG_LEN: usize = 1;

/// Returns true if the decoder would read `tag` as a variant of the oneof.
fn is_known_tag(tag: Tag) -> bool {
    matches!(
        (tag.field_number, tag.wire_type),
        (1 | 4 | 7 | 8, WireType::LengthDelimited) | (2 | 3 | 6, WireType::Varint) | (5, WireType::Fixed64)
    )
}

impl WireMessage for Value {
    fn measure(&self, sizes: &mut SizeCache, ctx: EncodeContext) -> Result<usize, EncodeError> {
        let kind_len = match &self.kind {
            None => 0,
            Some(Kind::ByteSequence(bytes)) if bytes.is_empty() => 0,
            Some(Kind::ByteSequence(bytes)) => TAG_LEN + length_delimited_len(bytes.len()),
            Some(Kind::Boolean(_)) => TAG_LEN + 1,
            Some(Kind::Verdict(verdict)) => TAG_LEN + int32_len(verdict.ordinal()),
            Some(Kind::Text(text)) => TAG_LEN + length_delimited_len(text.len()),
            Some(Kind::Real(_)) => TAG_LEN + 8,
            Some(Kind::Integer(value)) => TAG_LEN + int32_len(*value),
            Some(Kind::BigNumber(literal)) => TAG_LEN + length_delimited_len(literal.len()),
            Some(Kind::Aggregate(composite)) => measure_nested(8, composite, sizes, ctx)?,
        };
        Ok(kind_len + self.unknown_fields.checked_len(Self::NAME, is_known_tag)?)
    }

    fn encode_fields(&self, writer: &mut Writer, sizes: &mut SizeCache) {
        match &self.kind {
            None => {}
            Some(Kind::ByteSequence(bytes)) => {
                // Empty octetstrings are indistinguishable from unset on the wire
                if !bytes.is_empty() {
                    writer.write_tag(1, WireType::LengthDelimited);
                    writer.write_bytes_prefixed(bytes);
                }
            }
            Some(Kind::Boolean(value)) => {
                writer.write_tag(2, WireType::Varint);
                writer.write_varint(*value as u64);
            }
            Some(Kind::Verdict(verdict)) => {
                writer.write_tag(3, WireType::Varint);
                writer.write_int32(verdict.ordinal());
            }
            Some(Kind::Text(text)) => {
                writer.write_tag(4, WireType::LengthDelimited);
                writer.write_string(text);
            }
            Some(Kind::Real(value)) => {
                writer.write_tag(5, WireType::Fixed64);
                writer.write_f64(*value);
            }
            Some(Kind::Integer(value)) => {
                writer.write_tag(6, WireType::Varint);
                writer.write_int32(*value);
            }
            Some(Kind::BigNumber(literal)) => {
                writer.write_tag(7, WireType::LengthDelimited);
                writer.write_string(literal);
            }
            Some(Kind::Aggregate(composite)) => {
                encode_nested(8, composite, writer, sizes);
            }
        }
        self.unknown_fields.encode(writer);
    }

    fn merge_field(
        &mut self,
        tag: Tag,
        reader: &mut Reader<'_>,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let case = KindCase::from_field_number(tag.field_number);
        let kind = match (case, tag.wire_type) {
            (Some(KindCase::ByteSequence), WireType::LengthDelimited) => {
                Kind::ByteSequence(reader.read_bytes_prefixed(KindCase::ByteSequence.name())?)
            }
            (Some(KindCase::Boolean), WireType::Varint) => {
                Kind::Boolean(reader.read_varint(KindCase::Boolean.name())? != 0)
            }
            (Some(KindCase::Verdict), WireType::Varint) => Kind::Verdict(Verdict::from_ordinal(
                reader.read_int32(KindCase::Verdict.name())?,
            )),
            (Some(KindCase::Text), WireType::LengthDelimited) => {
                Kind::Text(reader.read_string(KindCase::Text.name())?)
            }
            (Some(KindCase::Real), WireType::Fixed64) => {
                Kind::Real(reader.read_f64(KindCase::Real.name())?)
            }
            (Some(KindCase::Integer), WireType::Varint) => {
                Kind::Integer(reader.read_int32(KindCase::Integer.name())?)
            }
            (Some(KindCase::BigNumber), WireType::LengthDelimited) => {
                Kind::BigNumber(reader.read_string(KindCase::BigNumber.name())?)
            }
            (Some(KindCase::Aggregate), WireType::LengthDelimited) => {
                // A repeated aggregate field merges into the active one
                if let Some(Kind::Aggregate(composite)) = &mut self.kind {
                    return merge_nested(composite, reader, ctx);
                }
                let mut composite = Composite::new();
                merge_nested(&mut composite, reader, ctx)?;
                Kind::Aggregate(composite)
            }
            _ => return self.unknown_fields.capture(tag, reader, ctx),
        };
        self.kind = Some(kind);
        Ok(())
    }
}

impl Message for Value {
    const NAME: &'static str = "ntt.Value";

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

/// Encodes a value with default options.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, EncodeError> {
    value.encode()
}

/// Decodes a value with default options.
pub fn decode_value(buf: &[u8]) -> Result<Value, DecodeError> {
    Value::decode(buf)
}

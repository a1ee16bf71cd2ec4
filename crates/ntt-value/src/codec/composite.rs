//! Wire encoding for [`Composite`]: `values` is repeated field 1.

use crate::codec::field::{Tag, UnknownFields, WireType};
use crate::codec::message::sealed::{DecodeContext, EncodeContext, SizeCache, WireMessage};
use crate::codec::message::{encode_nested, measure_nested, merge_nested, Message};
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Composite, Value};

impl WireMessage for Composite {
    fn measure(&self, sizes: &mut SizeCache, ctx: EncodeContext) -> Result<usize, EncodeError> {
        let mut len = 0;
        for value in &self.values {
            len += measure_nested(1, value, sizes, ctx)?;
        }
        let is_known = |tag: Tag| tag.field_number == 1 && tag.wire_type == WireType::LengthDelimited;
        Ok(len + self.unknown_fields.checked_len(Self::NAME, is_known)?)
    }

    fn encode_fields(&self, writer: &mut Writer, sizes: &mut SizeCache) {
        for value in &self.values {
            encode_nested(1, value, writer, sizes);
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
                let mut value = Value::new();
                merge_nested(&mut value, reader, ctx)?;
                self.values.push(value);
                Ok(())
            }
            _ => self.unknown_fields.capture(tag, reader, ctx),
        }
    }
}

impl Message for Composite {
    const NAME: &'static str = "ntt.Composite";

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

/// Encodes a composite with default options.
pub fn encode_composite(composite: &Composite) -> Result<Vec<u8>, EncodeError> {
    composite.encode()
}

/// Decodes a composite with default options.
pub fn decode_composite(buf: &[u8]) -> Result<Composite, DecodeError> {
    Composite::decode(buf)
}

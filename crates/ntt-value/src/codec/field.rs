//! Field framing: tags, wire types and unknown-field capture.
//!
//! Fields the reading side does not understand are kept as
//! [`UnknownField`]s holding the exact bytes that followed their tag, so a
//! partially understood message re-encodes them unchanged.

use log::trace;

use crate::codec::message::sealed::DecodeContext;
use crate::codec::primitives::{varint_len, Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_FIELD_NUMBER;

/// Physical encoding shape of a field's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Creates a WireType from the low three bits of a tag.
    pub fn from_u8(v: u8) -> Option<WireType> {
        match v {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

/// A decoded field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self { field_number, wire_type }
    }

    /// Returns the raw varint value of this tag.
    pub fn to_raw(self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type as u64
    }

    /// Returns the number of bytes this tag occupies on the wire.
    pub fn encoded_len(self) -> usize {
        varint_len(self.to_raw())
    }
}

/// Reads the next tag.
///
/// Returns `None` for a zero tag. End-group tags are returned as-is (their
/// field number may be zero); callers decide whether they terminate.
pub(crate) fn read_tag(reader: &mut Reader<'_>) -> Result<Option<Tag>, DecodeError> {
    let raw = reader.read_varint("tag")?;
    if raw == 0 {
        return Ok(None);
    }
    if raw > u32::MAX as u64 {
        return Err(DecodeError::InvalidTag { tag: raw });
    }

    let wire_bits = (raw & 7) as u8;
    let field_number = (raw >> 3) as u32;
    let wire_type =
        WireType::from_u8(wire_bits).ok_or(DecodeError::InvalidWireType { wire_type: wire_bits })?;

    if field_number == 0 && wire_type != WireType::EndGroup {
        return Err(DecodeError::InvalidTag { tag: raw });
    }

    Ok(Some(Tag::new(field_number, wire_type)))
}

impl Writer {
    /// Writes a field tag.
    #[inline]
    pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
        self.write_varint(Tag::new(field_number, wire_type).to_raw());
    }
}

/// A field not recognized by the schema, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownField {
    field_number: u32,
    wire_type: WireType,
    /// Bytes following the tag exactly as read: the varint bytes, the fixed
    /// word, the length prefix plus payload, or a group body with its
    /// end-group tag.
    raw: Vec<u8>,
}

impl UnknownField {
    /// Creates a varint field.
    pub fn varint(field_number: u32, value: u64) -> Self {
        let mut writer = Writer::new();
        writer.write_varint(value);
        Self::from_raw(field_number, WireType::Varint, writer.into_bytes())
    }

    /// Creates a fixed 64-bit field.
    pub fn fixed64(field_number: u32, value: u64) -> Self {
        Self::from_raw(field_number, WireType::Fixed64, value.to_le_bytes().to_vec())
    }

    /// Creates a fixed 32-bit field.
    pub fn fixed32(field_number: u32, value: u32) -> Self {
        Self::from_raw(field_number, WireType::Fixed32, value.to_le_bytes().to_vec())
    }

    /// Creates a length-delimited field.
    pub fn length_delimited(field_number: u32, payload: &[u8]) -> Self {
        let mut writer = Writer::new();
        writer.write_bytes_prefixed(payload);
        Self::from_raw(field_number, WireType::LengthDelimited, writer.into_bytes())
    }

    fn from_raw(field_number: u32, wire_type: WireType, raw: Vec<u8>) -> Self {
        Self { field_number, wire_type, raw }
    }

    /// Returns the field number from the tag.
    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Returns the wire type from the tag.
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Returns the bytes that followed the tag on the wire.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the payload without framing: the content of a length-delimited
    /// field, or the raw bytes for every other wire type.
    pub fn payload(&self) -> &[u8] {
        if self.wire_type == WireType::LengthDelimited {
            let mut reader = Reader::new(&self.raw);
            if let Ok(payload) = reader.read_length_delimited("unknown field") {
                return payload;
            }
        }
        &self.raw
    }

    /// Returns the encoded size of this field including its tag.
    pub fn encoded_len(&self) -> usize {
        Tag::new(self.field_number, self.wire_type).encoded_len() + self.raw.len()
    }

    /// Writes the tag followed by the captured bytes.
    pub fn encode(&self, writer: &mut Writer) {
        writer.write_tag(self.field_number, self.wire_type);
        writer.write_bytes(&self.raw);
    }
}

/// Unknown fields of a message, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    fields: Vec<UnknownField>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Encoding rejects fields that would not decode back as unknown.
    pub fn push(&mut self, field: UnknownField) {
        self.fields.push(field);
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnknownField> {
        self.fields.iter()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns the encoded size of all fields.
    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(UnknownField::encoded_len).sum()
    }

    /// Returns the encoded size of all fields, rejecting any that would not
    /// read back as an unknown field of `message`: field numbers outside
    /// `1..=MAX_FIELD_NUMBER`, and tags `is_known` claims for the schema.
    pub(crate) fn checked_len(
        &self,
        message: &'static str,
        is_known: impl Fn(Tag) -> bool,
    ) -> Result<usize, EncodeError> {
        let mut len = 0;
        for field in &self.fields {
            let field_number = field.field_number;
            if !(1..=MAX_FIELD_NUMBER).contains(&field_number) {
                return Err(EncodeError::InvalidFieldNumber { field_number });
            }
            if is_known(Tag::new(field_number, field.wire_type)) {
                return Err(EncodeError::KnownFieldConflict { message, field_number });
            }
            len += field.encoded_len();
        }
        Ok(len)
    }

    /// Writes all fields in capture order.
    pub fn encode(&self, writer: &mut Writer) {
        for field in &self.fields {
            field.encode(writer);
        }
    }

    /// Reads the payload of an unrecognized field and records it.
    pub(crate) fn capture(
        &mut self,
        tag: Tag,
        reader: &mut Reader<'_>,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let start = reader.position();
        skip_payload(reader, tag, ctx)?;
        let raw = reader.consumed_since(start).to_vec();
        trace!(
            "preserving unknown field {} ({:?}, {} bytes)",
            tag.field_number,
            tag.wire_type,
            raw.len()
        );
        self.fields.push(UnknownField::from_raw(tag.field_number, tag.wire_type, raw));
        Ok(())
    }
}

impl<'a> IntoIterator for &'a UnknownFields {
    type Item = &'a UnknownField;
    type IntoIter = std::slice::Iter<'a, UnknownField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Extend<UnknownField> for UnknownFields {
    fn extend<I: IntoIterator<Item = UnknownField>>(&mut self, iter: I) {
        self.fields.extend(iter);
    }
}

impl FromIterator<UnknownField> for UnknownFields {
    fn from_iter<I: IntoIterator<Item = UnknownField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Advances past the payload of a field with the given tag.
fn skip_payload(reader: &mut Reader<'_>, tag: Tag, ctx: DecodeContext) -> Result<(), DecodeError> {
    match tag.wire_type {
        WireType::Varint => {
            reader.read_varint("unknown varint")?;
        }
        WireType::Fixed64 => {
            reader.read_bytes(8, "unknown fixed64")?;
        }
        WireType::Fixed32 => {
            reader.read_bytes(4, "unknown fixed32")?;
        }
        WireType::LengthDelimited => {
            reader.read_length_delimited("unknown length-delimited")?;
        }
        WireType::StartGroup => {
            let ctx = ctx.enter()?;
            loop {
                if reader.is_empty() {
                    return Err(DecodeError::UnterminatedGroup {
                        field_number: tag.field_number,
                    });
                }
                let inner = read_tag(reader)?.ok_or(DecodeError::InvalidTag { tag: 0 })?;
                if inner.wire_type == WireType::EndGroup {
                    if inner.field_number != tag.field_number {
                        return Err(DecodeError::InvalidTag { tag: inner.to_raw() });
                    }
                    break;
                }
                skip_payload(reader, inner, ctx)?;
            }
        }
        WireType::EndGroup => {
            return Err(DecodeError::InvalidTag { tag: tag.to_raw() });
        }
    }
    Ok(())
}

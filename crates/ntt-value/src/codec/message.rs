//! The [`Message`] trait shared by every encodable type, decode/encode
//! options, and caller-side length-delimited framing.

use std::marker::PhantomData;

use log::debug;

use crate::codec::field::{read_tag, Tag, UnknownFields, WireType};
use crate::codec::primitives::{length_delimited_len, varint_len, Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_MESSAGE_SIZE, MAX_ENCODED_LEN};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth of messages below the top-level one.
    pub max_depth: usize,
    /// Maximum input size in bytes.
    pub max_message_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl DecodeOptions {
    /// Creates options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum input size.
    pub fn max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}

/// Options for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Maximum nesting depth of messages below the top-level one.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Creates options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// =============================================================================
// MESSAGE TRAIT
// =============================================================================

pub(crate) mod sealed {
    use super::*;

    /// Recursion state threaded through decoding.
    #[derive(Debug, Clone, Copy)]
    pub struct DecodeContext {
        depth: usize,
        max_depth: usize,
    }

    impl DecodeContext {
        pub fn new(options: &DecodeOptions) -> Self {
            Self {
                depth: 0,
                max_depth: options.max_depth,
            }
        }

        /// Returns the context for one level deeper.
        pub fn enter(self) -> Result<Self, DecodeError> {
            let depth = self.depth + 1;
            if depth > self.max_depth {
                debug!("rejecting input nested deeper than {}", self.max_depth);
                return Err(DecodeError::DepthExceeded { max: self.max_depth });
            }
            Ok(Self { depth, ..self })
        }
    }

    /// Recursion state threaded through encoding.
    #[derive(Debug, Clone, Copy)]
    pub struct EncodeContext {
        depth: usize,
        max_depth: usize,
    }

    impl EncodeContext {
        pub fn new(options: &EncodeOptions) -> Self {
            Self {
                depth: 0,
                max_depth: options.max_depth,
            }
        }

        /// Returns the context for one level deeper.
        pub fn enter(self) -> Result<Self, EncodeError> {
            let depth = self.depth + 1;
            if depth > self.max_depth {
                return Err(EncodeError::DepthExceeded { max: self.max_depth });
            }
            Ok(Self { depth, ..self })
        }
    }

    /// Sizes of nested messages in the order they are written. The measuring
    /// pass fills it and the writing pass replays it, so every nested size is
    /// computed once.
    #[derive(Debug, Default)]
    pub struct SizeCache {
        sizes: Vec<usize>,
        next: usize,
    }

    impl SizeCache {
        /// Reserves the slot for a nested message about to be measured.
        pub fn reserve(&mut self) -> usize {
            self.sizes.push(0);
            self.sizes.len() - 1
        }

        pub fn fill(&mut self, slot: usize, len: usize) {
            self.sizes[slot] = len;
        }

        /// Returns the size of the next nested message to write.
        pub fn take_next(&mut self) -> usize {
            let len = self.sizes.get(self.next).copied().unwrap_or_default();
            self.next += 1;
            len
        }
    }

    /// Per-type field encoding and dispatch.
    pub trait WireMessage {
        /// Returns the size of every field without a length prefix.
        ///
        /// Enforces the depth bound and the unknown-field rules, and records
        /// the size of each nested message in `sizes`.
        fn measure(&self, sizes: &mut SizeCache, ctx: EncodeContext) -> Result<usize, EncodeError>;

        /// Writes every field (known, then unknown) without a length prefix.
        /// `sizes` must come from a successful [`measure`](Self::measure).
        fn encode_fields(&self, writer: &mut Writer, sizes: &mut SizeCache);

        /// Consumes the payload of one field whose tag was already read.
        fn merge_field(
            &mut self,
            tag: Tag,
            reader: &mut Reader<'_>,
            ctx: DecodeContext,
        ) -> Result<(), DecodeError>;
    }
}

use sealed::{DecodeContext, EncodeContext, SizeCache, WireMessage};

/// A type with a wire representation: [`Value`](crate::Value),
/// [`Composite`](crate::Composite) and [`BinaryString`](crate::BinaryString).
pub trait Message: WireMessage + Default + Sized {
    /// Fully qualified schema name, used in diagnostics.
    const NAME: &'static str;

    /// Returns the fields captured during decoding that the schema does not know.
    fn unknown_fields(&self) -> &UnknownFields;

    /// Mutable access to the unknown fields. Encoding fails with
    /// [`EncodeError::InvalidFieldNumber`] or
    /// [`EncodeError::KnownFieldConflict`] for fields that would not decode
    /// back as unknown.
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;

    /// Returns the encoded size in bytes, failing where
    /// [`encode`](Self::encode) would.
    fn encoded_len(&self) -> Result<usize, EncodeError> {
        self.encoded_len_with_options(&EncodeOptions::default())
    }

    /// Like [`encoded_len`](Self::encoded_len) with explicit options.
    fn encoded_len_with_options(&self, options: &EncodeOptions) -> Result<usize, EncodeError> {
        self.measure(&mut SizeCache::default(), EncodeContext::new(options))
    }

    /// Resets the message to its default state.
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Encodes the message with default options.
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.encode_with_options(&EncodeOptions::default())
    }

    /// Encodes the message.
    fn encode_with_options(&self, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
        let mut sizes = SizeCache::default();
        let len = self.measure(&mut sizes, EncodeContext::new(options))?;
        if len > MAX_ENCODED_LEN {
            return Err(EncodeError::MessageTooLarge {
                len,
                max: MAX_ENCODED_LEN,
            });
        }
        debug!("encoding {} ({} bytes)", Self::NAME, len);

        let mut writer = Writer::with_capacity(len);
        self.encode_fields(&mut writer, &mut sizes);
        debug_assert_eq!(writer.len(), len);
        Ok(writer.into_bytes())
    }

    /// Decodes a message with default options.
    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with_options(buf, &DecodeOptions::default())
    }

    /// Decodes a message into a fresh instance.
    fn decode_with_options(buf: &[u8], options: &DecodeOptions) -> Result<Self, DecodeError> {
        let mut message = Self::default();
        message.merge_with_options(buf, options)?;
        Ok(message)
    }

    /// Decodes `buf` into this instance with protobuf merge semantics: scalar
    /// and oneof fields are replaced, repeated fields are appended, nested
    /// messages are merged. On error the instance may be partially updated;
    /// use [`decode`](Self::decode) for all-or-nothing results.
    fn merge(&mut self, buf: &[u8]) -> Result<(), DecodeError> {
        self.merge_with_options(buf, &DecodeOptions::default())
    }

    /// Like [`merge`](Self::merge) with explicit options.
    fn merge_with_options(&mut self, buf: &[u8], options: &DecodeOptions) -> Result<(), DecodeError> {
        if buf.len() > options.max_message_size {
            debug!(
                "rejecting {} of {} bytes (limit {})",
                Self::NAME,
                buf.len(),
                options.max_message_size
            );
            return Err(DecodeError::LengthExceedsLimit {
                field: "message",
                len: buf.len(),
                max: options.max_message_size,
            });
        }
        debug!("decoding {} ({} bytes)", Self::NAME, buf.len());

        let mut reader = Reader::new(buf);
        merge_fields(self, &mut reader, DecodeContext::new(options))
    }
}

/// Reads fields until the input ends or a zero/end-group tag is seen.
pub(crate) fn merge_fields<M: Message>(
    message: &mut M,
    reader: &mut Reader<'_>,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    while !reader.is_empty() {
        let Some(tag) = read_tag(reader)? else {
            break;
        };
        if tag.wire_type == WireType::EndGroup {
            break;
        }
        message.merge_field(tag, reader, ctx)?;
    }
    Ok(())
}

/// Reads a length-prefixed nested message and merges it into `message`.
pub(crate) fn merge_nested<M: Message>(
    message: &mut M,
    reader: &mut Reader<'_>,
    ctx: DecodeContext,
) -> Result<(), DecodeError> {
    let ctx = ctx.enter()?;
    let bytes = reader.read_length_delimited(M::NAME)?;
    merge_fields(message, &mut Reader::new(bytes), ctx)
}

/// Measures `message` written as a length-delimited field one level deeper.
pub(crate) fn measure_nested<M: Message>(
    field_number: u32,
    message: &M,
    sizes: &mut SizeCache,
    ctx: EncodeContext,
) -> Result<usize, EncodeError> {
    let ctx = ctx.enter()?;
    let slot = sizes.reserve();
    let len = message.measure(sizes, ctx)?;
    sizes.fill(slot, len);
    Ok(Tag::new(field_number, WireType::LengthDelimited).encoded_len() + length_delimited_len(len))
}

/// Writes `message` as a length-delimited field.
pub(crate) fn encode_nested<M: Message>(
    field_number: u32,
    message: &M,
    writer: &mut Writer,
    sizes: &mut SizeCache,
) {
    writer.write_tag(field_number, WireType::LengthDelimited);
    writer.write_varint(sizes.take_next() as u64);
    message.encode_fields(writer, sizes);
}

// =============================================================================
// LENGTH-DELIMITED FRAMING
// =============================================================================

/// Encodes `message` preceded by its length as a varint, for callers that
/// place several messages on one stream.
pub fn encode_length_delimited<M: Message>(message: &M) -> Result<Vec<u8>, EncodeError> {
    let body = message.encode()?;
    let mut writer = Writer::with_capacity(varint_len(body.len() as u64) + body.len());
    writer.write_bytes_prefixed(&body);
    Ok(writer.into_bytes())
}

/// Decodes one length-delimited message from the front of `buf`.
///
/// Returns the message and the number of bytes consumed.
pub fn decode_length_delimited<M: Message>(buf: &[u8]) -> Result<(M, usize), DecodeError> {
    decode_length_delimited_with_options(buf, &DecodeOptions::default())
}

/// Like [`decode_length_delimited`] with explicit options.
pub fn decode_length_delimited_with_options<M: Message>(
    buf: &[u8],
    options: &DecodeOptions,
) -> Result<(M, usize), DecodeError> {
    let mut reader = Reader::new(buf);
    let body = reader.read_length_delimited("length prefix")?;
    let message = M::decode_with_options(body, options)?;
    Ok((message, reader.position()))
}

/// Iterator over consecutive length-delimited messages in a buffer.
///
/// Stops after the first error.
#[derive(Debug, Clone)]
pub struct DelimitedReader<'a, M> {
    reader: Reader<'a>,
    options: DecodeOptions,
    failed: bool,
    _message: PhantomData<M>,
}

impl<'a, M: Message> DelimitedReader<'a, M> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, DecodeOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            reader: Reader::new(buf),
            options,
            failed: false,
            _message: PhantomData,
        }
    }

    /// Returns the offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.reader.position()
    }
}

impl<M: Message> Iterator for DelimitedReader<'_, M> {
    type Item = Result<M, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let result = self
            .reader
            .read_length_delimited("length prefix")
            .and_then(|body| M::decode_with_options(body, &self.options));
        self.failed = result.is_err();
        Some(result)
    }
}

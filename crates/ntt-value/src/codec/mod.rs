//! Binary encoding/decoding for test values.
//!
//! This module implements the protobuf-compatible wire format for `Value`,
//! `Composite` and `BinaryString`.

pub mod binary_string;
pub mod composite;
pub mod field;
pub mod message;
pub mod primitives;
pub mod value;

pub use binary_string::{decode_binary_string, encode_binary_string};
pub use composite::{decode_composite, encode_composite};
pub use field::{Tag, UnknownField, UnknownFields, WireType};
pub use message::{
    decode_length_delimited, decode_length_delimited_with_options, encode_length_delimited,
    DecodeOptions, DelimitedReader, EncodeOptions, Message,
};
pub use primitives::{Reader, Writer};
pub use value::{decode_value, encode_value};

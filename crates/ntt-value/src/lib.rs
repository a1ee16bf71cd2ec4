//! ntt-value: TTCN-3 test values and their binary wire format.
//!
//! This crate provides the value model, encoding, decoding, and validation
//! for the test data exchanged between test runners and their tooling.
//!
//! # Overview
//!
//! A [`Value`] holds at most one of eight variants:
//! - **Primitives**: octetstrings, booleans, verdicts, charstrings, floats
//!   and 32-bit integers
//! - **Big numbers**: integers beyond 32 bits, carried as decimal text
//! - **Aggregates**: ordered, arbitrarily nested lists of values ([`Composite`])
//!
//! Bit strings of explicit length are a separate message, [`BinaryString`].
//!
//! # Quick Start
//!
//! ```rust
//! use ntt_value::{Composite, Message, Value, Verdict};
//! use ntt_value::codec::{decode_value, encode_value};
//!
//! // Build a small report
//! let value = Value::aggregate(Composite::from(vec![
//!     Value::text("TC_attach"),
//!     Value::verdict(Verdict::Pass),
//!     Value::integer(-3),
//! ]));
//!
//! // Encode to binary
//! let bytes = encode_value(&value).unwrap();
//! assert_eq!(bytes.len(), value.encoded_len().unwrap());
//!
//! // Decode back
//! let decoded = decode_value(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(decoded.to_string(), "{ \"TC_attach\", pass, -3 }");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Value, Composite, BinaryString, Verdict)
//! - [`codec`]: Binary encoding/decoding and length-delimited framing
//! - [`validate`]: Semantic validation
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Nesting depth and input size are bounded by configurable limits
//! - Varints are limited to prevent overflow
//! - Invalid data is rejected with descriptive errors
//!
//! # Wire Format
//!
//! Messages use the protobuf wire format, so any protobuf implementation
//! with the `ntt.Value`, `ntt.Composite` and `ntt.BinaryString` schema can
//! read and write them. Fields the schema does not know are kept and
//! written back unchanged.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode_binary_string, decode_composite, decode_value, encode_binary_string, encode_composite,
    encode_value, DecodeOptions, EncodeOptions, Message, UnknownField, UnknownFields,
};
pub use error::{DecodeError, EncodeError, ErrorCode, ValidationError};
pub use model::{BinaryString, Composite, CompositeBuilder, Kind, KindCase, Value, Verdict};
pub use validate::{validate_binary_string, validate_value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

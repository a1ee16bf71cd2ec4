//! Error types for value encoding/decoding and validation.

use thiserror::Error;

/// Broad classification of decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input ended before a varint, fixed-width field or payload was complete.
    Truncated,
    /// Malformed varint, tag or wire type.
    MalformedEncoding,
    /// A text or big-number payload was not UTF-8.
    InvalidUtf8,
    /// A configured depth or size limit was exceeded.
    LimitExceeded,
}

impl ErrorCode {
    /// Returns a short stable name for the category.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Truncated => "truncated",
            ErrorCode::MalformedEncoding => "malformed",
            ErrorCode::InvalidUtf8 => "invalid-utf8",
            ErrorCode::LimitExceeded => "limit-exceeded",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    Truncated { context: &'static str },

    #[error("malformed varint while reading {context}")]
    MalformedVarint { context: &'static str },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("message nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid wire type {wire_type}")]
    InvalidWireType { wire_type: u8 },

    #[error("invalid tag {tag:#x}")]
    InvalidTag { tag: u64 },

    #[error("group for field {field_number} is not terminated")]
    UnterminatedGroup { field_number: u32 },
}

impl DecodeError {
    /// Returns the category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Truncated { .. } | DecodeError::UnterminatedGroup { .. } => {
                ErrorCode::Truncated
            }
            DecodeError::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
            DecodeError::DepthExceeded { .. } | DecodeError::LengthExceedsLimit { .. } => {
                ErrorCode::LimitExceeded
            }
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("message nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("encoded message length {len} exceeds maximum {max}")]
    MessageTooLarge { len: usize, max: usize },

    #[error("unknown field number {field_number} is not a valid field number")]
    InvalidFieldNumber { field_number: u32 },

    #[error("unknown field {field_number} would decode as a known field of {message}")]
    KnownFieldConflict {
        message: &'static str,
        field_number: u32,
    },
}

/// Error during semantic validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("bit count {nbits} is negative")]
    NegativeBitCount { nbits: i32 },

    #[error("bit count {nbits} exceeds the {available} bits of data")]
    BitCountExceedsData { nbits: i32, available: usize },

    #[error("{nbits} bits need {expected} bytes, data holds {actual}")]
    PaddingMismatch {
        nbits: i32,
        expected: usize,
        actual: usize,
    },

    #[error("big number {literal:?} is not a decimal literal")]
    InvalidBigNumber { literal: String },
}

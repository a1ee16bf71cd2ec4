//! Limits applied while encoding and decoding.
//!
//! The schema itself places no bound on nesting or message size; these
//! defaults keep decoding of untrusted input bounded in stack and memory.

/// Maximum number of bytes in a varint (64-bit value).
pub const MAX_VARINT_BYTES: usize = 10;

/// Default maximum nesting depth of messages (every nested `Value`,
/// `Composite` or group counts as one level).
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default maximum size of an input buffer accepted by the decoder (64 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// Largest message the encoder will produce (2 GiB - 1).
pub const MAX_ENCODED_LEN: usize = i32::MAX as usize;

/// Largest field number a tag can carry (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

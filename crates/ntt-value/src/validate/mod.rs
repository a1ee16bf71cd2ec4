//! Semantic validation for test values.
//!
//! This module provides validation beyond structural encoding checks.
//! Structural validation happens during decode; the relationships checked
//! here are not part of the wire format and are only enforced on request.

use crate::error::ValidationError;
use crate::model::{BinaryString, Kind, Value};

/// Validates the bit accounting of a bit string.
///
/// Requires `0 <= nbits <= 8 * len(data)` and `len(data) == ceil(nbits / 8)`,
/// i.e. no byte of data lies wholly in the padding.
pub fn validate_binary_string(bits: &BinaryString) -> Result<(), ValidationError> {
    let nbits = bits.nbits();
    let Ok(count) = usize::try_from(nbits) else {
        return Err(ValidationError::NegativeBitCount { nbits });
    };

    let available = bits.data().len().saturating_mul(8);
    if count > available {
        return Err(ValidationError::BitCountExceedsData { nbits, available });
    }

    let expected = count.div_ceil(8);
    if expected != bits.data().len() {
        return Err(ValidationError::PaddingMismatch {
            nbits,
            expected,
            actual: bits.data().len(),
        });
    }
    Ok(())
}

/// Validates a value and everything nested inside it.
///
/// This checks value-level constraints like:
/// - Big numbers are decimal integer literals (`-?[0-9]+`)
pub fn validate_value(value: &Value) -> Result<(), ValidationError> {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value.kind() {
            Some(Kind::BigNumber(literal)) => validate_big_number(literal)?,
            Some(Kind::Aggregate(composite)) => pending.extend(composite.iter().rev()),
            _ => {}
        }
    }
    Ok(())
}

/// Checks that `literal` is an optionally negative run of decimal digits.
pub fn validate_big_number(literal: &str) -> Result<(), ValidationError> {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidBigNumber {
            literal: literal.to_string(),
        });
    }
    Ok(())
}

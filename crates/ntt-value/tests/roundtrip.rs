//! Property-based round-trip tests using proptest
//!
//! These tests verify that every value survives encode/decode and that the
//! decoder never panics on arbitrary input.

use ntt_value::{
    decode_binary_string, decode_composite, decode_value, encode_binary_string, encode_composite,
    encode_value, BinaryString, Composite, DecodeOptions, Message, Value, Verdict,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn verdict_strategy() -> impl Strategy<Value = Verdict> {
    prop_oneof![
        (0i32..5).prop_map(Verdict::from_ordinal),
        any::<i32>().prop_map(Verdict::from_ordinal),
    ]
}

// Reals are finite so that equality holds; NaN is covered separately
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::new()),
        // Empty octetstrings decode as unset, so keep them non-empty
        prop::collection::vec(any::<u8>(), 1..32).prop_map(Value::bytes),
        any::<bool>().prop_map(Value::boolean),
        verdict_strategy().prop_map(Value::verdict),
        ".{0,24}".prop_map(Value::text),
        prop::num::f64::NORMAL.prop_map(Value::real),
        any::<i32>().prop_map(Value::integer),
        "-?[0-9]{1,40}".prop_map(Value::big_number),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(6, 64, 8, |inner| {
        prop::collection::vec(inner, 0..8)
            .prop_map(|values| Value::aggregate(Composite::from(values)))
    })
}

fn binary_string_strategy() -> impl Strategy<Value = BinaryString> {
    prop::collection::vec(any::<bool>(), 0..64).prop_map(BinaryString::from_bits)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    // Property: decode(encode(v)) == v
    #[test]
    fn test_value_roundtrip(value in value_strategy()) {
        let bytes = encode_value(&value).unwrap();
        prop_assert_eq!(bytes.len(), value.encoded_len().unwrap());
        let decoded = decode_value(&bytes).unwrap();
        prop_assert_eq!(decoded, value);
    }

    // Property: composites keep element order and count
    #[test]
    fn test_composite_roundtrip(values in prop::collection::vec(value_strategy(), 0..6)) {
        let composite = Composite::from(values);
        let decoded = decode_composite(&encode_composite(&composite).unwrap()).unwrap();
        prop_assert_eq!(decoded.len(), composite.len());
        prop_assert_eq!(decoded, composite);
    }

    // Property: bit strings keep data and bit count
    #[test]
    fn test_binary_string_roundtrip(bits in binary_string_strategy()) {
        let decoded = decode_binary_string(&encode_binary_string(&bits).unwrap()).unwrap();
        prop_assert_eq!(decoded.nbits(), bits.nbits());
        prop_assert_eq!(decoded.bits().collect::<Vec<_>>(), bits.bits().collect::<Vec<_>>());
        prop_assert_eq!(decoded, bits);
    }

    // Property: any f64 bit pattern survives, including NaN payloads
    #[test]
    fn test_real_bits_preserved(raw in any::<u64>()) {
        let value = Value::real(f64::from_bits(raw));
        let decoded = decode_value(&encode_value(&value).unwrap()).unwrap();
        prop_assert_eq!(decoded.as_real().map(f64::to_bits), Some(raw));
    }

    // Property: re-encoding decoded bytes is stable
    #[test]
    fn test_reencode_is_stable(value in value_strategy()) {
        let first = encode_value(&value).unwrap();
        let second = encode_value(&decode_value(&first).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    // Property: the decoder returns an error or a value, never panics
    #[test]
    fn test_decode_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let options = DecodeOptions::new().max_depth(16);
        let _ = Value::decode_with_options(&bytes, &options);
        let _ = Composite::decode_with_options(&bytes, &options);
        let _ = BinaryString::decode_with_options(&bytes, &options);
    }

    // Property: whatever decodes also re-encodes to something that decodes equal
    #[test]
    fn test_decoded_garbage_reencodes(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        if let Ok(value) = decode_value(&bytes) {
            let reencoded = encode_value(&value).unwrap();
            let again = decode_value(&reencoded).unwrap();
            prop_assert_eq!(encode_value(&again).unwrap(), reencoded);
        }
    }

    // Property: truncating a non-empty encoding never yields the same value
    #[test]
    fn test_truncation_detected(value in value_strategy()) {
        let bytes = encode_value(&value).unwrap();
        if let Some((_, prefix)) = bytes.split_last() {
            if let Ok(decoded) = decode_value(prefix) {
                prop_assert_ne!(decoded, value);
            }
        }
    }
}

//! Shared output formatting helpers.

use ntt_value::UnknownFields;

/// Print a key-value pair with aligned formatting.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<20} {}", key, value);
}

/// Format a byte array as a hex string.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Print the unknown fields kept on a message, one per line.
pub fn print_unknown_fields(fields: &UnknownFields) {
    for field in fields {
        println!(
            "  unknown field {} ({:?}): {}",
            field.field_number(),
            field.wire_type(),
            hex(field.payload())
        );
    }
}

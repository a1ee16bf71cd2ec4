//! The `Value` tagged union.
//!
//! A value holds at most one variant. Holding no variant ("kind not set") is
//! distinct from holding a zero-valued variant such as `Boolean(false)`.

use std::fmt;

use crate::codec::field::UnknownFields;
use crate::error::EncodeError;
use crate::model::{Composite, Verdict};

/// The active variant of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Raw octet string.
    ByteSequence(Vec<u8>),
    Boolean(bool),
    Verdict(Verdict),
    /// UTF-8 text.
    Text(String),
    /// IEEE 754 double, carried bit for bit.
    Real(f64),
    Integer(i32),
    /// Arbitrary-precision number as decimal text; never parsed by the codec.
    BigNumber(String),
    /// Nested list of values.
    Aggregate(Composite),
}

impl Kind {
    /// Returns the case discriminant of this variant.
    pub fn case(&self) -> KindCase {
        match self {
            Kind::ByteSequence(_) => KindCase::ByteSequence,
            Kind::Boolean(_) => KindCase::Boolean,
            Kind::Verdict(_) => KindCase::Verdict,
            Kind::Text(_) => KindCase::Text,
            Kind::Real(_) => KindCase::Real,
            Kind::Integer(_) => KindCase::Integer,
            Kind::BigNumber(_) => KindCase::BigNumber,
            Kind::Aggregate(_) => KindCase::Aggregate,
        }
    }
}

/// Which variant of a [`Value`] is active. Discriminants equal the wire
/// field numbers; `NotSet` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum KindCase {
    NotSet = 0,
    ByteSequence = 1,
    Boolean = 2,
    Verdict = 3,
    Text = 4,
    Real = 5,
    Integer = 6,
    BigNumber = 7,
    Aggregate = 8,
}

impl KindCase {
    /// Creates a KindCase from a wire field number.
    pub fn from_field_number(field_number: u32) -> Option<KindCase> {
        match field_number {
            1 => Some(KindCase::ByteSequence),
            2 => Some(KindCase::Boolean),
            3 => Some(KindCase::Verdict),
            4 => Some(KindCase::Text),
            5 => Some(KindCase::Real),
            6 => Some(KindCase::Integer),
            7 => Some(KindCase::BigNumber),
            8 => Some(KindCase::Aggregate),
            _ => None,
        }
    }

    /// Returns the wire field number, or `None` for `NotSet`.
    pub fn field_number(self) -> Option<u32> {
        match self {
            KindCase::NotSet => None,
            other => Some(other as u32),
        }
    }

    /// Returns the schema field name.
    pub fn name(self) -> &'static str {
        match self {
            KindCase::NotSet => "kind_not_set",
            KindCase::ByteSequence => "byte_value",
            KindCase::Boolean => "bool_value",
            KindCase::Verdict => "verdict_value",
            KindCase::Text => "string_value",
            KindCase::Real => "float_value",
            KindCase::Integer => "int_value",
            KindCase::BigNumber => "big_value",
            KindCase::Aggregate => "composite_value",
        }
    }
}

/// A test value: one of eight variants, or none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Value {
    pub(crate) kind: Option<Kind>,
    pub(crate) unknown_fields: UnknownFields,
}

impl Value {
    /// Creates a value with no variant set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an octetstring value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Kind::ByteSequence(bytes.into()).into()
    }

    /// Creates a boolean value.
    pub fn boolean(value: bool) -> Self {
        Kind::Boolean(value).into()
    }

    /// Creates a verdict value.
    pub fn verdict(verdict: Verdict) -> Self {
        Kind::Verdict(verdict).into()
    }

    /// Creates a charstring value.
    pub fn text(text: impl Into<String>) -> Self {
        Kind::Text(text.into()).into()
    }

    /// Creates a float value.
    pub fn real(value: f64) -> Self {
        Kind::Real(value).into()
    }

    /// Creates a 32-bit integer value.
    pub fn integer(value: i32) -> Self {
        Kind::Integer(value).into()
    }

    /// Creates a big number from its decimal text. The text is not checked;
    /// see [`validate_value`](crate::validate_value).
    pub fn big_number(literal: impl Into<String>) -> Self {
        Kind::BigNumber(literal.into()).into()
    }

    /// Creates a value holding a nested composite.
    pub fn aggregate(composite: Composite) -> Self {
        Kind::Aggregate(composite).into()
    }

    /// Creates a `Text` value from raw octets, rejecting invalid UTF-8.
    pub fn text_from_utf8(bytes: Vec<u8>) -> Result<Self, EncodeError> {
        String::from_utf8(bytes)
            .map(Value::text)
            .map_err(|_| EncodeError::InvalidUtf8 { field: "string_value" })
    }

    /// Creates a `BigNumber` value from raw octets, rejecting invalid UTF-8.
    pub fn big_number_from_utf8(bytes: Vec<u8>) -> Result<Self, EncodeError> {
        String::from_utf8(bytes)
            .map(Value::big_number)
            .map_err(|_| EncodeError::InvalidUtf8 { field: "big_value" })
    }

    /// Returns the active variant.
    pub fn kind(&self) -> Option<&Kind> {
        self.kind.as_ref()
    }

    /// Mutable access to the active variant.
    pub fn kind_mut(&mut self) -> Option<&mut Kind> {
        self.kind.as_mut()
    }

    /// Returns which variant is active.
    pub fn kind_case(&self) -> KindCase {
        self.kind.as_ref().map_or(KindCase::NotSet, Kind::case)
    }

    /// Returns true if any variant is active.
    pub fn is_set(&self) -> bool {
        self.kind.is_some()
    }

    /// Activates `kind`, returning the variant it replaced.
    pub fn set(&mut self, kind: Kind) -> Option<Kind> {
        self.kind.replace(kind)
    }

    /// Removes and returns the active variant.
    pub fn take_kind(&mut self) -> Option<Kind> {
        self.kind.take()
    }

    /// Deactivates the variant. Unknown fields are kept.
    pub fn clear_kind(&mut self) {
        self.kind = None;
    }

    /// Consumes the value, returning its variant.
    pub fn into_kind(self) -> Option<Kind> {
        self.kind
    }

    /// Returns the octetstring, if that variant is active.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            Some(Kind::ByteSequence(bytes)) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the boolean, if that variant is active.
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            Some(Kind::Boolean(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the verdict, if that variant is active.
    pub fn as_verdict(&self) -> Option<Verdict> {
        match self.kind {
            Some(Kind::Verdict(verdict)) => Some(verdict),
            _ => None,
        }
    }

    /// Returns the charstring, if that variant is active.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            Some(Kind::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the float, if that variant is active.
    pub fn as_real(&self) -> Option<f64> {
        match self.kind {
            Some(Kind::Real(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer, if that variant is active.
    pub fn as_integer(&self) -> Option<i32> {
        match self.kind {
            Some(Kind::Integer(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the big number literal, if that variant is active.
    pub fn as_big_number(&self) -> Option<&str> {
        match &self.kind {
            Some(Kind::BigNumber(literal)) => Some(literal),
            _ => None,
        }
    }

    /// Returns the nested composite, if that variant is active.
    pub fn as_composite(&self) -> Option<&Composite> {
        match &self.kind {
            Some(Kind::Aggregate(composite)) => Some(composite),
            _ => None,
        }
    }

    /// Mutable access to the nested composite.
    pub fn as_composite_mut(&mut self) -> Option<&mut Composite> {
        match &mut self.kind {
            Some(Kind::Aggregate(composite)) => Some(composite),
            _ => None,
        }
    }
}

impl From<Kind> for Value {
    fn from(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            unknown_fields: UnknownFields::default(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::real(value)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::text(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::text(text)
    }
}

impl From<Verdict> for Value {
    fn from(verdict: Verdict) -> Self {
        Value::verdict(verdict)
    }
}

impl From<Composite> for Value {
    fn from(composite: Composite) -> Self {
        Value::aggregate(composite)
    }
}

/// Formats in TTCN-3 notation: `'0AFF'O`, `"text"`, `{ 1, 2 }`; an unset
/// value prints as `omit`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            None => f.write_str("omit"),
            Some(Kind::ByteSequence(bytes)) => {
                f.write_str("'")?;
                for byte in bytes {
                    write!(f, "{:02X}", byte)?;
                }
                f.write_str("'O")
            }
            Some(Kind::Boolean(value)) => write!(f, "{}", value),
            Some(Kind::Verdict(verdict)) => write!(f, "{}", verdict),
            Some(Kind::Text(text)) => write!(f, "\"{}\"", text.replace('"', "\"\"")),
            Some(Kind::Real(value)) => format_real(f, *value),
            Some(Kind::Integer(value)) => write!(f, "{}", value),
            Some(Kind::BigNumber(literal)) => f.write_str(literal),
            Some(Kind::Aggregate(composite)) => write!(f, "{}", composite),
        }
    }
}

fn format_real(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("not_a_number")
    } else if value == f64::INFINITY {
        f.write_str("infinity")
    } else if value == f64::NEG_INFINITY {
        f.write_str("-infinity")
    } else {
        // Debug keeps the fractional part TTCN-3 requires (1.0, not 1)
        write!(f, "{:?}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_set() {
        let value = Value::new();
        assert_eq!(value.kind_case(), KindCase::NotSet);
        assert!(!value.is_set());
        assert_ne!(value, Value::boolean(false));
        assert_ne!(value, Value::integer(0));
    }

    #[test]
    fn test_set_replaces_previous_variant() {
        let mut value = Value::text("first");
        let previous = value.set(Kind::Integer(3));
        assert_eq!(previous, Some(Kind::Text("first".to_string())));
        assert_eq!(value.kind_case(), KindCase::Integer);
        assert_eq!(value.as_text(), None);
        assert_eq!(value.as_integer(), Some(3));
    }

    #[test]
    fn test_take_and_clear() {
        let mut value = Value::boolean(true);
        assert_eq!(value.take_kind(), Some(Kind::Boolean(true)));
        assert_eq!(value.kind_case(), KindCase::NotSet);

        let mut value = Value::real(1.5);
        value.clear_kind();
        assert_eq!(value.as_real(), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::bytes(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(Value::boolean(false).as_bool(), Some(false));
        assert_eq!(Value::verdict(Verdict::Fail).as_verdict(), Some(Verdict::Fail));
        assert_eq!(Value::big_number("1e400").as_big_number(), Some("1e400"));
        assert_eq!(Value::integer(1).as_bool(), None);

        let mut value = Value::aggregate(Composite::new());
        value.as_composite_mut().unwrap().push(Value::integer(1));
        assert_eq!(value.as_composite().map(Composite::len), Some(1));
    }

    #[test]
    fn test_kind_case_field_numbers() {
        assert_eq!(KindCase::NotSet.field_number(), None);
        assert_eq!(KindCase::Aggregate.field_number(), Some(8));
        for n in 1..=8 {
            assert_eq!(KindCase::from_field_number(n).unwrap().field_number(), Some(n));
        }
        assert_eq!(KindCase::from_field_number(9), None);
        assert_eq!(KindCase::Text.name(), "string_value");
    }

    #[test]
    fn test_text_from_utf8() {
        assert_eq!(Value::text_from_utf8(b"ok".to_vec()), Ok(Value::text("ok")));
        assert_eq!(
            Value::text_from_utf8(vec![0xFF, 0xFE]),
            Err(EncodeError::InvalidUtf8 { field: "string_value" })
        );
        assert_eq!(
            Value::big_number_from_utf8(vec![0xC0]),
            Err(EncodeError::InvalidUtf8 { field: "big_value" })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::new().to_string(), "omit");
        assert_eq!(Value::bytes(vec![0x0A, 0xFF]).to_string(), "'0AFF'O");
        assert_eq!(Value::text("say \"hi\"").to_string(), "\"say \"\"hi\"\"\"");
        assert_eq!(Value::real(1.0).to_string(), "1.0");
        assert_eq!(Value::real(f64::NEG_INFINITY).to_string(), "-infinity");
        assert_eq!(Value::verdict(Verdict::Pass).to_string(), "pass");
        assert_eq!(Value::big_number("123456789012345678901234567890").to_string(), "123456789012345678901234567890");

        let nested = Value::aggregate(Composite::from(vec![Value::integer(1), Value::boolean(true)]));
        assert_eq!(nested.to_string(), "{ 1, true }");
    }
}

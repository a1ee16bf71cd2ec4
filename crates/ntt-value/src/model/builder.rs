//! Builder API for ergonomic Composite construction.
//!
//! Provides a fluent interface for building nested aggregates.
//!
//! # Example
//!
//! ```rust
//! use ntt_value::model::builder::CompositeBuilder;
//! use ntt_value::Verdict;
//!
//! let report = CompositeBuilder::new()
//!     .text("TC_attach")
//!     .verdict(Verdict::Pass)
//!     .aggregate(|c| c
//!         .integer(3)
//!         .real(0.25)
//!     )
//!     .build();
//!
//! assert_eq!(report.len(), 3);
//! ```

use crate::model::{Composite, Value, Verdict};

/// Builder for constructing a Composite value by value.
#[derive(Debug, Clone, Default)]
pub struct CompositeBuilder {
    values: Vec<Value>,
}

impl CompositeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    /// Appends an octetstring.
    pub fn bytes(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.value(Value::bytes(bytes))
    }

    /// Appends a boolean.
    pub fn boolean(self, value: bool) -> Self {
        self.value(Value::boolean(value))
    }

    /// Appends a verdict.
    pub fn verdict(self, verdict: Verdict) -> Self {
        self.value(Value::verdict(verdict))
    }

    /// Appends a charstring.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.value(Value::text(text))
    }

    /// Appends a float.
    pub fn real(self, value: f64) -> Self {
        self.value(Value::real(value))
    }

    /// Appends an integer.
    pub fn integer(self, value: i32) -> Self {
        self.value(Value::integer(value))
    }

    /// Appends an integer literal too large for `i32`.
    pub fn big_number(self, literal: impl Into<String>) -> Self {
        self.value(Value::big_number(literal))
    }

    /// Appends a value with no variant set (`omit`).
    pub fn omit(self) -> Self {
        self.value(Value::new())
    }

    // =========================================================================
    // Raw values
    // =========================================================================

    /// Appends a value directly.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Appends multiple values.
    pub fn values(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.values.extend(values);
        self
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    /// Appends a nested aggregate built by `f`.
    pub fn aggregate<F>(self, f: F) -> Self
    where
        F: FnOnce(CompositeBuilder) -> CompositeBuilder,
    {
        let nested = f(CompositeBuilder::new()).build();
        self.value(Value::aggregate(nested))
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Builds the final Composite.
    pub fn build(self) -> Composite {
        Composite::with_values(self.values)
    }

    /// Builds a Value holding the aggregate.
    pub fn build_value(self) -> Value {
        Value::aggregate(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KindCase;

    #[test]
    fn test_builder_basic() {
        let composite = CompositeBuilder::new()
            .integer(1)
            .text("a")
            .boolean(false)
            .bytes(vec![0xAB])
            .build();

        assert_eq!(
            composite.values(),
            &[
                Value::integer(1),
                Value::text("a"),
                Value::boolean(false),
                Value::bytes(vec![0xAB]),
            ]
        );
    }

    #[test]
    fn test_builder_nesting() {
        let value = CompositeBuilder::new()
            .verdict(Verdict::Fail)
            .aggregate(|c| c.real(1.5).aggregate(|c| c.big_number("99999999999")))
            .build_value();

        let outer = value.as_composite().unwrap();
        assert_eq!(outer.len(), 2);
        let inner = outer.get(1).and_then(Value::as_composite).unwrap();
        assert_eq!(inner.get(0), Some(&Value::real(1.5)));
        assert_eq!(inner.get(1).map(Value::kind_case), Some(KindCase::Aggregate));
        assert_eq!(value.to_string(), "{ fail, { 1.5, { 99999999999 } } }");
    }

    #[test]
    fn test_builder_omit_and_raw() {
        let composite = CompositeBuilder::with_capacity(3)
            .omit()
            .value(7)
            .values([Value::text("x")])
            .build();
        assert_eq!(composite.to_string(), "{ omit, 7, \"x\" }");
    }
}

//! Ordered aggregates of values.

use std::fmt;

use crate::codec::field::UnknownFields;
use crate::model::{Kind, Value};

/// An ordered list of values. Order is significant and survives encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composite {
    pub(crate) values: Vec<Value>,
    pub(crate) unknown_fields: UnknownFields,
}

impl Composite {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composite holding `values` in order.
    pub fn with_values(values: Vec<Value>) -> Self {
        Self {
            values,
            unknown_fields: UnknownFields::default(),
        }
    }

    /// Appends a value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterates over the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Returns the values as a slice.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Mutable access to the values.
    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    /// Consumes the composite, returning its values.
    pub fn into_values(mut self) -> Vec<Value> {
        std::mem::take(&mut self.values)
    }
}

impl Drop for Composite {
    fn drop(&mut self) {
        // Unnest aggregates onto a local stack so deep trees drop without recursion
        let mut pending = std::mem::take(&mut self.values);
        while let Some(mut value) = pending.pop() {
            if let Some(Kind::Aggregate(composite)) = &mut value.kind {
                pending.append(&mut composite.values);
            }
        }
    }
}

impl From<Vec<Value>> for Composite {
    fn from(values: Vec<Value>) -> Self {
        Composite::with_values(values)
    }
}

impl FromIterator<Value> for Composite {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Composite::with_values(iter.into_iter().collect())
    }
}

impl Extend<Value> for Composite {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl IntoIterator for Composite {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_values().into_iter()
    }
}

impl<'a> IntoIterator for &'a Composite {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(" }")
    }
}

//! Data model types for test values.
//!
//! This module contains the in-memory representation of TTCN-3 test data:
//! - Values (a tagged union over eight variants)
//! - Composites (ordered aggregates of values)
//! - Bit strings (explicit bit length)
//! - Verdicts (test outcomes)
//! - Builders (ergonomic construction)

pub mod binary_string;
pub mod builder;
pub mod composite;
pub mod value;
pub mod verdict;

pub use binary_string::{BinaryString, ParseBinaryStringError};
pub use builder::CompositeBuilder;
pub use composite::Composite;
pub use value::{Kind, KindCase, Value};
pub use verdict::{ParseVerdictError, Verdict};

//! prost messages for the `ntt` schema and conversion from the native model.

use ntt_value::{Kind, Value};

#[derive(Clone, PartialEq, prost::Message)]
pub struct PbValue {
    #[prost(oneof = "pb_value::Kind", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub kind: Option<pb_value::Kind>,
}

pub mod pb_value {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Kind {
        #[prost(bytes, tag = "1")]
        ByteValue(Vec<u8>),
        #[prost(bool, tag = "2")]
        BoolValue(bool),
        #[prost(int32, tag = "3")]
        VerdictValue(i32),
        #[prost(string, tag = "4")]
        StringValue(String),
        #[prost(double, tag = "5")]
        FloatValue(f64),
        #[prost(int32, tag = "6")]
        IntValue(i32),
        #[prost(string, tag = "7")]
        BigValue(String),
        #[prost(message, tag = "8")]
        CompositeValue(super::PbComposite),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PbComposite {
    #[prost(message, repeated, tag = "1")]
    pub values: Vec<PbValue>,
}

impl From<&Value> for PbValue {
    fn from(value: &Value) -> Self {
        use pb_value::Kind as Pb;
        let kind = value.kind().map(|kind| match kind {
            Kind::ByteSequence(bytes) => Pb::ByteValue(bytes.clone()),
            Kind::Boolean(b) => Pb::BoolValue(*b),
            Kind::Verdict(v) => Pb::VerdictValue(v.ordinal()),
            Kind::Text(s) => Pb::StringValue(s.clone()),
            Kind::Real(r) => Pb::FloatValue(*r),
            Kind::Integer(i) => Pb::IntValue(*i),
            Kind::BigNumber(s) => Pb::BigValue(s.clone()),
            Kind::Aggregate(c) => Pb::CompositeValue(PbComposite {
                values: c.iter().map(PbValue::from).collect(),
            }),
        });
        PbValue { kind }
    }
}

/// Counts the values in a tree, the root included.
pub fn count_values(value: &PbValue) -> usize {
    match &value.kind {
        Some(pb_value::Kind::CompositeValue(c)) => 1 + c.values.iter().map(count_values).sum::<usize>(),
        _ => 1,
    }
}

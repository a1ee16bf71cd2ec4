//! Builds a small test report, frames it as a stream and reads it back.

use ntt_value::codec::{encode_length_delimited, DelimitedReader};
use ntt_value::{CompositeBuilder, Value, Verdict};

fn main() {
    let cases = [
        ("TC_attach", Verdict::Pass, 12),
        ("TC_detach", Verdict::Inconc, 3),
        ("TC_handover", Verdict::Fail, 41),
    ];

    let mut stream = Vec::new();
    for (name, verdict, millis) in cases {
        let record = CompositeBuilder::new()
            .text(name)
            .verdict(verdict)
            .integer(millis)
            .build_value();
        stream.extend(encode_length_delimited(&record).expect("Failed to encode"));
    }
    println!("Stream size: {} bytes", stream.len());

    let mut overall = Verdict::None;
    for record in DelimitedReader::<Value>::new(&stream) {
        let record = record.expect("Failed to decode");
        println!("  {}", record);
        if let Some(verdict) = record
            .as_composite()
            .and_then(|c| c.get(1))
            .and_then(Value::as_verdict)
        {
            overall = overall.overwrite(verdict);
        }
    }
    println!("Overall verdict: {}", overall);
}

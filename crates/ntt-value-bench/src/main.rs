//! Benchmark comparison between ntt-value and prost-generated messages.
//!
//! Encodes and decodes the same synthetic test report with both
//! implementations, checks that the bytes are identical, and prints a
//! throughput report.

use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use ntt_value::{CompositeBuilder, Message, Value, Verdict};
use prost::Message as _;

mod proto;

use proto::{count_values, PbValue};

const DECODE_ITERS: u32 = 100;
const WARMUP_ITERS: u32 = 10;

const VERDICTS: [Verdict; 5] = [
    Verdict::Pass,
    Verdict::Pass,
    Verdict::Inconc,
    Verdict::Fail,
    Verdict::Error,
];

/// Builds one test case record: name, verdict, timing and a parameter block.
fn make_case(index: u32) -> Value {
    let verdict = VERDICTS[index as usize % VERDICTS.len()];
    CompositeBuilder::new()
        .text(format!("TC_module_{}.TC_case_{}", index / 50, index))
        .verdict(verdict)
        .real(index as f64 * 0.125 + 0.5)
        .integer(index as i32 % 7 - 3)
        .boolean(index % 3 == 0)
        .aggregate(|c| {
            c.text("imsi")
                .big_number(format!("{}", 208_930_000_000_000u64 + index as u64))
                .bytes(index.to_be_bytes().to_vec())
                .aggregate(|c| c.integer(index as i32).integer(-(index as i32)))
        })
        .build_value()
}

fn make_report(cases: u32) -> Value {
    CompositeBuilder::with_capacity(cases as usize)
        .values((0..cases).map(make_case))
        .build_value()
}

fn throughput(bytes: usize, time: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / time.as_secs_f64()
}

fn time_avg<T>(iters: u32, mut f: impl FnMut() -> Result<T>) -> Result<(T, Duration)> {
    for _ in 0..WARMUP_ITERS {
        f()?;
    }
    let start = Instant::now();
    let mut last = f()?;
    for _ in 1..iters {
        last = f()?;
    }
    Ok((last, start.elapsed() / iters))
}

fn main() -> Result<()> {
    let cases: u32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid case count {:?}", arg))?,
        None => 2000,
    };

    let build_start = Instant::now();
    let report = make_report(cases);
    let pb_report = PbValue::from(&report);
    println!(
        "Built report with {} cases ({} values) in {:?}",
        cases,
        count_values(&pb_report),
        build_start.elapsed()
    );

    // Encoding
    let (ours, ours_encode) = time_avg(DECODE_ITERS, || Ok(report.encode()?))?;
    let (theirs, theirs_encode) = time_avg(DECODE_ITERS, || Ok(pb_report.encode_to_vec()))?;

    println!("\n=== Encode ===");
    println!(
        "ntt-value: {} bytes in {:?} ({:.2} MB/s)",
        ours.len(),
        ours_encode,
        throughput(ours.len(), ours_encode)
    );
    println!(
        "prost:     {} bytes in {:?} ({:.2} MB/s)",
        theirs.len(),
        theirs_encode,
        throughput(theirs.len(), theirs_encode)
    );

    ensure!(
        ours == theirs,
        "encodings differ ({} vs {} bytes)",
        ours.len(),
        theirs.len()
    );
    println!("Byte-identical: yes");

    // Decoding
    let (decoded, ours_decode) = time_avg(DECODE_ITERS, || Ok(Value::decode(&ours)?))?;
    let (pb_decoded, theirs_decode) = time_avg(DECODE_ITERS, || Ok(PbValue::decode(theirs.as_slice())?))?;

    println!("\n=== Decode (avg of {} iterations) ===", DECODE_ITERS);
    println!("ntt-value: {:?} ({:.2} MB/s)", ours_decode, throughput(ours.len(), ours_decode));
    println!("prost:     {:?} ({:.2} MB/s)", theirs_decode, throughput(theirs.len(), theirs_decode));

    ensure!(decoded == report, "ntt-value decode does not match the input");
    ensure!(pb_decoded == pb_report, "prost decode does not match the input");

    println!("\n=== Summary ===");
    println!("Cases: {}", cases);
    println!("Encoded size: {} bytes ({:.1} KB)", ours.len(), ours.len() as f64 / 1024.0);
    println!(
        "Encode ratio (prost / ntt-value): {:.2}x",
        theirs_encode.as_secs_f64() / ours_encode.as_secs_f64()
    );
    println!(
        "Decode ratio (prost / ntt-value): {:.2}x",
        theirs_decode.as_secs_f64() / ours_decode.as_secs_f64()
    );
    Ok(())
}

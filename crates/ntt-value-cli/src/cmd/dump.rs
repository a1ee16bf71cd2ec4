//! `ntt-value dump` -- Decode a buffer and print it.

use std::fmt::Display;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ntt_value::codec::DelimitedReader;
use ntt_value::{BinaryString, Composite, DecodeOptions, Message, Value};

use super::InputArgs;
use crate::output::{print_kv, print_unknown_fields};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MessageKind {
    Value,
    Composite,
    Bitstring,
}

#[derive(Args)]
pub struct DumpArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Message type of the input
    #[arg(long, value_enum, default_value_t = MessageKind::Value)]
    kind: MessageKind,
}

pub fn run(args: DumpArgs) -> Result<()> {
    let data = args.input.read()?;
    let options = args.input.decode_options();
    print_kv("Input", &args.input.input);
    print_kv("Size", &format!("{} bytes", data.len()));

    let count = match args.kind {
        MessageKind::Value => dump::<Value>(&data, args.input.delimited, options)?,
        MessageKind::Composite => dump::<Composite>(&data, args.input.delimited, options)?,
        MessageKind::Bitstring => dump::<BinaryString>(&data, args.input.delimited, options)?,
    };
    if args.input.delimited {
        print_kv("Messages", &count.to_string());
    }
    Ok(())
}

fn dump<M: Message + Display>(data: &[u8], delimited: bool, options: DecodeOptions) -> Result<usize> {
    if !delimited {
        let message = M::decode_with_options(data, &options)
            .with_context(|| format!("failed to decode {}", M::NAME))?;
        print_message(None, &message);
        return Ok(1);
    }

    let mut reader = DelimitedReader::<M>::with_options(data, options);
    let mut count = 0;
    while let Some(message) = reader.next() {
        let message = message.with_context(|| {
            format!("failed to decode {} #{} before offset {}", M::NAME, count, reader.position())
        })?;
        print_message(Some(count), &message);
        count += 1;
    }
    Ok(count)
}

fn print_message<M: Message + Display>(index: Option<usize>, message: &M) {
    println!();
    match index {
        Some(i) => println!("[{}] {}", i, message),
        None => println!("{}", message),
    }
    print_unknown_fields(message.unknown_fields());
}

//! Subcommand implementations.

pub mod dump;
pub mod verdicts;

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;
use ntt_value::limits::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_MESSAGE_SIZE};
use ntt_value::DecodeOptions;

/// Input selection and decode limits shared by every subcommand.
#[derive(Args)]
pub struct InputArgs {
    /// Input file, or `-` for stdin
    pub input: String,

    /// Read a stream of length-prefixed messages
    #[arg(long)]
    pub delimited: bool,

    /// Maximum message nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum message size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    pub max_size: usize,
}

impl InputArgs {
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::new()
            .max_depth(self.max_depth)
            .max_message_size(self.max_size)
    }

    /// Reads the whole input into memory.
    pub fn read(&self) -> Result<Vec<u8>> {
        let data = if self.input == "-" {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        } else {
            fs::read(&self.input).with_context(|| format!("failed to read {}", self.input))?
        };
        log::info!("read {} bytes from {}", data.len(), self.input);
        Ok(data)
    }
}

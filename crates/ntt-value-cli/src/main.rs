//! ntt-value CLI - inspect encoded test values
//!
//! ## Commands
//!
//! - `ntt-value dump <FILE>` - Decode and print a value, composite or bitstring
//! - `ntt-value verdicts <FILE>` - Tally the verdicts inside a value tree

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::process;

mod cmd;
mod output;

#[derive(Parser)]
#[command(name = "ntt-value", version, about = "Inspect encoded TTCN-3 test values")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a buffer and print it in TTCN-3 notation
    Dump(cmd::dump::DumpArgs),
    /// Count the verdicts in a value tree
    Verdicts(cmd::verdicts::VerdictsArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Dump(args) => cmd::dump::run(args),
        Commands::Verdicts(args) => cmd::verdicts::run(args),
    };
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

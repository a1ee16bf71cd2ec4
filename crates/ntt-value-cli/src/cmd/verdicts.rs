//! `ntt-value verdicts` -- Count the verdicts in a value tree.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use ntt_value::codec::DelimitedReader;
use ntt_value::{Kind, Message, Value, Verdict};

use super::InputArgs;
use crate::output::print_kv;

#[derive(Args)]
pub struct VerdictsArgs {
    #[command(flatten)]
    input: InputArgs,
}

/// Verdict counts keyed by ordinal, plus the overall verdict.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<i32, usize>,
    overall: Verdict,
}

impl Tally {
    /// Adds every verdict found in `value`, descending into aggregates.
    pub fn add(&mut self, value: &Value) {
        match value.kind() {
            Some(Kind::Verdict(verdict)) => {
                *self.counts.entry(verdict.ordinal()).or_default() += 1;
                self.overall = self.overall.overwrite(*verdict);
            }
            Some(Kind::Aggregate(composite)) => {
                for child in composite {
                    self.add(child);
                }
            }
            _ => {}
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

pub fn run(args: VerdictsArgs) -> Result<()> {
    let data = args.input.read()?;
    let options = args.input.decode_options();

    let mut tally = Tally::default();
    if args.input.delimited {
        for (i, value) in DelimitedReader::<Value>::with_options(&data, options).enumerate() {
            let value = value.with_context(|| format!("failed to decode value #{}", i))?;
            tally.add(&value);
        }
    } else {
        let value = Value::decode_with_options(&data, &options).context("failed to decode value")?;
        tally.add(&value);
    }

    for (ordinal, count) in &tally.counts {
        print_kv(&Verdict::from_ordinal(*ordinal).to_string(), &count.to_string());
    }
    print_kv("total", &tally.total().to_string());
    print_kv("overall", &tally.overall.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntt_value::CompositeBuilder;

    #[test]
    fn test_tally_walks_aggregates() {
        let value = CompositeBuilder::new()
            .verdict(Verdict::Pass)
            .text("ignored")
            .aggregate(|c| c.verdict(Verdict::Fail).verdict(Verdict::Pass))
            .aggregate(|c| c.aggregate(|c| c.verdict(Verdict::Unknown(9))))
            .build_value();

        let mut tally = Tally::default();
        tally.add(&value);
        assert_eq!(tally.counts.get(&1), Some(&2));
        assert_eq!(tally.counts.get(&3), Some(&1));
        assert_eq!(tally.counts.get(&9), Some(&1));
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.overall, Verdict::Unknown(9));
    }

    #[test]
    fn test_tally_empty() {
        let mut tally = Tally::default();
        tally.add(&Value::integer(1));
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.overall, Verdict::None);
    }
}

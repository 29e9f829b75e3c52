//! `stats` - summary statistics over a list of numbers.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Serialize;

use super::VERSION;
use crate::console::Console;
use crate::pipeline::{Executor, Identity, StandardOptions};

/// Count, min, max and mean of numbers given inline or one per line in a file
#[derive(Debug, Clone, Parser, Serialize)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct StatsOptions {
    #[command(flatten)]
    pub standard: StandardOptions,

    /// Read additional values from FILE, one per line (blank lines and `#` comments skipped)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Values to summarize
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Summary {
    /// `None` for an empty input.
    pub fn of(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        let (min, max, sum) = rest
            .iter()
            .fold((first, first, first), |(min, max, sum), &v| {
                (min.min(v), max.max(v), sum + v)
            });
        Some(Self {
            count: values.len(),
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }
}

pub struct StatsExecutor;

impl StatsExecutor {
    fn collect(options: &StatsOptions) -> anyhow::Result<Vec<f64>> {
        let mut values = options.values.clone();
        if let Some(path) = &options.file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read values from {}", path.display()))?;
            for (index, line) in content.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let value = line.parse::<f64>().with_context(|| {
                    format!("{}:{}: '{}' is not a number", path.display(), index + 1, line)
                })?;
                values.push(value);
            }
        }
        Ok(values)
    }
}

impl Executor for StatsExecutor {
    type Options = StatsOptions;

    fn identity() -> Identity {
        Identity::new("cmdhub-stats").with_version(VERSION)
    }

    fn exec(&mut self, options: &StatsOptions, console: &mut Console<'_>) -> anyhow::Result<()> {
        let values = Self::collect(options)?;
        let Some(summary) = Summary::of(&values) else {
            bail!("no values to summarize");
        };

        if options.json {
            console.out_line(serde_json::to_string_pretty(&summary)?);
        } else {
            console.out_line(format_args!("count: {}", summary.count));
            console.out_line(format_args!("min:   {}", summary.min));
            console.out_line(format_args!("max:   {}", summary.max));
            console.out_line(format_args!("mean:  {}", summary.mean));
        }
        Ok(())
    }
}

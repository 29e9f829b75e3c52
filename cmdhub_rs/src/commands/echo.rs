//! `echo` - print the given words.

use clap::Parser;
use serde::Serialize;

use super::VERSION;
use crate::console::Console;
use crate::pipeline::{Executor, Identity, StandardOptions};

/// Print the given words separated by single spaces
#[derive(Debug, Clone, Parser, Serialize)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct EchoOptions {
    #[command(flatten)]
    pub standard: StandardOptions,

    /// Do not print the trailing newline
    #[arg(short = 'n', long = "no-newline")]
    pub no_newline: bool,

    /// Print in upper case
    #[arg(short = 'u', long = "upper")]
    pub upper: bool,

    /// Words to print
    pub words: Vec<String>,
}

pub struct EchoExecutor;

impl Executor for EchoExecutor {
    type Options = EchoOptions;

    fn identity() -> Identity {
        Identity::new("cmdhub-echo").with_version(VERSION)
    }

    fn exec(&mut self, options: &EchoOptions, console: &mut Console<'_>) -> anyhow::Result<()> {
        let mut text = options.words.join(" ");
        if options.upper {
            text = text.to_uppercase();
        }
        if options.no_newline {
            console.out_text(&text);
        } else {
            console.out_line(text);
        }
        Ok(())
    }
}

//! [`OptionsParser`] backed by a clap derive type.
//!
//! The options type must flatten [`StandardOptions`](crate::pipeline::StandardOptions)
//! and switch off clap's built-in flags, otherwise `--help` and `--version`
//! are claimed twice:
//!
//! ```ignore
//! #[derive(clap::Parser, serde::Serialize)]
//! #[command(disable_help_flag = true, disable_version_flag = true)]
//! struct StatsOptions {
//!     #[command(flatten)]
//!     standard: StandardOptions,
//!     values: Vec<f64>,
//! }
//! ```

use std::marker::PhantomData;

use clap::{CommandFactory, Parser};

use crate::error::ParseError;
use crate::pipeline::OptionsParser;

pub struct ClapParser<T> {
    bin_name: String,
    _options: PhantomData<fn() -> T>,
}

impl<T: Parser> ClapParser<T> {
    /// `bin_name` is what usage lines and errors call the command,
    /// e.g. `cmdhub stats`.
    pub fn new(bin_name: impl Into<String>) -> Self {
        Self {
            bin_name: bin_name.into(),
            _options: PhantomData,
        }
    }
}

impl<T: Parser> OptionsParser for ClapParser<T> {
    type Options = T;

    fn parse(&mut self, args: &[String]) -> Result<T, ParseError> {
        let argv = std::iter::once(self.bin_name.as_str()).chain(args.iter().map(String::as_str));
        Ok(T::try_parse_from(argv)?)
    }

    fn help(&self) -> String {
        let mut command = T::command().bin_name(self.bin_name.clone());
        command.render_help().to_string()
    }
}

//! Per-command execution protocol.
//!
//! Every command built from an [`OptionsPipeline`] behaves the same way
//! around its domain logic:
//!
//! ```text
//! args ─► parse ──err──► stderr: message                       exit -1
//!           │
//!           ▼
//!     standard options
//!           ├─ help ────► stdout: parser help                  exit 0
//!           ├─ version ─► stdout: executor identity            exit 0
//!           ▼
//!        execute ──err──► stderr: message (verbose: + causes)  exit -1
//!           │
//!           ▼                                                  exit 0
//! ```
//!
//! Parsers and executors are created fresh for every invocation, so a
//! pipeline holds no mutable state of its own.

use std::any::type_name;
use std::fmt;
use std::time::Instant;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Handler;
use crate::console::Console;
use crate::error::ParseError;

/// The cross-cutting flags every command understands.
///
/// Flatten this into a clap options struct (`#[command(flatten)]`) and
/// disable clap's own help/version flags on that struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args, Serialize)]
pub struct StandardOptions {
    /// Print help
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Print version
    #[arg(long = "version")]
    pub version: bool,

    /// Dump parsed options, report timing and full error causes on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Turns raw arguments into a command's typed options.
pub trait OptionsParser {
    type Options;

    fn parse(&mut self, args: &[String]) -> Result<Self::Options, ParseError>;

    fn help(&self) -> String;
}

/// Performs a command's domain action.
pub trait Executor {
    type Options;

    /// Name and version reported for `--version`.
    fn identity() -> Identity
    where
        Self: Sized,
    {
        Identity::of::<Self>()
    }

    fn exec(&mut self, options: &Self::Options, console: &mut Console<'_>) -> anyhow::Result<()>;
}

/// What an executor reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub version: Option<String>,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Identity derived from a type's name, without a version.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(short_type_name(type_name::<T>()))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {}", self.name, version),
            None => write!(f, "{} (unknown version)", self.name),
        }
    }
}

/// `my_crate::cmd::Stats<u8>` -> `Stats`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;
type Projection<O> = Box<dyn Fn(&O) -> StandardOptions + Send + Sync>;

/// A command assembled from a parser factory, an executor factory and a
/// projection onto the standard options.
pub struct OptionsPipeline<P: OptionsParser, E> {
    new_parser: Factory<P>,
    new_executor: Factory<E>,
    standard: Projection<P::Options>,
}

impl<P, E> OptionsPipeline<P, E>
where
    P: OptionsParser,
    P::Options: Serialize,
    E: Executor<Options = P::Options>,
{
    pub fn new(
        new_parser: impl Fn() -> P + Send + Sync + 'static,
        new_executor: impl Fn() -> E + Send + Sync + 'static,
        standard: impl Fn(&P::Options) -> StandardOptions + Send + Sync + 'static,
    ) -> Self {
        Self {
            new_parser: Box::new(new_parser),
            new_executor: Box::new(new_executor),
            standard: Box::new(standard),
        }
    }

    /// Run the full protocol and return the exit code (0 or -1).
    pub fn exec(&self, args: &[String], console: &mut Console<'_>) -> i32 {
        let mut parser = (self.new_parser)();
        let options = match parser.parse(args) {
            Ok(options) => options,
            Err(err) => {
                debug!(%err, "argument parsing failed");
                console.err_line(err.to_string().trim_end());
                return -1;
            }
        };

        let standard = (self.standard)(&options);
        if standard.help {
            console.out_line(parser.help().trim_end());
            return 0;
        }
        if standard.version {
            console.out_line(E::identity());
            return 0;
        }

        let mut executor = (self.new_executor)();
        let started = if standard.verbose {
            match serde_json::to_string_pretty(&options) {
                Ok(dump) => console.err_line(dump),
                Err(err) => console.err_line(format_args!("(options not printable: {err})")),
            }
            Some(Instant::now())
        } else {
            None
        };

        debug!(executor = %E::identity().name, "executing");
        match executor.exec(&options, console) {
            Ok(()) => {
                if let Some(started) = started {
                    console.err_line(format_args!(
                        "Executed in {} ms",
                        started.elapsed().as_millis()
                    ));
                }
                0
            }
            Err(err) => {
                if standard.verbose {
                    console.err_line(format_args!("{err:?}"));
                } else {
                    console.err_line(err);
                }
                -1
            }
        }
    }
}

impl<P, E> Handler for OptionsPipeline<P, E>
where
    P: OptionsParser + 'static,
    P::Options: Serialize,
    E: Executor<Options = P::Options> + 'static,
{
    fn run(&self, args: &[String], console: &mut Console<'_>) -> i32 {
        self.exec(args, console)
    }
}

//! # cmdhub
//!
//! **Pluggable sub-command front-end.** A fixed catalog of named commands is
//! assembled at startup; `cmdhub <command> [args...]` dispatches by exact
//! name, and an unknown name gets near-miss suggestions from a bounded
//! approximate (bitap) matcher.
//!
//! ```text
//!  argv ─► CommandRegistry ──hit──► CommandDescriptor ─► Handler (OptionsPipeline)
//!               │                                        parse ► help/version ► execute
//!               └──miss──► ApproximateMatcher ─► "Did you mean..." or full listing
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use cmdhub::{CommandCatalog, CommandDescriptor, CommandRegistry, Console};
//!
//! let catalog = CommandCatalog::new(vec![
//!     CommandDescriptor::new("hello", |args: &[String], console: &mut Console<'_>| {
//!         console.out_line(format_args!("hello {}", args.join(" ")));
//!         0
//!     })
//!     .with_description("Say hello"),
//! ]);
//!
//! let registry = CommandRegistry::new("demo", catalog);
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! std::process::exit(registry.run(&args));
//! ```
//!
//! Commands with typed options are built from an [`OptionsPipeline`], which
//! gives every command the same `--help`, `--version` and `--verbose`
//! behavior and the same exit codes (0 on success, -1 on parse or
//! execution failure).

// ============================================================================
// Dispatch Core
// ============================================================================

/// Command descriptors and the read-only catalog.
pub mod catalog;
/// Bounded approximate substring matching for suggestions.
pub mod matcher;
/// Per-command parse/standard-options/execute protocol.
pub mod pipeline;
/// Exact dispatch, listings and suggestions.
pub mod registry;

// ============================================================================
// Supporting Modules
// ============================================================================

pub mod clap_parser;
pub mod colors;
pub mod config;
pub mod console;
pub mod error;

// ============================================================================
// Built-in Commands & Entry Point
// ============================================================================

pub mod commands;
pub mod entrypoint;

pub use catalog::{CommandCatalog, CommandDescriptor, Handler};
pub use clap_parser::ClapParser;
pub use config::HubConfig;
pub use console::Console;
pub use error::{MatcherError, ParseError};
pub use matcher::ApproximateMatcher;
pub use pipeline::{Executor, Identity, OptionsParser, OptionsPipeline, StandardOptions};
pub use registry::CommandRegistry;

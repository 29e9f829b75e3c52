//! Typed failures surfaced by the dispatch core.
//!
//! Execution failures are not listed here: executors return
//! `anyhow::Result`, so their cause chains travel untouched until the
//! pipeline prints them.

use thiserror::Error;

/// The user's arguments could not be turned into a command's options.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Rejected by a clap-backed parser.
    #[error(transparent)]
    Clap(#[from] clap::Error),

    /// Rejected by a hand-written parser.
    #[error("{0}")]
    Invalid(String),
}

impl ParseError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ParseError::Invalid(message.into())
    }
}

/// An approximate matcher could not be built for a pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("pattern is {len} characters long; at most {max} fit in a match word")]
    PatternTooLong { len: usize, max: usize },
}

//! Output/error stream pair shared by the registry and every command.
//!
//! Commands never touch `std::io::stdout()` directly. They receive a
//! `Console` so the same code path serves the real process streams and
//! the in-memory buffers used by tests.

use std::fmt::Display;
use std::io::{self, Write};

/// The two sinks a command may write to.
pub struct Console<'a> {
    out: Box<dyn Write + 'a>,
    err: Box<dyn Write + 'a>,
}

impl<'a> Console<'a> {
    /// Bind arbitrary writers, e.g. `Console::new(&mut out_buf, &mut err_buf)`.
    pub fn new(out: impl Write + 'a, err: impl Write + 'a) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
        }
    }

    /// Write one line to the output stream.
    pub fn out_line(&mut self, line: impl Display) {
        // A closed pipe (e.g. `cmdhub | head`) is not a command failure.
        let _ = writeln!(self.out, "{line}");
    }

    /// Write one line to the error stream.
    pub fn err_line(&mut self, line: impl Display) {
        let _ = writeln!(self.err, "{line}");
    }

    /// Write pre-rendered text to the output stream without adding a newline.
    pub fn out_text(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
    }

    /// Write pre-rendered text to the error stream without adding a newline.
    pub fn err_text(&mut self, text: &str) {
        let _ = self.err.write_all(text.as_bytes());
    }

    /// Flush both streams.
    pub fn flush(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

impl Console<'static> {
    /// Bind the process standard output and standard error.
    pub fn stdio() -> Self {
        Console::new(io::stdout(), io::stderr())
    }
}

impl Drop for Console<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

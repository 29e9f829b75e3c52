//! Top-level dispatch: `<app> [<command> [<args>...]]`.
//!
//! The registry resolves the first argument against its catalog. A hit runs
//! the command and passes its exit code through untouched. A miss is an
//! expected outcome, not an error: the user gets near-miss suggestions (or
//! the full listing when nothing is close) and exit code 0.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CommandCatalog, CommandDescriptor};
use crate::console::Console;
use crate::matcher::ApproximateMatcher;

/// Left margin of every command row in listings and suggestions.
pub const INDENT: &str = "   ";

/// Edits tolerated when looking for near misses of an unknown name.
pub const DEFAULT_SUGGEST_TOLERANCE: usize = 1;

type CategoryLabel = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Immutable front-end over a command catalog.
#[derive(Clone)]
pub struct CommandRegistry {
    app_name: String,
    description: Option<String>,
    catalog: CommandCatalog,
    category_label: CategoryLabel,
    suggest_tolerance: usize,
}

impl CommandRegistry {
    pub fn new(app_name: impl Into<String>, catalog: CommandCatalog) -> Self {
        Self {
            app_name: app_name.into(),
            description: None,
            catalog,
            category_label: Arc::new(|category: &str| category.to_string()),
            suggest_tolerance: DEFAULT_SUGGEST_TOLERANCE,
        }
    }

    /// One-line description printed under the usage line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Render category keys as listing headers (identity by default).
    pub fn with_category_label<F>(mut self, label: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.category_label = Arc::new(label);
        self
    }

    pub fn with_suggest_tolerance(mut self, max_errors: usize) -> Self {
        self.suggest_tolerance = max_errors;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    pub fn suggest_tolerance(&self) -> usize {
        self.suggest_tolerance
    }

    pub fn find(&self, name: &str) -> Option<&CommandDescriptor> {
        self.catalog.find(name)
    }

    /// Commands whose name contains `name` within the suggestion tolerance,
    /// sorted by name.
    pub fn suggestions(&self, name: &str) -> Vec<&CommandDescriptor> {
        let matcher = match ApproximateMatcher::new(name, self.suggest_tolerance) {
            Ok(matcher) => matcher,
            Err(err) => {
                debug!(%err, "no suggestions for unmatchable name");
                return Vec::new();
            }
        };
        let mut candidates: Vec<&CommandDescriptor> = self
            .catalog
            .iter()
            .filter(|cmd| matcher.matches(cmd.name()))
            .collect();
        candidates.sort_by(|a, b| a.name().cmp(b.name()));
        candidates
    }

    /// `usage: <app> <command> [<args>]`
    pub fn usage(&self) -> String {
        format!("usage: {} <command> [<args>]", self.app_name)
    }

    /// Every command, grouped by category, each group followed by a blank line.
    pub fn format_listing(&self) -> String {
        let mut listing = String::new();
        for (category, commands) in self.catalog.by_category() {
            listing.push_str(&(self.category_label)(category));
            listing.push('\n');
            listing.push_str(&format_rows(&commands));
            listing.push('\n');
        }
        listing
    }

    /// Dispatch a command line (without the program name).
    pub fn exec(&self, args: &[String], console: &mut Console<'_>) -> i32 {
        let Some((name, rest)) = args.split_first() else {
            console.out_line(self.usage());
            if let Some(description) = &self.description {
                console.out_line(description);
            }
            console.out_line("");
            console.out_text(&self.format_listing());
            return 0;
        };

        if let Some(cmd) = self.catalog.find(name) {
            debug!(command = %name, args = rest.len(), "dispatching");
            let code = cmd.invoke(rest, console);
            debug!(command = %name, code, "command finished");
            return code;
        }

        console.err_line(format_args!(
            "{}: '{}' is not a valid command.",
            self.app_name, name
        ));

        let candidates = self.suggestions(name);
        debug!(command = %name, candidates = candidates.len(), "unknown command");
        if candidates.is_empty() {
            console.out_line("");
            console.out_text(&self.format_listing());
        } else {
            console.err_line("");
            console.err_line("Did you mean one of these?");
            console.err_text(&format_rows(&candidates));
        }
        0
    }

    /// Dispatch against the process standard streams.
    pub fn run(&self, args: &[String]) -> i32 {
        self.exec(args, &mut Console::stdio())
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("app_name", &self.app_name)
            .field("description", &self.description)
            .field("catalog", &self.catalog)
            .field("suggest_tolerance", &self.suggest_tolerance)
            .finish_non_exhaustive()
    }
}

/// One row per command: indent, name, and the description aligned one
/// column past the longest name in `commands`.
pub fn format_rows(commands: &[&CommandDescriptor]) -> String {
    let width = commands
        .iter()
        .map(|cmd| cmd.name().chars().count())
        .max()
        .unwrap_or(0);

    let mut rows = String::new();
    for cmd in commands {
        let row = match cmd.description() {
            Some(description) => format!("{INDENT}{:<width$} {description}\n", cmd.name()),
            None => format!("{INDENT}{}\n", cmd.name()),
        };
        rows.push_str(&row);
    }
    rows
}

//! Shared entry point for the `cmdhub` binary.
//!
//! Wires configuration, styling and the built-in catalog into a
//! [`CommandRegistry`] and dispatches the process arguments through it.

use tracing::debug;

use crate::colors::Painter;
use crate::commands::builtin_catalog;
use crate::config::HubConfig;
use crate::registry::CommandRegistry;

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Name shown in usage lines and diagnostics.
    pub app_name: &'static str,
    /// One-line description printed under the usage line.
    pub description: &'static str,
}

/// Listing header for a category key: `Commands:` for the uncategorized
/// group, `Analysis commands:` for `analysis`.
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        None => "Commands:".to_string(),
        Some(first) => format!("{}{} commands:", first.to_uppercase(), chars.as_str()),
    }
}

/// Build the registry the binary dispatches through.
pub fn build_registry(opts: &EntryOptions, config: &HubConfig) -> CommandRegistry {
    let painter = Painter::new(config.color);
    CommandRegistry::new(opts.app_name, builtin_catalog(opts.app_name, config))
        .with_description(opts.description)
        .with_category_label(move |category: &str| painter.header(&category_label(category)))
        .with_suggest_tolerance(config.suggest_tolerance)
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: &EntryOptions) -> i32 {
    // args[0] is the executable path; the registry only sees what follows it.
    let raw_args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|s| s.to_string_lossy().into_owned())
        .collect();

    let config = HubConfig::load();
    debug!(?config, "configuration loaded");

    build_registry(opts, &config).run(&raw_args)
}

/// Process exit status for a handler code. Statuses are a byte wide, so
/// -1 surfaces as 255; a non-zero code whose low byte is 0 becomes 1.
pub fn exit_status(code: i32) -> u8 {
    match code as u8 {
        0 if code != 0 => 1,
        status => status,
    }
}

//! Built-in commands shipped with the `cmdhub` binary.
//!
//! Each command is an [`OptionsPipeline`](crate::pipeline::OptionsPipeline)
//! over a clap options type. The catalog is an explicit list; adding a
//! command means adding one descriptor here.

mod echo;
mod show_config;
mod stats;

pub use echo::{EchoExecutor, EchoOptions};
pub use show_config::{ConfigOptions, ShowConfigExecutor};
pub use stats::{StatsExecutor, StatsOptions, Summary};

use crate::catalog::{CommandCatalog, CommandDescriptor};
use crate::clap_parser::ClapParser;
use crate::config::HubConfig;
use crate::pipeline::OptionsPipeline;

/// The static catalog of built-in commands.
pub fn builtin_catalog(app_name: &str, config: &HubConfig) -> CommandCatalog {
    let echo_bin = format!("{app_name} echo");
    let stats_bin = format!("{app_name} stats");
    let config_bin = format!("{app_name} config");
    let config = config.clone();

    CommandCatalog::new(vec![
        CommandDescriptor::new(
            "echo",
            OptionsPipeline::new(
                move || ClapParser::<EchoOptions>::new(echo_bin.clone()),
                || EchoExecutor,
                |opts: &EchoOptions| opts.standard,
            ),
        )
        .with_description("Print the given words"),
        CommandDescriptor::new(
            "stats",
            OptionsPipeline::new(
                move || ClapParser::<StatsOptions>::new(stats_bin.clone()),
                || StatsExecutor,
                |opts: &StatsOptions| opts.standard,
            ),
        )
        .with_category("analysis")
        .with_description("Count, min, max and mean of a list of numbers"),
        CommandDescriptor::new(
            "config",
            OptionsPipeline::new(
                move || ClapParser::<ConfigOptions>::new(config_bin.clone()),
                move || ShowConfigExecutor::new(config.clone()),
                |opts: &ConfigOptions| opts.standard,
            ),
        )
        .with_category("tools")
        .with_description("Show the effective configuration"),
    ])
}

/// Version string reported by built-in executors.
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

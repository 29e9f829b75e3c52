//! `config` - show the effective configuration.

use clap::Parser;
use serde::Serialize;

use super::VERSION;
use crate::config::HubConfig;
use crate::console::Console;
use crate::pipeline::{Executor, Identity, StandardOptions};

/// Show the effective configuration as JSON
#[derive(Debug, Clone, Parser, Serialize)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct ConfigOptions {
    #[command(flatten)]
    pub standard: StandardOptions,

    /// Print where the configuration file is looked up instead
    #[arg(long)]
    pub path: bool,
}

pub struct ShowConfigExecutor {
    config: HubConfig,
}

impl ShowConfigExecutor {
    pub fn new(config: HubConfig) -> Self {
        Self { config }
    }
}

impl Executor for ShowConfigExecutor {
    type Options = ConfigOptions;

    fn identity() -> Identity {
        Identity::new("cmdhub-config").with_version(VERSION)
    }

    fn exec(&mut self, options: &ConfigOptions, console: &mut Console<'_>) -> anyhow::Result<()> {
        if options.path {
            match HubConfig::default_path() {
                Some(path) => console.out_line(path.display()),
                None => anyhow::bail!("no configuration directory on this platform"),
            }
        } else {
            console.out_line(serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }
}

use std::process::ExitCode;

use cmdhub::entrypoint::{EntryOptions, exit_status, run};
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `CMDHUB_LOG=cmdhub=debug`.
const LOG_ENV: &str = "CMDHUB_LOG";

fn init_logging() {
    // Logs go to stderr; stdout belongs to command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let code = run(&EntryOptions {
        app_name: "cmdhub",
        description: "Pluggable command hub. Run `cmdhub <command> --help` for command options.",
    });

    ExitCode::from(exit_status(code))
}

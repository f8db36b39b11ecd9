//! `overridehosts [host:addr ...] -- <command> [args...]`

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use overridehosts_core::config::{LOG_ENV, non_empty_var};
use overridehosts_launcher::LaunchError;

const USAGE: &str = "usage:\n  \
    overridehosts \"host:ip\" [\"host2:ip2\" ...] -- <command> [args...]\n  \
    OVERRIDEHOSTS=\"host:ip,host2:ip2\" overridehosts -- <command>";

/// Arguments before `--`. Every one of them is a mapping candidate, so
/// clap's own flags are off and dash-prefixed values reach validation.
#[derive(Debug, Parser)]
#[command(name = "overridehosts", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Hostname overrides, e.g. example:192.168.0.1.
    #[arg(value_name = "HOST:ADDR", allow_hyphen_values = true)]
    mappings: Vec<OsString>,
}

fn init_logging() {
    let Some(directive) = non_empty_var(LOG_ENV) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn launch() -> Result<(), LaunchError> {
    let mut args = std::env::args_os();
    let bin = args.next().unwrap_or_else(|| OsString::from("overridehosts"));
    let rest: Vec<OsString> = args.collect();

    // clap treats `--` as a value once a hyphen-accepting positional has
    // started, so the command line is split before parsing.
    let (before, command) = overridehosts_launcher::split_command_line(&rest)?;
    let cli = Cli::try_parse_from(std::iter::once(bin).chain(before.iter().cloned()))
        .map_err(|err| LaunchError::ConfigInvalid(err.kind().to_string()))?;

    match overridehosts_launcher::run(&cli.mappings, command)? {}
}

fn main() -> ExitCode {
    init_logging();
    let Err(err) = launch() else {
        return ExitCode::SUCCESS;
    };
    eprintln!("overridehosts: {err}");
    if matches!(err, LaunchError::Usage(_)) {
        eprintln!("{USAGE}");
    }
    ExitCode::from(err.exit_code())
}

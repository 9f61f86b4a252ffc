use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use legwork::bootstrap::{Bootstrap, DEFAULT_PRUNE_DAYS};
use legwork::utils::command;
use legwork::paths;

use super::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Shell command to execute (quoted as one argument)
    pub command: String,

    /// Log this message and fail fast when the command exits non-zero
    #[arg(long, value_name = "MSG")]
    pub fail_msg: Option<String>,

    /// Do not echo command output to the logger
    #[arg(long)]
    pub quiet: bool,

    /// Temp directory, recreated empty and removed on exit
    #[arg(long, value_name = "PATH")]
    pub temp_dir: Option<String>,

    /// Log directory
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<String>,

    /// Log file name (defaults to <program>_<timestamp>.log)
    #[arg(long, value_name = "NAME")]
    pub log_name: Option<String>,

    /// Minimum log level: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Remove log files older than this many days before logging starts
    #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_PRUNE_DAYS)]
    pub keep_days: u64,
}

#[derive(Serialize)]
pub struct RunOutput {
    pub command: String,
    pub exit_code: i32,
    pub output: String,
    pub log_file: String,
}

pub fn run(args: RunArgs, _global: &super::GlobalArgs) -> CmdResult<RunOutput> {
    let temp_dir = match &args.temp_dir {
        Some(path) => expand(path),
        None => paths::scratch(),
    };
    let log_dir = match &args.log_dir {
        Some(path) => expand(path),
        None => paths::logs()?,
    };

    let mut bootstrap = Bootstrap::new(temp_dir, log_dir)
        .log_level(&args.log_level)
        .prune_days(args.keep_days);
    if let Some(name) = &args.log_name {
        bootstrap = bootstrap.log_name(name);
    }
    let workspace = bootstrap.init()?;

    let result = command::run_shell(&args.command, !args.quiet, args.fail_msg.as_deref())?;

    let exit_code = result.exit_code;
    Ok((
        RunOutput {
            command: args.command,
            exit_code: result.exit_code,
            output: result.output,
            log_file: workspace.log_file().display().to_string(),
        },
        exit_code,
    ))
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

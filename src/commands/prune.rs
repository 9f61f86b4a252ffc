use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use legwork::bootstrap::DEFAULT_PRUNE_DAYS;
use legwork::core::prune;

use super::CmdResult;

#[derive(Args)]
pub struct PruneArgs {
    /// Directory to prune
    pub dir: String,

    /// Remove regular files older than this many days
    #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_PRUNE_DAYS)]
    pub days: u64,
}

#[derive(Serialize)]
pub struct PruneOutput {
    pub command: &'static str,
    pub dir: String,
    pub removed: usize,
}

pub fn run(args: PruneArgs, _global: &super::GlobalArgs) -> CmdResult<PruneOutput> {
    let dir = PathBuf::from(shellexpand::tilde(&args.dir).into_owned());
    let removed = prune::prune_older_than(&dir, args.days)?;

    Ok((
        PruneOutput {
            command: "prune",
            dir: dir.display().to_string(),
            removed,
        },
        0,
    ))
}

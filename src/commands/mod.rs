pub mod prune;
pub mod run;

/// Command handlers return their output plus the exit code to report.
pub type CmdResult<T> = legwork::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

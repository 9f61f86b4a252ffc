//! Process-wide logging configuration.
//!
//! Installs two handlers sharing one line format: a truncating log file and
//! the console (stderr). Initialization happens exactly once per process,
//! from `bootstrap::Bootstrap::init`.

use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Error, Result};

/// Line format shared by both sinks: `<timestamp>: [<LEVEL>] <message>`.
struct LogLine;

impl<S, N> FormatEvent<S, N> for LogLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{}: [{}] ",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Resolve a severity name to a level filter. Case-insensitive; accepts
/// both `warn` and `warning`.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        other => Err(Error::validation_invalid_argument(
            "log_level",
            format!("Unknown log level '{}'", other),
        )),
    }
}

/// Install the global subscriber: one handler writing to `log_file`
/// (truncated, UTF-8), one writing to stderr, both at `level`.
///
/// Fails if the log file cannot be created or a subscriber is already
/// installed; both are unrecoverable setup errors.
pub(crate) fn init(log_file: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(log_file).map_err(|e| {
        Error::setup_failed(
            format!("Failed to open log file {}: {}", log_file.display(), e),
            Some("open log file".to_string()),
        )
    })?;

    let file_layer = fmt::layer()
        .event_format(LogLine)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let console_layer = fmt::layer()
        .event_format(LogLine)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(level)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| {
            Error::setup_failed(
                format!("Failed to install logging handlers: {}", e),
                Some("init logging".to_string()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn parse_level_is_case_insensitive() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("  Error ").unwrap(), LevelFilter::ERROR);
    }

    #[test]
    fn parse_level_accepts_the_long_warning_name() {
        assert_eq!(parse_level("WARNING").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn parse_level_rejects_unknown_names() {
        let err = parse_level("loud").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }
}

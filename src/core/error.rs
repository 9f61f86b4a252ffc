use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Exit status reported for any fatal failure. Observed as 255 by the shell.
pub const FAILURE_EXIT: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    FileNotFound,

    CommandFailed,

    SetupFailed,

    InternalIoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::FileNotFound => "file.not_found",
            ErrorCode::CommandFailed => "command.failed",
            ErrorCode::SetupFailed => "setup.failed",
            ErrorCode::InternalIoError => "internal.io_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNotFoundDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
    pub output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupFailedDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::ValidationInvalidArgument, problem, details)
    }

    pub fn file_not_found(path: impl Into<String>, message: impl Into<String>) -> Self {
        let details = serde_json::to_value(FileNotFoundDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::FileNotFound, message, details)
    }

    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        output: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(CommandFailedDetails {
            command: command.into(),
            exit_code,
            output: output.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::CommandFailed, message, details)
    }

    pub fn setup_failed(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let details = serde_json::to_value(SetupFailedDetails {
            error: error.clone(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::SetupFailed, error, details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.clone(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, error, details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// Every error kind is fatal at the process boundary; callers that want
    /// to branch on a command's exit status get it as data, not as an error.
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_stable_strings() {
        assert_eq!(
            ErrorCode::ValidationInvalidArgument.as_str(),
            "validation.invalid_argument"
        );
        assert_eq!(ErrorCode::CommandFailed.as_str(), "command.failed");
        assert_eq!(ErrorCode::SetupFailed.as_str(), "setup.failed");
    }

    #[test]
    fn every_error_exits_with_the_sentinel() {
        let err = Error::validation_invalid_argument("name", "Input value 'name' cannot be empty");
        assert_eq!(err.exit_code(), FAILURE_EXIT);

        let err = Error::command_failed("false", 1, "", "deploy step failed");
        assert_eq!(err.exit_code(), FAILURE_EXIT);
    }

    #[test]
    fn command_failed_carries_exit_code_and_output() {
        let err = Error::command_failed("make dist", 2, "no rule to make target", "build failed");
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert_eq!(err.details["exitCode"], 2);
        assert_eq!(err.details["command"], "make dist");
    }

    #[test]
    fn with_hint_accumulates() {
        let err = Error::file_not_found("/etc/missing", "Config file is required")
            .with_hint("Run 'legwork run' with --log-dir to pick a location");
        assert_eq!(err.hints.len(), 1);
    }
}

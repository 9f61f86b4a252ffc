//! CLI response formatting and output.
//!
//! Provides the JSON envelope, printing, and exit code mapping.

use legwork::error::Hint;
use legwork::{Error, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) {
    use std::io::{self, Write};

    let payload = match serde_json::to_string_pretty(response) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to serialize response: {}", e);
            return;
        }
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    // BrokenPipe means the consumer went away; exit quietly.
    let _ = writeln!(handle, "{}", payload);
}

pub fn print_json_result(result: Result<serde_json::Value>) {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Flatten a command result into a serialized payload plus the exit code the
/// process should report. Errors exit with the sentinel failure code.
pub fn map_cmd_result<T: Serialize>(result: Result<(T, i32)>) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => {
                let err = Error::internal_io(
                    format!("Failed to serialize response: {}", err),
                    Some("serialize response".to_string()),
                );
                let code = err.exit_code();
                (Err(err), code)
            }
        },
        Err(err) => {
            let exit_code = err.exit_code();
            (Err(err), exit_code)
        }
    }
}

/// Map an i32 exit status to the u8 the process reports. Negative sentinels
/// surface the way the shell shows them (-1 becomes 255).
pub fn exit_code_to_u8(code: i32) -> u8 {
    if code < 0 || code > 255 {
        255
    } else {
        code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_exit_is_observed_as_255() {
        assert_eq!(exit_code_to_u8(-1), 255);
    }

    #[test]
    fn normal_codes_pass_through() {
        assert_eq!(exit_code_to_u8(0), 0);
        assert_eq!(exit_code_to_u8(7), 7);
        assert_eq!(exit_code_to_u8(255), 255);
    }

    #[test]
    fn errors_map_to_the_sentinel() {
        let result: legwork::Result<((), i32)> =
            Err(Error::validation_invalid_argument("x", "bad"));
        let (_, code) = map_cmd_result(result);
        assert_eq!(exit_code_to_u8(code), 255);
    }
}

//! Declarative CLI argument schemas.
//!
//! Scripts describe their flags as a flat list of [`ArgDef`] values — name,
//! help, required, and optionally a default and a choice set — and get back
//! a ready `clap::Command`. Choice-bearing arguments are uppercased before
//! being checked, so `--mode fast` and `--mode FAST` are the same input.

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{Error, Result};

/// One script argument. Mirrors the three accepted shapes:
/// name/help/required, plus default, plus choices.
#[derive(Debug, Clone)]
pub struct ArgDef {
    pub name: String,
    pub help: String,
    pub required: bool,
    pub default: Option<String>,
    pub choices: Option<Vec<String>>,
}

impl ArgDef {
    pub fn new(name: impl Into<String>, help: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            required,
            default: None,
            choices: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict the value to a fixed set. Choices are stored uppercased,
    /// matching the uppercasing applied to parsed values.
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.choices = Some(
            choices
                .into_iter()
                .map(|c| c.into().to_uppercase())
                .collect(),
        );
        self
    }
}

/// Build a `clap::Command` from a schema. Arguments are added sorted by
/// name, each as a `--name <value>` option.
pub fn build_command(name: &str, description: &str, defs: &[ArgDef]) -> Command {
    let mut sorted: Vec<&ArgDef> = defs.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut cmd = Command::new(name.to_string()).about(description.to_string());
    for def in sorted {
        // A default always satisfies the argument, so requiring it too
        // would make the flag impossible to omit meaningfully.
        let mut arg = Arg::new(def.name.clone())
            .long(def.name.clone())
            .help(def.help.clone())
            .required(def.required && def.default.is_none())
            .action(ArgAction::Set);

        if let Some(default) = &def.default {
            arg = arg.default_value(default.clone());
        }

        if let Some(choices) = &def.choices {
            let choices = choices.clone();
            arg = arg.value_parser(ValueParser::new(
                move |value: &str| -> std::result::Result<String, String> {
                    let upper = value.to_uppercase();
                    if choices.iter().any(|c| c == &upper) {
                        Ok(upper)
                    } else {
                        Err(format!("must be one of: {}", choices.join(", ")))
                    }
                },
            ));
        }

        cmd = cmd.arg(arg);
    }
    cmd
}

/// Parse `argv` (program name first) against a schema.
pub fn parse_args<I, T>(name: &str, description: &str, defs: &[ArgDef], argv: I) -> Result<ArgMatches>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    build_command(name, description, defs)
        .try_get_matches_from(argv)
        .map_err(|e| Error::validation_invalid_argument("args", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<ArgDef> {
        vec![
            ArgDef::new("source", "Source path", true),
            ArgDef::new("retries", "Retry count", false).with_default("3"),
            ArgDef::new("mode", "Transfer mode", true)
                .with_default("FAST")
                .with_choices(["fast", "slow"]),
        ]
    }

    #[test]
    fn arguments_are_sorted_by_name() {
        let cmd = build_command("sync", "Sync files", &schema());
        let names: Vec<&str> = cmd.get_arguments().map(|a| a.get_id().as_str()).collect();
        assert_eq!(names, ["mode", "retries", "source"]);
    }

    #[test]
    fn defaults_apply_when_omitted() {
        let matches = parse_args("sync", "Sync files", &schema(), ["sync", "--source", "/tmp"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("retries").unwrap(), "3");
    }

    #[test]
    fn choice_values_are_uppercased() {
        let matches = parse_args(
            "sync",
            "Sync files",
            &schema(),
            ["sync", "--source", "/tmp", "--mode", "slow"],
        )
        .unwrap();
        assert_eq!(matches.get_one::<String>("mode").unwrap(), "SLOW");
    }

    #[test]
    fn values_outside_the_choice_set_are_rejected() {
        let err = parse_args(
            "sync",
            "Sync files",
            &schema(),
            ["sync", "--source", "/tmp", "--mode", "sideways"],
        )
        .unwrap_err();
        assert!(err.message.contains("FAST"));
    }

    #[test]
    fn missing_required_argument_is_rejected() {
        assert!(parse_args("sync", "Sync files", &schema(), ["sync"]).is_err());
    }

    #[test]
    fn required_with_default_is_satisfied_by_the_default() {
        let defs = vec![ArgDef::new("env", "Environment", true).with_default("dev")];
        let matches = parse_args("deploy", "Deploy", &defs, ["deploy"]).unwrap();
        assert_eq!(matches.get_one::<String>("env").unwrap(), "dev");
    }
}

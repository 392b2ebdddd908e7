//! CLI front-end: argument parsing and dispatch for the `hookwright` binary.

mod help;

use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::diagnostics::ErrorFormat;
use crate::logging::{LogFormat, LogLevel, LogOptions, LogSettings};

pub mod dispatch;

/// Representation of the expanded module written by `expand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitFormat {
    #[default]
    Source,
    Json,
}

impl EmitFormat {
    pub fn parse(spec: &str) -> Option<Self> {
        match spec.trim().to_ascii_lowercase().as_str() {
            "source" | "swift" | "text" => Some(Self::Source),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub emit: EmitFormat,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Expand(ExpandOptions),
    Help { topic: Option<String> },
    Version,
}

/// Parsed CLI invocation.
#[derive(Debug, Clone)]
pub struct Cli {
    pub command: Command,
    pub log_options: LogOptions,
    pub error_format: Option<ErrorFormat>,
}

/// Error emitted while parsing command-line arguments.
#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn with_usage(message: impl Into<String>) -> Self {
        let mut owned = message.into();
        owned.push_str("\n\n");
        owned.push_str(&Cli::usage());
        Self::new(owned)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for CliError {}

/// Flags accepted both before the command and after it.
#[derive(Debug, Default)]
struct GlobalFlags {
    log: LogSettings,
    error_format: Option<ErrorFormat>,
}

impl GlobalFlags {
    /// Consumes `flag` (and its value) when it is a global option.
    fn consume<I>(&mut self, flag: &str, rest: &mut I) -> Result<bool, CliError>
    where
        I: Iterator<Item = String>,
    {
        match flag {
            "--log-level" => {
                let value = expect_value(flag, rest)?;
                let level = LogLevel::parse(&value).ok_or_else(|| {
                    CliError::with_usage(format!("unsupported log level '{value}'"))
                })?;
                self.log.level = Some(level);
            }
            "--log-format" => {
                let value = expect_value(flag, rest)?;
                let format = LogFormat::parse(&value).ok_or_else(|| {
                    CliError::with_usage(format!("unsupported log format '{value}'"))
                })?;
                self.log.format = Some(format);
            }
            "--error-format" => {
                let value = expect_value(flag, rest)?;
                let format = ErrorFormat::parse(&value).ok_or_else(|| {
                    CliError::with_usage(format!("unsupported error format '{value}'"))
                })?;
                self.error_format = Some(format);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn into_cli(self, command: Command) -> Cli {
        Cli {
            command,
            log_options: self.log.merged_with_env(),
            error_format: self.error_format,
        }
    }
}

fn expect_value<I>(flag: &str, rest: &mut I) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    rest.next()
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| CliError::with_usage(format!("expected value after {flag}")))
}

pub(crate) fn is_help_flag(value: &str) -> bool {
    matches!(value, "-h" | "--help")
}

impl Cli {
    /// Parse arguments from the environment.
    ///
    /// # Errors
    /// Returns a [`CliError`] when the arguments cannot be interpreted as a supported command.
    pub fn parse() -> Result<Self, CliError> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments from an iterator (useful for testing).
    ///
    /// # Errors
    /// Returns a [`CliError`] when the provided iterator does not describe a valid invocation.
    pub fn parse_from<I, T>(args: I) -> Result<Self, CliError>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut iter = args.map(Into::into);
        let mut globals = GlobalFlags::default();

        let raw_command = loop {
            let Some(arg) = iter.next() else {
                return Err(CliError::with_usage("missing command"));
            };
            if !arg.starts_with('-')
                || is_help_flag(&arg)
                || matches!(arg.as_str(), "--version" | "-V")
            {
                break arg;
            }
            if !globals.consume(&arg, &mut iter)? {
                return Err(CliError::with_usage(format!(
                    "unsupported global option '{arg}'"
                )));
            }
        };

        match raw_command.as_str() {
            "--help" | "-h" | "help" => {
                let topic = iter
                    .next()
                    .filter(|value| !is_help_flag(value))
                    .map(|value| value.to_ascii_lowercase());
                Ok(globals.into_cli(Command::Help { topic }))
            }
            "--version" | "-V" | "version" => {
                let remaining: Vec<String> = iter.collect();
                if remaining.iter().any(|value| is_help_flag(value)) {
                    return Ok(globals.into_cli(Command::Help {
                        topic: Some("version".into()),
                    }));
                }
                if let Some(extra) = remaining.first() {
                    return Err(CliError::with_usage(format!(
                        "unsupported option '{extra}' for command"
                    )));
                }
                Ok(globals.into_cli(Command::Version))
            }
            "expand" => parse_expand(iter, globals),
            other => Err(CliError::with_usage(format!("unknown command '{other}'"))),
        }
    }

    /// Return formatted general help text.
    #[must_use]
    pub fn usage() -> String {
        help::render_general_help()
    }

    /// Return help text for a specific command.
    ///
    /// # Errors
    /// Returns a [`CliError`] when the requested topic is unknown.
    pub fn help_for(topic: &str) -> Result<String, CliError> {
        help::render_command_help(topic)
            .ok_or_else(|| CliError::with_usage(help::format_unknown_topic(topic)))
    }
}

fn parse_expand<I>(mut iter: I, mut globals: GlobalFlags) -> Result<Cli, CliError>
where
    I: Iterator<Item = String>,
{
    let mut input = None;
    let mut config = None;
    let mut emit = EmitFormat::default();
    let mut output = None;

    while let Some(arg) = iter.next() {
        if is_help_flag(&arg) {
            return Ok(globals.into_cli(Command::Help {
                topic: Some("expand".into()),
            }));
        }
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(expect_value(&arg, &mut iter)?)),
            "--emit" => {
                let value = expect_value(&arg, &mut iter)?;
                emit = EmitFormat::parse(&value).ok_or_else(|| {
                    CliError::with_usage(format!("unsupported emit format '{value}'"))
                })?;
            }
            "-o" | "--output" => output = Some(PathBuf::from(expect_value(&arg, &mut iter)?)),
            flag if flag.starts_with('-') => {
                if !globals.consume(flag, &mut iter)? {
                    return Err(CliError::with_usage(format!(
                        "unsupported option '{flag}' for expand"
                    )));
                }
            }
            path => {
                if path.trim().is_empty() {
                    return Err(CliError::with_usage("input path must not be empty"));
                }
                if input.is_some() {
                    return Err(CliError::with_usage("expand accepts a single input module"));
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let Some(input) = input else {
        return Err(CliError::with_usage("expand requires <module.json>"));
    };
    Ok(globals.into_cli(Command::Expand(ExpandOptions {
        input,
        config,
        emit,
        output,
    })))
}

#[cfg(test)]
mod tests;

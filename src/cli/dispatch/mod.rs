use std::fs;
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::Instant;

use crate::cli::{Cli, Command, EmitFormat, ExpandOptions};
use crate::config::ExpansionConfig;
use crate::diagnostics::{Diagnostic, ErrorFormat, has_errors};
use crate::error::{Error, Result};
use crate::format::render_module;
use crate::frontend::ast::Module;
use crate::frontend::macro_expander::{MacroRegistry, expand_module};

mod logging;
mod reporting;

pub const ERROR_FORMAT_ENV: &str = "HOOKWRIGHT_ERROR_FORMAT";

/// How a successfully dispatched command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// The command ran to completion but reported error diagnostics.
    DiagnosticsFailed,
}

/// Result of expanding one serialized module, before anything is written out.
#[derive(Debug)]
pub struct ExpandOutcome {
    pub rendered: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Execute a parsed CLI command. Logging and diagnostics reporting are configured here so
/// the binary entrypoint can stay thin.
pub fn run(cli: Cli) -> Result<RunStatus> {
    logging::init_logging(&cli.log_options);
    let default_format = std::env::var(ERROR_FORMAT_ENV)
        .ok()
        .and_then(|value| ErrorFormat::parse(&value))
        .unwrap_or_else(|| {
            if std::io::stderr().is_terminal() {
                ErrorFormat::Human
            } else {
                ErrorFormat::Short
            }
        });
    let error_format = cli.error_format.unwrap_or(default_format);

    let start = Instant::now();
    logging::log_run_start(&cli.command, &cli.log_options);
    let status = match &cli.command {
        Command::Help { topic } => {
            let text = match topic {
                Some(topic) => Cli::help_for(topic)?,
                None => Cli::usage(),
            };
            println!("{text}");
            RunStatus::Success
        }
        Command::Version => {
            println!("hookwright {}", env!("CARGO_PKG_VERSION"));
            RunStatus::Success
        }
        Command::Expand(options) => run_expand(options, error_format)?,
    };
    logging::log_run_complete(
        &cli.command,
        start.elapsed(),
        status == RunStatus::DiagnosticsFailed,
    );
    Ok(status)
}

fn run_expand(options: &ExpandOptions, error_format: ErrorFormat) -> Result<RunStatus> {
    let config = resolve_config(options)?;
    let source = fs::read_to_string(&options.input)?;
    let outcome = expand_source(&source, &config, options.emit)?;

    let origin = options.input.display().to_string();
    reporting::print_diagnostics(&outcome.diagnostics, &origin, error_format);

    match &options.output {
        Some(path) => fs::write(path, &outcome.rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(outcome.rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    if has_errors(&outcome.diagnostics) {
        Ok(RunStatus::DiagnosticsFailed)
    } else {
        Ok(RunStatus::Success)
    }
}

fn resolve_config(options: &ExpandOptions) -> Result<ExpansionConfig> {
    if let Some(path) = &options.config {
        return ExpansionConfig::load(path);
    }
    let dir = options
        .input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ExpansionConfig::discover(dir)
}

/// Parse a JSON module, expand it, and render the result in the requested form.
pub fn expand_source(
    source: &str,
    config: &ExpansionConfig,
    emit: EmitFormat,
) -> Result<ExpandOutcome> {
    let mut module: Module = serde_json::from_str(source)?;
    let registry = MacroRegistry::with_builtins();
    let result = expand_module(&mut module, &registry, config);
    tracing::debug!(
        target: "cli",
        containers = result.containers_expanded,
        members = result.members_rewritten,
        hooks = result.hooks_synthesized,
        "module expanded"
    );
    let rendered = match emit {
        EmitFormat::Source => render_module(&module, config.indent_width),
        EmitFormat::Json => {
            let mut json = serde_json::to_string_pretty(&module)?;
            json.push('\n');
            json
        }
    };
    Ok(ExpandOutcome {
        rendered,
        diagnostics: result.diagnostics,
    })
}

pub fn report_error(err: &Error) {
    reporting::report_error(err);
}

use std::io::{self, Write};

use crate::diagnostics::{Diagnostic, ErrorFormat, format_diagnostics};
use crate::error::Error;

pub(super) fn report_error(err: &Error) {
    let mut out = io::stderr();
    if let Err(io_err) = report_error_to(err, &mut out) {
        let _ = writeln!(io::stderr(), "failed to report error: {io_err}");
    }
}

pub(super) fn report_error_to(err: &Error, out: &mut dyn Write) -> io::Result<()> {
    match err {
        Error::Cli(cli_err) => writeln!(out, "error: {cli_err}"),
        _ => {
            writeln!(out, "error: {err}")?;
            if cfg!(debug_assertions) {
                if let Some(backtrace) = err.backtrace() {
                    writeln!(out, "stack trace:")?;
                    writeln!(out, "{backtrace}")?;
                }
            }
            Ok(())
        }
    }
}

pub(super) fn print_diagnostics(diagnostics: &[Diagnostic], origin: &str, format: ErrorFormat) {
    let mut out = io::stderr();
    if let Err(err) = print_diagnostics_to(diagnostics, origin, format, &mut out) {
        let _ = writeln!(io::stderr(), "failed to write diagnostics: {err}");
    }
}

pub(super) fn print_diagnostics_to(
    diagnostics: &[Diagnostic],
    origin: &str,
    format: ErrorFormat,
    out: &mut dyn Write,
) -> io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", format_diagnostics(diagnostics, origin, format))?;
    if format != ErrorFormat::Json {
        let errors = diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity.is_error())
            .count();
        let warnings = diagnostics.len() - errors;
        writeln!(out, "{errors} error(s), {warnings} warning(s)")?;
    }
    Ok(())
}

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

use hookwright::cli::Cli;
use hookwright::cli::dispatch::{self, RunStatus};
use hookwright::error::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    run_with_args(std::env::args().skip(1))
}

fn run_with_args<I, S>(args: I) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match try_main(args) {
        Ok(RunStatus::Success) => ExitCode::SUCCESS,
        Ok(RunStatus::DiagnosticsFailed) => ExitCode::FAILURE,
        Err(err) => {
            dispatch::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn try_main<I, S>(args: I) -> Result<RunStatus>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli = Cli::parse_from(args.into_iter())?;
    dispatch::run(cli)
}

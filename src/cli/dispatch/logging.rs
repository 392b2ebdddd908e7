use std::time::Duration;

use crate::cli::Command;
use crate::logging::{LogFormat, LogOptions};

/// Install the global subscriber once; later calls are no-ops.
pub(super) fn init_logging(options: &LogOptions) {
    use std::io::IsTerminal;
    use std::sync::OnceLock;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::{EnvFilter, fmt};

    static INITIALISED: OnceLock<()> = OnceLock::new();

    let _ = INITIALISED.get_or_init(|| {
        let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let level = options.level;
        let make_filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::default()
                    .add_directive(LevelFilter::from_level(level.as_tracing_level()).into())
            })
        };

        match options.format {
            LogFormat::Json => {
                let subscriber = fmt::fmt()
                    .with_env_filter(make_filter())
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .json()
                    .finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
            }
            LogFormat::Compact => {
                let subscriber = fmt::fmt()
                    .with_env_filter(make_filter())
                    .with_ansi(use_ansi)
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .compact()
                    .finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
            }
        }
    });
}

pub(super) fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Expand(_) => "expand",
        Command::Help { .. } => "help",
        Command::Version => "version",
    }
}

pub(super) fn log_run_start(command: &Command, options: &LogOptions) {
    tracing::info!(
        target: "cli",
        stage = "cli.run.start",
        command = command_name(command),
        log_level = %options.level,
        log_format = %options.format,
    );
}

pub(super) fn log_run_complete(command: &Command, elapsed: Duration, failed: bool) {
    let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        target: "cli",
        stage = "cli.run.complete",
        command = command_name(command),
        status = if failed { "failed" } else { "ok" },
        elapsed_ms
    );
}

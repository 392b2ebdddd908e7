use super::*;
use std::path::Path;

fn expect_cli_ok<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    match Cli::parse_from(args.into_iter()) {
        Ok(cli) => cli,
        Err(err) => panic!("expected CLI parse to succeed, found error: {err}"),
    }
}

fn expect_cli_err<I, T>(args: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    match Cli::parse_from(args.into_iter()) {
        Ok(cli) => panic!("expected CLI parse to fail, parsed {:?}", cli.command),
        Err(err) => err.to_string(),
    }
}

fn expand_options(cli: Cli) -> ExpandOptions {
    match cli.command {
        Command::Expand(options) => options,
        other => panic!("expected expand command, found {other:?}"),
    }
}

#[test]
fn parses_expand_with_defaults() {
    let options = expand_options(expect_cli_ok(["expand", "module.json"]));
    assert_eq!(options.input, Path::new("module.json"));
    assert_eq!(options.config, None);
    assert_eq!(options.emit, EmitFormat::Source);
    assert_eq!(options.output, None);
}

#[test]
fn parses_expand_options_in_any_order() {
    let cli = expect_cli_ok([
        "expand",
        "--emit",
        "json",
        "module.json",
        "-o",
        "out.json",
        "--config",
        "hooks.yaml",
        "--error-format",
        "json",
    ]);
    assert_eq!(cli.error_format, Some(ErrorFormat::Json));
    let options = expand_options(cli);
    assert_eq!(options.emit, EmitFormat::Json);
    assert_eq!(options.output.as_deref(), Some(Path::new("out.json")));
    assert_eq!(options.config.as_deref(), Some(Path::new("hooks.yaml")));
}

#[test]
fn global_log_flags_before_the_command_override_the_environment() {
    let cli = expect_cli_ok([
        "--log-level",
        "trace",
        "--log-format",
        "json",
        "expand",
        "module.json",
    ]);
    assert_eq!(cli.log_options.level, LogLevel::Trace);
    assert_eq!(cli.log_options.format, LogFormat::Json);
}

#[test]
fn help_and_version_forms() {
    assert_eq!(
        expect_cli_ok(["--help"]).command,
        Command::Help { topic: None }
    );
    assert_eq!(
        expect_cli_ok(["help", "Expand"]).command,
        Command::Help {
            topic: Some("expand".into())
        }
    );
    assert_eq!(
        expect_cli_ok(["expand", "--help"]).command,
        Command::Help {
            topic: Some("expand".into())
        }
    );
    assert_eq!(expect_cli_ok(["-V"]).command, Command::Version);
    assert_eq!(expect_cli_ok(["version"]).command, Command::Version);
}

#[test]
fn rejects_missing_and_unknown_input() {
    assert!(expect_cli_err(Vec::<String>::new()).starts_with("missing command"));
    assert!(expect_cli_err(["expand"]).starts_with("expand requires <module.json>"));
    assert!(expect_cli_err(["frobnicate"]).starts_with("unknown command 'frobnicate'"));
    assert!(expect_cli_err(["expand", "a.json", "b.json"]).contains("single input module"));
    assert!(expect_cli_err(["expand", "a.json", "--emit", "xml"]).contains("unsupported emit format"));
    assert!(expect_cli_err(["expand", "a.json", "--config"]).contains("expected value after --config"));
    assert!(expect_cli_err(["--log-level", "loud", "expand"]).contains("unsupported log level"));
}

#[test]
fn usage_errors_carry_general_help() {
    let message = expect_cli_err(["expand", "--bogus"]);
    assert!(message.contains("unsupported option '--bogus' for expand"));
    assert!(message.contains("Usage: hookwright"));
}

#[test]
fn help_topics_render() {
    let text = Cli::help_for("expand").expect("expand help");
    assert!(text.contains("hookwright expand <module.json> [options]"));
    assert!(text.contains("--emit <source|json>"));
    let err = Cli::help_for("nope").expect_err("unknown topic");
    assert!(err.to_string().contains("unknown help topic 'nope'"));
}

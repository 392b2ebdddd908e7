use std::fmt::Write;

#[derive(Debug, Clone)]
struct OptionGuide {
    flag: &'static str,
    description: &'static str,
}

#[derive(Debug, Clone)]
struct CommandGuide {
    names: &'static [&'static str],
    summary: &'static str,
    usage: &'static [&'static str],
    options: &'static [OptionGuide],
    examples: &'static [&'static str],
}

const GLOBAL_OPTIONS: &[OptionGuide] = &[
    OptionGuide {
        flag: "-h, --help",
        description: "Show contextual help information.",
    },
    OptionGuide {
        flag: "-V, --version",
        description: "Print the hookwright version.",
    },
    OptionGuide {
        flag: "--log-level <level>",
        description: "Log verbosity (error, warn, info, debug, trace).",
    },
    OptionGuide {
        flag: "--log-format <format>",
        description: "Log output format (compact, json).",
    },
    OptionGuide {
        flag: "--error-format <format>",
        description: "Diagnostic rendering (human, short, json).",
    },
];

const COMMAND_GUIDES: &[CommandGuide] = &[
    CommandGuide {
        names: &["expand"],
        summary: "Expand stubbing and mocking annotations in a serialized module.",
        usage: &["hookwright expand <module.json> [options]"],
        options: &[
            OptionGuide {
                flag: "--config <path>",
                description: "Expansion settings; defaults to hookwright.yaml next to the input.",
            },
            OptionGuide {
                flag: "--emit <source|json>",
                description: "Print the expanded module as source text (default) or as JSON.",
            },
            OptionGuide {
                flag: "-o, --output <path>",
                description: "Write the expanded module to a file instead of stdout.",
            },
        ],
        examples: &[
            "hookwright expand Service.json",
            "hookwright expand Service.json --emit json -o Service.expanded.json",
            "hookwright --log-level debug expand Service.json --error-format json",
        ],
    },
    CommandGuide {
        names: &["help"],
        summary: "Show general help or help for a command.",
        usage: &["hookwright help [command]"],
        options: &[],
        examples: &["hookwright help expand"],
    },
    CommandGuide {
        names: &["version"],
        summary: "Print the hookwright version.",
        usage: &["hookwright --version", "hookwright version"],
        options: &[],
        examples: &[],
    },
];

pub(super) fn render_general_help() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "hookwright {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "Usage: hookwright [global options] <command> [args]");
    let _ = writeln!(out);
    let _ = writeln!(out, "Commands:");
    for guide in COMMAND_GUIDES {
        let _ = writeln!(out, "  {:<12}{}", guide.names[0], guide.summary);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Global options:");
    write_options(&mut out, GLOBAL_OPTIONS);
    out.truncate(out.trim_end().len());
    out
}

pub(super) fn render_command_help(topic: &str) -> Option<String> {
    let key = topic.trim().to_ascii_lowercase();
    let guide = COMMAND_GUIDES
        .iter()
        .find(|guide| guide.names.contains(&key.as_str()))?;
    let mut out = String::new();
    let _ = writeln!(out, "{}", guide.summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "Usage:");
    for usage in guide.usage {
        let _ = writeln!(out, "  {usage}");
    }
    if !guide.options.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Options:");
        write_options(&mut out, guide.options);
    }
    if !guide.examples.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Examples:");
        for example in guide.examples {
            let _ = writeln!(out, "  {example}");
        }
    }
    out.truncate(out.trim_end().len());
    Some(out)
}

pub(super) fn format_unknown_topic(topic: &str) -> String {
    let known = COMMAND_GUIDES
        .iter()
        .map(|guide| guide.names[0])
        .collect::<Vec<_>>()
        .join(", ");
    format!("unknown help topic '{topic}' (known topics: {known})")
}

fn write_options(out: &mut String, options: &[OptionGuide]) {
    let width = options
        .iter()
        .map(|option| option.flag.len())
        .max()
        .unwrap_or(0);
    for option in options {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            option.flag,
            option.description,
            width = width
        );
    }
}

use serde::Serialize;

use super::{Diagnostic, DiagnosticCode, Span, Suggestion};

pub const JSON_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorFormat {
    Human,
    Short,
    Json,
}

impl ErrorFormat {
    pub fn parse(spec: &str) -> Option<Self> {
        match spec.to_ascii_lowercase().as_str() {
            "human" | "text" => Some(Self::Human),
            "short" => Some(Self::Short),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a collection of diagnostics to a single string, one entry per block.
#[must_use]
pub fn format_diagnostics(diagnostics: &[Diagnostic], origin: &str, format: ErrorFormat) -> String {
    let mut rendered = String::new();
    for (index, diagnostic) in diagnostics.iter().enumerate() {
        if index > 0 {
            rendered.push('\n');
        }
        let chunk = match format {
            ErrorFormat::Human => render_human(diagnostic, origin),
            ErrorFormat::Short => render_short(diagnostic, origin),
            ErrorFormat::Json => render_json(diagnostic, origin),
        };
        rendered.push_str(&chunk);
    }
    rendered
}

fn render_human(diagnostic: &Diagnostic, origin: &str) -> String {
    let mut out = format!(
        "{}[{}]: {}",
        diagnostic.severity.as_str(),
        diagnostic.code_str(),
        diagnostic.message
    );
    out.push('\n');
    out.push_str(&format_location_arrow(origin, diagnostic.span()));
    if let Some(label) = diagnostic.primary_label.as_ref() {
        if !label.message.is_empty() {
            out.push_str(&format!("\n   = {}", label.message));
        }
    }
    for note in &diagnostic.notes {
        out.push_str(&format!("\nnote: {note}"));
    }
    for suggestion in &diagnostic.suggestions {
        let mut line = format!("\nhelp: {}", suggestion.message);
        if let Some(replacement) = &suggestion.replacement {
            line.push_str(&format!(" replace with `{replacement}`"));
        }
        out.push_str(&line);
    }
    out
}

fn render_short(diagnostic: &Diagnostic, origin: &str) -> String {
    let (start, end) = diagnostic.span().map_or_else(
        || ("?".to_string(), "?".to_string()),
        |span| (span.start.to_string(), span.end.to_string()),
    );
    let mut out = format!(
        "{origin}:{start}-{end}: {}[{}]: {}",
        diagnostic.severity.as_str(),
        diagnostic.code_str(),
        diagnostic.message
    );
    for suggestion in &diagnostic.suggestions {
        out.push_str(&format!("; suggestion: {}", suggestion.message));
    }
    out
}

fn format_location_arrow(origin: &str, span: Option<Span>) -> String {
    match span {
        Some(span) => format!("  --> {origin}@{}..{}", span.start, span.end),
        None => format!("  --> {origin}@?"),
    }
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    version: &'static str,
    origin: &'a str,
    severity: &'static str,
    code: Option<&'a DiagnosticCode>,
    message: &'a str,
    span: Option<Span>,
    notes: &'a [String],
    suggestions: &'a [Suggestion],
}

fn render_json(diagnostic: &Diagnostic, origin: &str) -> String {
    let payload = JsonDiagnostic {
        version: JSON_SCHEMA_VERSION,
        origin,
        severity: diagnostic.severity.as_str(),
        code: diagnostic.code.as_ref(),
        message: &diagnostic.message,
        span: diagnostic.span(),
        notes: &diagnostic.notes,
        suggestions: &diagnostic.suggestions,
    };
    serde_json::to_string(&payload).unwrap_or_else(|_| "{}".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagnostic {
        Diagnostic::error("`@StubbableProperty` can only be applied to `var` members", Some(Span::new(4, 9)))
            .with_code(DiagnosticCode::new("HW0203", Some("modifier".into())))
            .with_suggestion(Suggestion::new(
                "`@StubbableProperty` requires `var`",
                Some(Span::new(4, 9)),
                Some("var x: Int".into()),
            ))
    }

    #[test]
    fn human_format_lists_location_and_fix_it() {
        let rendered = format_diagnostics(&[sample()], "module.json", ErrorFormat::Human);
        assert!(rendered.starts_with("error[HW0203]: `@StubbableProperty`"));
        assert!(rendered.contains("--> module.json@4..9"));
        assert!(rendered.contains("help: `@StubbableProperty` requires `var` replace with `var x: Int`"));
    }

    #[test]
    fn short_format_is_single_line() {
        let rendered = format_diagnostics(&[sample()], "m", ErrorFormat::Short);
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.starts_with("m:4-9: error[HW0203]"));
    }

    #[test]
    fn json_format_carries_schema_version_and_code() {
        let rendered = format_diagnostics(&[sample()], "m", ErrorFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["version"], JSON_SCHEMA_VERSION);
        assert_eq!(value["code"]["code"], "HW0203");
        assert_eq!(value["span"]["start"], 4);
        assert_eq!(value["suggestions"][0]["replacement"], "var x: Int");
    }

    #[test]
    fn error_format_parse_accepts_known_values() {
        assert_eq!(ErrorFormat::parse("JSON"), Some(ErrorFormat::Json));
        assert_eq!(ErrorFormat::parse("text"), Some(ErrorFormat::Human));
        assert_eq!(ErrorFormat::parse("short"), Some(ErrorFormat::Short));
        assert_eq!(ErrorFormat::parse("toon"), None);
    }
}

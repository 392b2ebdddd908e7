use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity, Span};
use crate::frontend::ast::Attribute;

/// Rejection taxonomy used for diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Structural,
    Modifier,
    Signature,
    Metadata,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Structural => "structural",
            Category::Modifier => "modifier",
            Category::Signature => "signature",
            Category::Metadata => "metadata",
        }
    }
}

/// Every reason an annotation can be refused or a member skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    AppliedToExtension,
    AppliedToEnum,
    AppliedToProtocol,
    NotATypeDeclaration,
    NotAFunction,
    MissingBody,
    NotAProperty,
    ComputedProperty,
    ObservedProperty,
    MultipleBindings,
    NotAClass,
    DuplicateAnnotation,
    StaticFunction,
    StaticProperty,
    ImmutableProperty,
    FinalClass,
    FinalMethodSkipped,
    GenericFunction,
    RethrowsFunction,
    GenericClass,
    GenericMethodSkipped,
    RethrowsMethodSkipped,
    VariadicMethodSkipped,
    MissingType,
    MissingIdentifier,
}

impl Rule {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Rule::AppliedToExtension => "HW0101",
            Rule::AppliedToEnum => "HW0102",
            Rule::AppliedToProtocol => "HW0103",
            Rule::NotATypeDeclaration => "HW0104",
            Rule::NotAFunction => "HW0105",
            Rule::MissingBody => "HW0106",
            Rule::NotAProperty => "HW0107",
            Rule::ComputedProperty => "HW0108",
            Rule::ObservedProperty => "HW0109",
            Rule::MultipleBindings => "HW0110",
            Rule::NotAClass => "HW0111",
            Rule::DuplicateAnnotation => "HW0112",
            Rule::StaticFunction => "HW0201",
            Rule::StaticProperty => "HW0202",
            Rule::ImmutableProperty => "HW0203",
            Rule::FinalClass => "HW0204",
            Rule::FinalMethodSkipped => "HW0205",
            Rule::GenericFunction => "HW0301",
            Rule::RethrowsFunction => "HW0302",
            Rule::GenericClass => "HW0303",
            Rule::GenericMethodSkipped => "HW0304",
            Rule::RethrowsMethodSkipped => "HW0305",
            Rule::VariadicMethodSkipped => "HW0306",
            Rule::MissingType => "HW0401",
            Rule::MissingIdentifier => "HW0402",
        }
    }

    #[must_use]
    pub fn category(self) -> Category {
        match self.code().as_bytes().get(3) {
            Some(b'2') => Category::Modifier,
            Some(b'3') => Category::Signature,
            Some(b'4') => Category::Metadata,
            _ => Category::Structural,
        }
    }

    /// Skipped mock members and repeated annotations only warn; everything else is an error.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Rule::DuplicateAnnotation
            | Rule::FinalMethodSkipped
            | Rule::GenericMethodSkipped
            | Rule::RethrowsMethodSkipped
            | Rule::VariadicMethodSkipped => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// `subject` names the offending declaration for rules that mention it.
    #[must_use]
    pub fn message(self, annotation: &str, subject: &str) -> String {
        match self {
            Rule::AppliedToExtension => {
                format!("`@{annotation}` cannot be applied to extension `{subject}`")
            }
            Rule::AppliedToEnum => format!("`@{annotation}` cannot be applied to enum `{subject}`"),
            Rule::AppliedToProtocol => {
                format!("`@{annotation}` cannot be applied to protocol `{subject}`")
            }
            Rule::NotATypeDeclaration => {
                format!("`@{annotation}` must be applied to a type declaration")
            }
            Rule::NotAFunction => format!("`@{annotation}` can only be applied to functions"),
            Rule::MissingBody => format!("`@{annotation}` requires a function body"),
            Rule::NotAProperty => format!("`@{annotation}` can only be applied to properties"),
            Rule::ComputedProperty => {
                format!("`@{annotation}` cannot be applied to computed properties")
            }
            Rule::ObservedProperty => format!(
                "`@{annotation}` cannot be applied to properties with `willSet` or `didSet` observers"
            ),
            Rule::MultipleBindings => {
                format!("`@{annotation}` can only be applied to a single property binding")
            }
            Rule::NotAClass => format!("`@{annotation}` can only be applied to classes"),
            Rule::DuplicateAnnotation => format!("duplicate `@{annotation}` annotation is ignored"),
            Rule::StaticFunction => {
                format!("`@{annotation}` cannot be applied to static or class functions")
            }
            Rule::StaticProperty => {
                format!("`@{annotation}` cannot be applied to static properties")
            }
            Rule::ImmutableProperty => {
                format!("`@{annotation}` can only be applied to `var` members")
            }
            Rule::FinalClass => format!("`@{annotation}` cannot be applied to final classes"),
            Rule::FinalMethodSkipped => format!(
                "`@{annotation}` skipped final method `{subject}`; it cannot be overridden"
            ),
            Rule::GenericFunction => {
                format!("`@{annotation}` does not support generic functions")
            }
            Rule::RethrowsFunction => {
                format!("`@{annotation}` does not support `rethrows` functions")
            }
            Rule::GenericClass => format!("`@{annotation}` does not support generic classes"),
            Rule::GenericMethodSkipped => format!(
                "`@{annotation}` skipped generic method `{subject}`; generic methods have no hook type"
            ),
            Rule::RethrowsMethodSkipped => format!(
                "`@{annotation}` skipped `rethrows` method `{subject}`; its hook cannot rethrow"
            ),
            Rule::VariadicMethodSkipped => format!(
                "`@{annotation}` skipped variadic method `{subject}`; variadic arguments cannot be forwarded to `super`"
            ),
            Rule::MissingType => format!("`@{annotation}` requires an explicit type"),
            Rule::MissingIdentifier => format!("`@{annotation}` requires an explicit identifier"),
        }
    }
}

#[must_use]
pub fn violation(rule: Rule, annotation: &str, subject: &str, span: Option<Span>) -> Diagnostic {
    let message = rule.message(annotation, subject);
    let diagnostic = match rule.severity() {
        Severity::Error => Diagnostic::error(message, span),
        Severity::Warning => Diagnostic::warning(message, span),
        Severity::Note => Diagnostic::note(message, span),
    };
    diagnostic.with_code(DiagnosticCode::new(
        rule.code(),
        Some(rule.category().as_str().to_string()),
    ))
}

#[must_use]
pub fn duplicate_annotation(attribute: &Attribute) -> Diagnostic {
    violation(
        Rule::DuplicateAnnotation,
        attribute.name.trim(),
        "",
        attribute.span,
    )
}

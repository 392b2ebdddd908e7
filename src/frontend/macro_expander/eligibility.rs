//! Rules deciding whether a declaration may be expanded.
//!
//! Every check returns the narrowed declaration on success or exactly one diagnostic anchored
//! to the offending node.

use crate::config::ExpansionConfig;
use crate::diagnostics::{Diagnostic, Span, Suggestion};
use crate::format::render_decl;
use crate::frontend::ast::{
    Attribute, BindingSpecifier, ContainerDecl, ContainerKind, Decl, FunctionDecl, Modifier,
    TypeExpr, VariableDecl,
};

use super::diagnostics::{Rule, violation};
use super::model::MacroInvocation;

pub type Eligibility<T> = Result<T, Box<Diagnostic>>;

/// Outcome of looking at one member while building a mock subclass.
#[derive(Debug)]
pub enum MockMember<'d> {
    Override(&'d FunctionDecl),
    Skip,
    SkipWithWarning(Box<Diagnostic>),
}

struct Checker<'a> {
    annotation: &'a str,
    anchor: Option<Span>,
}

impl<'a> Checker<'a> {
    fn new(invocation: &'a MacroInvocation, decl: &Decl) -> Self {
        Self {
            annotation: invocation.name.trim().trim_start_matches('@'),
            anchor: decl.span().or(invocation.span),
        }
    }

    fn for_invocation(invocation: &'a MacroInvocation) -> Self {
        Self {
            annotation: invocation.name.trim().trim_start_matches('@'),
            anchor: invocation.span,
        }
    }

    fn reject(&self, rule: Rule, subject: &str) -> Diagnostic {
        violation(rule, self.annotation, subject, self.anchor)
    }

    fn reject_at(&self, rule: Rule, subject: &str, span: Option<Span>) -> Diagnostic {
        violation(rule, self.annotation, subject, span.or(self.anchor))
    }
}

pub fn check_function<'d>(
    decl: &'d Decl,
    invocation: &MacroInvocation,
) -> Eligibility<&'d FunctionDecl> {
    let checker = Checker::new(invocation, decl);
    let Decl::Function(function) = decl else {
        return Err(Box::new(checker.reject(Rule::NotAFunction, "")));
    };
    if function.body.is_none() {
        return Err(Box::new(checker.reject(Rule::MissingBody, &function.name)));
    }
    if function.is_generic() {
        let clause_span = function.generics.as_ref().and_then(|clause| clause.span);
        let diagnostic = checker
            .reject_at(Rule::GenericFunction, &function.name, clause_span)
            .with_primary_label("generic parameter clause");
        return Err(Box::new(diagnostic));
    }
    if function.signature.effects.is_rethrows() {
        return Err(Box::new(checker.reject(Rule::RethrowsFunction, &function.name)));
    }
    if function.is_type_level() {
        return Err(Box::new(checker.reject(Rule::StaticFunction, &function.name)));
    }
    Ok(function)
}

pub fn check_property<'d>(
    decl: &'d Decl,
    invocation: &MacroInvocation,
    config: &ExpansionConfig,
) -> Eligibility<&'d VariableDecl> {
    let checker = Checker::new(invocation, decl);
    let Decl::Variable(variable) = decl else {
        return Err(Box::new(checker.reject(Rule::NotAProperty, "")));
    };
    let subject = variable.first_identifier().unwrap_or_default();
    if variable.is_type_level() {
        return Err(Box::new(checker.reject(Rule::StaticProperty, subject)));
    }
    if variable.binding == BindingSpecifier::Let {
        let mut fixed = variable.clone();
        fixed.binding = BindingSpecifier::Var;
        let suggestion = Suggestion::new(
            format!("`@{}` requires `var`", checker.annotation),
            checker.anchor,
            Some(render_fix(fixed, invocation, config)),
        );
        let diagnostic = checker
            .reject(Rule::ImmutableProperty, subject)
            .with_suggestion(suggestion);
        return Err(Box::new(diagnostic));
    }
    if variable.bindings.len() != 1 {
        return Err(Box::new(checker.reject(Rule::MultipleBindings, subject)));
    }
    let binding = &variable.bindings[0];
    if binding.type_annotation.is_none() {
        let mut fixed = variable.clone();
        for binding in &mut fixed.bindings {
            binding.type_annotation = Some(TypeExpr::placeholder("Type"));
        }
        let message = Rule::MissingType.message(checker.annotation, subject);
        let suggestion = Suggestion::new(
            message,
            checker.anchor,
            Some(render_fix(fixed, invocation, config)),
        );
        let diagnostic = checker
            .reject(Rule::MissingType, subject)
            .with_suggestion(suggestion);
        return Err(Box::new(diagnostic));
    }
    if binding.pattern.identifier().is_none() {
        return Err(Box::new(checker.reject(Rule::MissingIdentifier, "")));
    }
    if let Some(accessors) = &binding.accessors {
        if accessors.is_computed() {
            return Err(Box::new(checker.reject(Rule::ComputedProperty, subject)));
        }
        if accessors.has_observers() {
            return Err(Box::new(checker.reject(Rule::ObservedProperty, subject)));
        }
    }
    Ok(variable)
}

/// Replacement text for a fix-it: the corrected declaration, annotation included.
fn render_fix(
    mut fixed: VariableDecl,
    invocation: &MacroInvocation,
    config: &ExpansionConfig,
) -> String {
    let mut annotation = Attribute::new(invocation.name.trim());
    annotation.arguments.clone_from(&invocation.arguments);
    fixed.attributes.insert(0, annotation);
    render_decl(&Decl::Variable(fixed), config.indent_width)
}

pub fn check_stubbable_container<'d>(
    decl: &'d Decl,
    invocation: &MacroInvocation,
) -> Eligibility<&'d ContainerDecl> {
    let checker = Checker::for_invocation(invocation);
    let Decl::Container(container) = decl else {
        return Err(Box::new(checker.reject(Rule::NotATypeDeclaration, "")));
    };
    if container.kind.has_instance_storage() {
        return Ok(container);
    }
    let rule = match container.kind {
        ContainerKind::Extension => Rule::AppliedToExtension,
        ContainerKind::Enum => Rule::AppliedToEnum,
        _ => Rule::AppliedToProtocol,
    };
    Err(Box::new(checker.reject(rule, &container.name)))
}

pub fn check_mockable_container<'d>(
    decl: &'d Decl,
    invocation: &MacroInvocation,
) -> Eligibility<&'d ContainerDecl> {
    let checker = Checker::for_invocation(invocation);
    let Decl::Container(container) = decl else {
        return Err(Box::new(checker.reject(Rule::NotATypeDeclaration, "")));
    };
    if container.kind != ContainerKind::Class {
        return Err(Box::new(checker.reject(Rule::NotAClass, &container.name)));
    }
    if container.is_final() {
        return Err(Box::new(checker.reject(Rule::FinalClass, &container.name)));
    }
    if container.is_generic() {
        let clause_span = container.generics.as_ref().and_then(|clause| clause.span);
        let diagnostic = checker
            .reject_at(Rule::GenericClass, &container.name, clause_span)
            .with_primary_label("generic parameter clause");
        return Err(Box::new(diagnostic));
    }
    Ok(container)
}

pub fn classify_mock_member<'d>(decl: &'d Decl, invocation: &MacroInvocation) -> MockMember<'d> {
    let Decl::Function(function) = decl else {
        return MockMember::Skip;
    };
    if function.is_type_level() || function.body.is_none() {
        return MockMember::Skip;
    }
    let checker = Checker::new(invocation, decl);
    let rule = if function.is_generic() {
        Rule::GenericMethodSkipped
    } else if function.signature.effects.is_rethrows() {
        Rule::RethrowsMethodSkipped
    } else if function.has_modifier(Modifier::Final) {
        Rule::FinalMethodSkipped
    } else if function
        .signature
        .parameters
        .iter()
        .any(|parameter| parameter.variadic)
    {
        Rule::VariadicMethodSkipped
    } else {
        return MockMember::Override(function);
    };
    let mut diagnostic = checker.reject(rule, &function.name);
    diagnostic.add_note("the mock subclass inherits the base class method unchanged");
    MockMember::SkipWithWarning(Box::new(diagnostic))
}

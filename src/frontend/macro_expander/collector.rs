use crate::diagnostics::Diagnostic;
use crate::frontend::ast::Attribute;
use std::collections::HashSet;

use super::diagnostics::duplicate_annotation;
use super::model::{AnnotationRole, MacroInvocation, normalise_name};
use super::registry::MacroRegistry;

/// Remove every attribute registered for `role`, returning them as invocations in source order.
///
/// Attributes of the other role and unregistered attributes stay on the declaration. A repeated
/// annotation is consumed but only expanded once.
pub fn collect_invocations(
    attributes: &mut Vec<Attribute>,
    registry: &MacroRegistry,
    role: AnnotationRole,
) -> (Vec<MacroInvocation>, Vec<Diagnostic>) {
    if attributes.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut diagnostics = Vec::new();
    let mut invocations: Vec<MacroInvocation> = Vec::new();
    let mut seen = HashSet::new();
    let retained = attributes
        .drain(..)
        .filter_map(|attribute| {
            if registry.role_of(&attribute.name) != Some(role) {
                return Some(attribute);
            }
            if seen.insert(normalise_name(&attribute.name)) {
                invocations.push(MacroInvocation::new(role, attribute));
            } else {
                diagnostics.push(duplicate_annotation(&attribute));
            }
            None
        })
        .collect();
    *attributes = retained;
    (invocations, diagnostics)
}

#[must_use]
pub fn has_annotation(attributes: &[Attribute], name: &str) -> bool {
    let key = normalise_name(name);
    attributes
        .iter()
        .any(|attribute| normalise_name(&attribute.name) == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn collects_only_the_requested_role() {
        let registry = MacroRegistry::with_builtins();
        let mut attributes = vec![
            Attribute::new("MainActor"),
            Attribute::new("stubbable"),
            Attribute::new("StubbableFunction"),
        ];
        let (invocations, diagnostics) =
            collect_invocations(&mut attributes, &registry, AnnotationRole::Container);
        assert!(diagnostics.is_empty());
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].name, "stubbable");
        assert_eq!(
            attributes,
            vec![Attribute::new("MainActor"), Attribute::new("StubbableFunction")]
        );
    }

    #[test]
    fn duplicates_are_consumed_with_a_warning() {
        let registry = MacroRegistry::with_builtins();
        let mut attributes = vec![Attribute::new("Mockable"), Attribute::new(" MOCKABLE ")];
        let (invocations, diagnostics) =
            collect_invocations(&mut attributes, &registry, AnnotationRole::Container);
        assert_eq!(invocations.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(attributes.is_empty());
    }

    #[test]
    fn has_annotation_ignores_case() {
        let attributes = vec![Attribute::new("stubbableProperty")];
        assert!(has_annotation(&attributes, "StubbableProperty"));
        assert!(!has_annotation(&attributes, "StubbableFunction"));
    }
}

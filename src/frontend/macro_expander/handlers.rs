use crate::frontend::ast::{ContainerDecl, ContainerKind, Decl, Item, TypeExpr};

use super::collector::has_annotation;
use super::diagnostics::{Rule, violation};
use super::eligibility::{
    MockMember, check_function, check_mockable_container, check_property,
    check_stubbable_container, classify_mock_member,
};
use super::hook_type::{function_hook, property_hooks};
use super::model::{MemberMarker, TaggedMember};
use super::registry::{ContainerInput, ContainerOutput, MemberInput, MemberOutput, MemberRewrite};
use super::rewrite::{function_body, mock_override, property_accessors};
use super::signature::{describe_container, describe_function, describe_property};

/// Stage 1 of `@Stubbable`: pick the members that would pass their own annotation's checks.
///
/// Ineligible members are skipped without a diagnostic; members already carrying the marker
/// are left alone.
pub fn stubbable(input: ContainerInput<'_>) -> ContainerOutput {
    let container = match check_stubbable_container(input.decl, input.invocation) {
        Ok(container) => container,
        Err(diagnostic) => return ContainerOutput::rejected(*diagnostic),
    };

    let mut output = ContainerOutput::empty();
    for (index, member) in container.members.iter().enumerate() {
        let marker = match &member.decl {
            Decl::Function(_) if check_function(&member.decl, input.invocation).is_ok() => {
                MemberMarker::Function
            }
            Decl::Variable(_)
                if check_property(&member.decl, input.invocation, input.config).is_ok() =>
            {
                MemberMarker::Property
            }
            other => {
                tracing::trace!(
                    target: "expand",
                    container = %container.name,
                    member = %other.describe(),
                    "member not eligible for stubbing"
                );
                continue;
            }
        };
        if has_annotation(member.decl.attributes(), marker.attribute_name()) {
            continue;
        }
        output.markers.push(TaggedMember { index, marker });
    }
    output
}

/// `@Mockable`: a nested subclass with a hook slot and an override per instance method.
pub fn mockable(input: ContainerInput<'_>) -> ContainerOutput {
    let base = match check_mockable_container(input.decl, input.invocation) {
        Ok(base) => base,
        Err(diagnostic) => return ContainerOutput::rejected(*diagnostic),
    };

    let mut output = ContainerOutput::empty();
    let mut members = Vec::new();
    for (position, member) in base.members.iter().enumerate() {
        let function = match classify_mock_member(&member.decl, input.invocation) {
            MockMember::Override(function) => function,
            MockMember::Skip => continue,
            MockMember::SkipWithWarning(diagnostic) => {
                output.diagnostics.push(*diagnostic);
                continue;
            }
        };
        let descriptor = describe_function(function);
        let hook = function_hook(&descriptor, input.config);
        let overriding = mock_override(
            function,
            &descriptor,
            &hook,
            input.registry,
            &input.config.core_module,
        );
        let slot_spacing = if position == 0 { 1 } else { 2 };
        members.push(Item::spaced(Decl::Variable(hook.slot()), slot_spacing));
        members.push(Item::spaced(Decl::Function(overriding), 2));
        output.hooks += 1;
    }

    let base_descriptor = describe_container(base);
    let mut mock = ContainerDecl::new(ContainerKind::Class, input.config.mock_type_name.clone());
    mock.inheritance.push(TypeExpr::named(base_descriptor.name));
    mock.inheritance.extend(base.inheritance.iter().cloned());
    mock.members = members;
    mock.span = input.invocation.span;
    output.new_members.push(Item::spaced(Decl::Container(mock), 2));
    output
}

/// `@StubbableFunction`: one hook slot peer and a body that consults it.
pub fn stubbable_function(input: MemberInput<'_>) -> MemberOutput {
    let function = match check_function(input.decl, input.invocation) {
        Ok(function) => function,
        Err(diagnostic) => return MemberOutput::rejected(*diagnostic),
    };
    let descriptor = describe_function(function);
    let hook = function_hook(&descriptor, input.config);
    let body = function_body(function, &descriptor, &hook, &input.config.core_module);
    MemberOutput {
        peers: vec![Decl::Variable(hook.slot())],
        rewrite: Some(MemberRewrite::Body(body)),
        diagnostics: Vec::new(),
        hooks: 1,
    }
}

/// `@StubbableProperty`: backing slot, getter and setter hooks, and an accessor triplet.
pub fn stubbable_property(input: MemberInput<'_>) -> MemberOutput {
    let variable = match check_property(input.decl, input.invocation, input.config) {
        Ok(variable) => variable,
        Err(diagnostic) => return MemberOutput::rejected(*diagnostic),
    };
    let Some(descriptor) = describe_property(variable) else {
        return MemberOutput::rejected(violation(
            Rule::MissingIdentifier,
            input.invocation.name.trim(),
            "",
            variable.span.or(input.invocation.span),
        ));
    };
    let hooks = property_hooks(&descriptor, input.config);
    let initializer = variable
        .bindings
        .first()
        .and_then(|binding| binding.initializer.clone());
    MemberOutput {
        peers: hooks.peers(initializer),
        rewrite: Some(MemberRewrite::Accessors(property_accessors(&hooks))),
        diagnostics: Vec::new(),
        hooks: 2,
    }
}

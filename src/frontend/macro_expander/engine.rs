use crate::config::ExpansionConfig;
use crate::diagnostics::{Diagnostic, Span, has_errors};
use crate::frontend::ast::{ContainerDecl, Decl, Item, Module};

use super::collector::collect_invocations;
use super::model::{AnnotationRole, MacroInvocation, TaggedMember};
use super::registry::{ContainerInput, MacroRegistry, MemberInput, MemberRewrite};

pub struct MacroExpansionResult {
    /// Every diagnostic in encounter order; stage 1 findings precede stage 2.
    pub diagnostics: Vec<Diagnostic>,
    pub containers_expanded: usize,
    pub members_rewritten: usize,
    pub hooks_synthesized: usize,
}

impl MacroExpansionResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }
}

/// Expand every registered annotation in `module` in place.
///
/// Container annotations run first and may tag members or append nested types; member
/// annotations (written by hand or tagged) run afterwards over the resulting tree.
pub fn expand_module(
    module: &mut Module,
    registry: &MacroRegistry,
    config: &ExpansionConfig,
) -> MacroExpansionResult {
    let mut expander = MacroExpander::new(registry, config);
    expander.tag_members(&mut module.items);
    expander.rewrite_members(&mut module.items);

    tracing::debug!(
        target: "expand",
        containers = expander.containers_expanded,
        members = expander.members_rewritten,
        hooks = expander.hooks_synthesized,
        diagnostics = expander.diagnostics.len(),
        "expansion finished"
    );

    MacroExpansionResult {
        diagnostics: expander.diagnostics,
        containers_expanded: expander.containers_expanded,
        members_rewritten: expander.members_rewritten,
        hooks_synthesized: expander.hooks_synthesized,
    }
}

struct MacroExpander<'a> {
    registry: &'a MacroRegistry,
    config: &'a ExpansionConfig,
    diagnostics: Vec<Diagnostic>,
    containers_expanded: usize,
    members_rewritten: usize,
    hooks_synthesized: usize,
}

impl<'a> MacroExpander<'a> {
    fn new(registry: &'a MacroRegistry, config: &'a ExpansionConfig) -> Self {
        Self {
            registry,
            config,
            diagnostics: Vec::new(),
            containers_expanded: 0,
            members_rewritten: 0,
            hooks_synthesized: 0,
        }
    }

    fn take_invocations(&mut self, decl: &mut Decl, role: AnnotationRole) -> Vec<MacroInvocation> {
        let Some(attributes) = decl.attributes_mut() else {
            return Vec::new();
        };
        let (invocations, duplicates) = collect_invocations(attributes, self.registry, role);
        self.diagnostics.extend(duplicates);
        invocations
    }

    fn tag_members(&mut self, items: &mut [Item]) {
        for item in items.iter_mut() {
            let invocations = self.take_invocations(&mut item.decl, AnnotationRole::Container);
            let mut markers: Vec<(TaggedMember, Option<Span>)> = Vec::new();
            let mut new_members = Vec::new();

            for invocation in &invocations {
                let Some(&handler) = self.registry.get_container(&invocation.name) else {
                    continue;
                };
                let output = handler(ContainerInput {
                    invocation,
                    decl: &item.decl,
                    config: self.config,
                    registry: self.registry,
                });
                let rejected = has_errors(&output.diagnostics);
                tracing::debug!(
                    target: "expand",
                    annotation = %invocation.name,
                    decl = %item.decl.describe(),
                    markers = output.markers.len(),
                    new_members = output.new_members.len(),
                    rejected,
                    "expanded container annotation"
                );
                self.diagnostics.extend(output.diagnostics);
                if rejected {
                    continue;
                }
                self.containers_expanded += 1;
                self.hooks_synthesized += output.hooks;
                markers.extend(output.markers.into_iter().map(|tag| (tag, invocation.span)));
                new_members.extend(output.new_members);
            }

            if let Decl::Container(container) = &mut item.decl {
                apply_markers(container, &markers);
                container.members.extend(new_members);
                self.tag_members(&mut container.members);
            }
        }
    }

    fn rewrite_members(&mut self, items: &mut Vec<Item>) {
        let mut index = 0;
        while index < items.len() {
            let invocations = self.take_invocations(&mut items[index].decl, AnnotationRole::Member);
            let mut peers = Vec::new();

            for invocation in &invocations {
                let Some(&handler) = self.registry.get_member(&invocation.name) else {
                    continue;
                };
                let output = handler(MemberInput {
                    invocation,
                    decl: &items[index].decl,
                    config: self.config,
                });
                tracing::debug!(
                    target: "expand",
                    annotation = %invocation.name,
                    decl = %items[index].decl.describe(),
                    peers = output.peers.len(),
                    rejected = output.rewrite.is_none(),
                    "expanded member annotation"
                );
                self.diagnostics.extend(output.diagnostics);
                if let Some(rewrite) = output.rewrite {
                    apply_rewrite(&mut items[index].decl, rewrite);
                    self.members_rewritten += 1;
                }
                self.hooks_synthesized += output.hooks;
                peers.extend(output.peers);
            }

            if let Decl::Container(container) = &mut items[index].decl {
                self.rewrite_members(&mut container.members);
            }

            let inserted = peers.len();
            for (offset, peer) in peers.into_iter().enumerate() {
                items.insert(index + 1 + offset, Item::spaced(peer, 2));
            }
            index += 1 + inserted;
        }
    }
}

fn apply_markers(container: &mut ContainerDecl, markers: &[(TaggedMember, Option<Span>)]) {
    for (tag, span) in markers {
        let Some(member) = container.members.get_mut(tag.index) else {
            tracing::trace!(target: "expand", index = tag.index, "marker index out of range");
            continue;
        };
        if let Some(attributes) = member.decl.attributes_mut() {
            attributes.push(tag.marker.attribute(*span));
        }
    }
}

fn apply_rewrite(decl: &mut Decl, rewrite: MemberRewrite) {
    match (decl, rewrite) {
        (Decl::Function(function), MemberRewrite::Body(body)) => {
            function.body = Some(body);
        }
        (Decl::Variable(variable), MemberRewrite::Accessors(accessors)) => {
            if let Some(binding) = variable.bindings.first_mut() {
                binding.initializer = None;
                binding.accessors = Some(accessors);
            }
        }
        (decl, _) => {
            tracing::debug!(
                target: "expand",
                decl = %decl.describe(),
                "rewrite does not fit the declaration; ignored"
            );
        }
    }
}

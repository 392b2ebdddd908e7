use crate::config::ExpansionConfig;
use crate::diagnostics::Diagnostic;
use crate::frontend::ast::{AccessorBlock, Block, Decl, Item};
use std::collections::HashMap;

use super::handlers;
use super::model::{
    AnnotationRole, MOCKABLE, MacroInvocation, STUBBABLE, STUBBABLE_FUNCTION, STUBBABLE_PROPERTY,
    TaggedMember, normalise_name,
};

pub type ContainerHandler = fn(ContainerInput<'_>) -> ContainerOutput;
pub type MemberHandler = fn(MemberInput<'_>) -> MemberOutput;

pub struct MacroRegistry {
    container_macros: HashMap<String, ContainerHandler>,
    member_macros: HashMap<String, MemberHandler>,
}

impl MacroRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            container_macros: HashMap::new(),
            member_macros: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_container(STUBBABLE, handlers::stubbable);
        registry.register_container(MOCKABLE, handlers::mockable);
        registry.register_member(STUBBABLE_FUNCTION, handlers::stubbable_function);
        registry.register_member(STUBBABLE_PROPERTY, handlers::stubbable_property);
        registry
    }

    pub fn register_container(&mut self, name: impl AsRef<str>, handler: ContainerHandler) {
        self.container_macros
            .insert(normalise_name(name.as_ref()), handler);
    }

    pub fn register_member(&mut self, name: impl AsRef<str>, handler: MemberHandler) {
        self.member_macros
            .insert(normalise_name(name.as_ref()), handler);
    }

    pub fn get_container(&self, name: &str) -> Option<&ContainerHandler> {
        self.container_macros.get(&normalise_name(name))
    }

    pub fn get_member(&self, name: &str) -> Option<&MemberHandler> {
        self.member_macros.get(&normalise_name(name))
    }

    /// Stage the named attribute belongs to, or `None` for attributes this registry ignores.
    #[must_use]
    pub fn role_of(&self, name: &str) -> Option<AnnotationRole> {
        let key = normalise_name(name);
        if self.container_macros.contains_key(&key) {
            Some(AnnotationRole::Container)
        } else if self.member_macros.contains_key(&key) {
            Some(AnnotationRole::Member)
        } else {
            None
        }
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

pub struct ContainerInput<'i> {
    pub invocation: &'i MacroInvocation,
    pub decl: &'i Decl,
    pub config: &'i ExpansionConfig,
    pub registry: &'i MacroRegistry,
}

pub struct ContainerOutput {
    pub markers: Vec<TaggedMember>,
    pub new_members: Vec<Item>,
    pub diagnostics: Vec<Diagnostic>,
    /// Hook slots created inside `new_members`.
    pub hooks: usize,
}

impl ContainerOutput {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            new_members: Vec::new(),
            diagnostics: Vec::new(),
            hooks: 0,
        }
    }

    #[must_use]
    pub fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Self::empty()
        }
    }
}

pub struct MemberInput<'i> {
    pub invocation: &'i MacroInvocation,
    pub decl: &'i Decl,
    pub config: &'i ExpansionConfig,
}

/// Replacement for the annotated declaration's executable part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRewrite {
    Body(Block),
    Accessors(AccessorBlock),
}

pub struct MemberOutput {
    pub peers: Vec<Decl>,
    pub rewrite: Option<MemberRewrite>,
    pub diagnostics: Vec<Diagnostic>,
    /// Hook slots among `peers` (backing storage is not a hook).
    pub hooks: usize,
}

impl MemberOutput {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            peers: Vec::new(),
            rewrite: None,
            diagnostics: Vec::new(),
            hooks: 0,
        }
    }

    #[must_use]
    pub fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Self::empty()
        }
    }
}

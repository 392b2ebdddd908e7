use super::base::{Attribute, GenericClause, Item, Modifier};
use crate::diagnostics::Span;
use crate::frontend::ast::types::TypeExpr;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Class,
    Struct,
    Actor,
    Enum,
    Protocol,
    Extension,
}

impl ContainerKind {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            ContainerKind::Class => "class",
            ContainerKind::Struct => "struct",
            ContainerKind::Actor => "actor",
            ContainerKind::Enum => "enum",
            ContainerKind::Protocol => "protocol",
            ContainerKind::Extension => "extension",
        }
    }

    /// Kinds with per-instance storage that can host hook slots.
    #[must_use]
    pub fn has_instance_storage(self) -> bool {
        matches!(
            self,
            ContainerKind::Class | ContainerKind::Struct | ContainerKind::Actor
        )
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Type declaration grouping member declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDecl {
    pub kind: ContainerKind,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub name: String,
    #[serde(default)]
    pub generics: Option<GenericClause>,
    #[serde(default)]
    pub inheritance: Vec<TypeExpr>,
    #[serde(default)]
    pub members: Vec<Item>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl ContainerDecl {
    #[must_use]
    pub fn new(kind: ContainerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            modifiers: Vec::new(),
            name: name.into(),
            generics: None,
            inheritance: Vec::new(),
            members: Vec::new(),
            span: None,
        }
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.contains(&Modifier::Final)
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generics
            .as_ref()
            .is_some_and(|clause| !clause.parameters.is_empty())
    }
}

mod aggregates;
mod base;

pub use aggregates::{ContainerDecl, ContainerKind};
pub use base::{
    AccessorBlock, AccessorDecl, AccessorKind, Attribute, BindingSpecifier, Decl,
    DeinitializerDecl, FunctionDecl, GenericClause, InitializerDecl, Item, Modifier, Module,
    Parameter, Pattern, PatternBinding, Signature, VariableDecl, VerbatimDecl,
};

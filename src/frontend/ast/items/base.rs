use super::aggregates::ContainerDecl;
use crate::diagnostics::Span;
use crate::frontend::ast::expressions::{Block, Expr};
use crate::frontend::ast::types::{EffectSpecifiers, TypeExpr};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of a host-supplied syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Module {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_item(&mut self, decl: Decl) {
        let leading_newlines = if self.items.is_empty() { 0 } else { 2 };
        self.items.push(Item::spaced(decl, leading_newlines));
    }
}

/// Declaration plus the trivia the printer needs to reproduce spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub decl: Decl,
    #[serde(default = "default_leading_newlines")]
    pub leading_newlines: usize,
}

fn default_leading_newlines() -> usize {
    1
}

impl Item {
    #[must_use]
    pub fn new(decl: Decl) -> Self {
        Self::spaced(decl, default_leading_newlines())
    }

    #[must_use]
    pub fn spaced(decl: Decl, leading_newlines: usize) -> Self {
        Self {
            decl,
            leading_newlines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Decl {
    Container(ContainerDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    Initializer(InitializerDecl),
    Deinitializer(DeinitializerDecl),
    /// Declarations the expander never inspects (type aliases, comments, macros, ...).
    Verbatim(VerbatimDecl),
}

impl Decl {
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Decl::Container(decl) => &decl.attributes,
            Decl::Function(decl) => &decl.attributes,
            Decl::Variable(decl) => &decl.attributes,
            Decl::Initializer(decl) => &decl.attributes,
            Decl::Deinitializer(decl) => &decl.attributes,
            Decl::Verbatim(_) => &[],
        }
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match self {
            Decl::Container(decl) => Some(&mut decl.attributes),
            Decl::Function(decl) => Some(&mut decl.attributes),
            Decl::Variable(decl) => Some(&mut decl.attributes),
            Decl::Initializer(decl) => Some(&mut decl.attributes),
            Decl::Deinitializer(decl) => Some(&mut decl.attributes),
            Decl::Verbatim(_) => None,
        }
    }

    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            Decl::Container(decl) => &decl.modifiers,
            Decl::Function(decl) => &decl.modifiers,
            Decl::Variable(decl) => &decl.modifiers,
            Decl::Initializer(decl) => &decl.modifiers,
            Decl::Deinitializer(_) | Decl::Verbatim(_) => &[],
        }
    }

    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            Decl::Container(decl) => decl.span,
            Decl::Function(decl) => decl.span,
            Decl::Variable(decl) => decl.span,
            Decl::Initializer(decl) => decl.span,
            Decl::Deinitializer(decl) => decl.span,
            Decl::Verbatim(decl) => decl.span,
        }
    }

    /// Short human description used in diagnostics and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Decl::Container(decl) => format!("{} `{}`", decl.kind, decl.name),
            Decl::Function(decl) => format!("function `{}`", decl.name),
            Decl::Variable(decl) => match decl.first_identifier() {
                Some(name) => format!("property `{name}`"),
                None => "property".to_string(),
            },
            Decl::Initializer(_) => "initializer".to_string(),
            Decl::Deinitializer(_) => "deinitializer".to_string(),
            Decl::Verbatim(_) => "declaration".to_string(),
        }
    }
}

/// `@Name` or `@Name(arguments)`; `arguments` keeps the raw text between the parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if let Some(arguments) = &self.arguments {
            write!(f, "({arguments})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Open,
    Public,
    Internal,
    Fileprivate,
    Private,
    Static,
    Class,
    Final,
    Override,
    Mutating,
}

impl Modifier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Open => "open",
            Modifier::Public => "public",
            Modifier::Internal => "internal",
            Modifier::Fileprivate => "fileprivate",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Class => "class",
            Modifier::Final => "final",
            Modifier::Override => "override",
            Modifier::Mutating => "mutating",
        }
    }

    /// `static` and `class` both mark type-level members.
    #[must_use]
    pub fn is_type_level(self) -> bool {
        matches!(self, Modifier::Static | Modifier::Class)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericClause {
    pub parameters: Vec<String>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl fmt::Display for GenericClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.parameters.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub name: String,
    #[serde(default)]
    pub generics: Option<GenericClause>,
    pub signature: Signature,
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl FunctionDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, signature: Signature, body: Option<Block>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            name: name.into(),
            generics: None,
            signature,
            body,
            span: None,
        }
    }

    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    #[must_use]
    pub fn is_type_level(&self) -> bool {
        self.modifiers.iter().any(|modifier| modifier.is_type_level())
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generics
            .as_ref()
            .is_some_and(|clause| !clause.parameters.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub effects: EffectSpecifiers,
    #[serde(default)]
    pub return_type: Option<TypeExpr>,
}

impl Signature {
    #[must_use]
    pub fn new(
        parameters: Vec<Parameter>,
        effects: EffectSpecifiers,
        return_type: Option<TypeExpr>,
    ) -> Self {
        Self {
            parameters,
            effects,
            return_type,
        }
    }
}

/// Function parameter. `label` is the external name (`_` for a wildcard); `name`
/// is the separate internal name when one is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
    pub ty: TypeExpr,
    #[serde(default)]
    pub variadic: bool,
    #[serde(default)]
    pub default: Option<Expr>,
}

impl Parameter {
    #[must_use]
    pub fn new(label: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            label: label.into(),
            name: None,
            ty,
            variadic: false,
            default: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    #[must_use]
    pub fn binding_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }

    #[must_use]
    pub fn external_label(&self) -> Option<&str> {
        (self.label != "_").then_some(self.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializerDecl {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub failable: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub effects: EffectSpecifiers,
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeinitializerDecl {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbatimDecl {
    pub text: String,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSpecifier {
    Let,
    Var,
}

impl BindingSpecifier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BindingSpecifier::Let => "let",
            BindingSpecifier::Var => "var",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub binding: BindingSpecifier,
    pub bindings: Vec<PatternBinding>,
    #[serde(default)]
    pub span: Option<Span>,
}

impl VariableDecl {
    /// `var name: ty = initializer`
    #[must_use]
    pub fn var(name: impl Into<String>, ty: Option<TypeExpr>, initializer: Option<Expr>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            binding: BindingSpecifier::Var,
            bindings: vec![PatternBinding {
                pattern: Pattern::Identifier { name: name.into() },
                type_annotation: ty,
                initializer,
                accessors: None,
            }],
            span: None,
        }
    }

    #[must_use]
    pub fn is_type_level(&self) -> bool {
        self.modifiers.iter().any(|modifier| modifier.is_type_level())
    }

    #[must_use]
    pub fn first_identifier(&self) -> Option<&str> {
        self.bindings
            .first()
            .and_then(|binding| binding.pattern.identifier())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBinding {
    pub pattern: Pattern,
    #[serde(default)]
    pub type_annotation: Option<TypeExpr>,
    #[serde(default)]
    pub initializer: Option<Expr>,
    #[serde(default)]
    pub accessors: Option<AccessorBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    Identifier { name: String },
    Tuple { elements: Vec<Pattern> },
    Wildcard,
}

impl Pattern {
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Pattern::Identifier { name } => Some(name),
            Pattern::Tuple { .. } | Pattern::Wildcard => None,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Identifier { name } => f.write_str(name),
            Pattern::Tuple { elements } => {
                f.write_str("(")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
            Pattern::Wildcard => f.write_str("_"),
        }
    }
}

/// Either `{ expr }` shorthand for a read-only computed property or a list of accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessorBlock {
    Getter { body: Block },
    Accessors { accessors: Vec<AccessorDecl> },
}

impl AccessorBlock {
    /// Returns `true` when the block computes the value rather than observing stored storage.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        match self {
            AccessorBlock::Getter { .. } => true,
            AccessorBlock::Accessors { accessors } => accessors
                .iter()
                .any(|accessor| matches!(accessor.kind, AccessorKind::Get | AccessorKind::Set)),
        }
    }

    #[must_use]
    pub fn has_observers(&self) -> bool {
        match self {
            AccessorBlock::Getter { .. } => false,
            AccessorBlock::Accessors { accessors } => accessors.iter().any(|accessor| {
                matches!(accessor.kind, AccessorKind::WillSet | AccessorKind::DidSet)
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorDecl {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub kind: AccessorKind,
    #[serde(default)]
    pub parameter: Option<String>,
    #[serde(default)]
    pub body: Option<Block>,
}

impl AccessorDecl {
    #[must_use]
    pub fn new(kind: AccessorKind, body: Block) -> Self {
        Self {
            attributes: Vec::new(),
            kind,
            parameter: None,
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    Init,
    Get,
    Set,
    WillSet,
    DidSet,
}

impl AccessorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccessorKind::Init => "init",
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::WillSet => "willSet",
            AccessorKind::DidSet => "didSet",
        }
    }
}

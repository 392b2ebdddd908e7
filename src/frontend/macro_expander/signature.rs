//! Calling-convention view of annotated declarations.

use crate::frontend::ast::{
    BindingSpecifier, ContainerDecl, FunctionDecl, Modifier, TypeExpr, VariableDecl,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Function,
    Property,
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// External label; `None` when written as `_`.
    pub label: Option<String>,
    pub binding: String,
    pub ty: TypeExpr,
    pub is_variadic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectFlags {
    pub is_async: bool,
    pub is_failable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierFlags {
    pub is_static: bool,
    pub is_final: bool,
    pub is_mutable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationDescriptor {
    pub kind: DeclarationKind,
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    /// Declared result (function) or value type (property); `None` means void-equivalent.
    pub return_type: Option<TypeExpr>,
    pub effects: EffectFlags,
    pub modifiers: ModifierFlags,
}

impl DeclarationDescriptor {
    #[must_use]
    pub fn return_shape(&self, core_module: &str) -> ReturnShape {
        return_shape(self.return_type.as_ref(), core_module)
    }
}

#[must_use]
pub fn describe_function(decl: &FunctionDecl) -> DeclarationDescriptor {
    let parameters = decl
        .signature
        .parameters
        .iter()
        .map(|parameter| ParameterDescriptor {
            label: parameter.external_label().map(str::to_string),
            binding: parameter.binding_name().to_string(),
            ty: parameter.ty.clone(),
            is_variadic: parameter.variadic,
        })
        .collect();
    DeclarationDescriptor {
        kind: DeclarationKind::Function,
        name: decl.name.clone(),
        parameters,
        return_type: decl.signature.return_type.clone(),
        effects: EffectFlags {
            is_async: decl.signature.effects.is_async,
            is_failable: decl.signature.effects.throws.is_some(),
        },
        modifiers: ModifierFlags {
            is_static: decl.is_type_level(),
            is_final: decl.has_modifier(Modifier::Final),
            is_mutable: decl.has_modifier(Modifier::Mutating),
        },
    }
}

/// Requires exactly one binding with an identifier pattern and an explicit type annotation.
#[must_use]
pub fn describe_property(decl: &VariableDecl) -> Option<DeclarationDescriptor> {
    let [binding] = decl.bindings.as_slice() else {
        return None;
    };
    let name = binding.pattern.identifier()?;
    let ty = binding.type_annotation.clone()?;
    Some(DeclarationDescriptor {
        kind: DeclarationKind::Property,
        name: name.to_string(),
        parameters: Vec::new(),
        return_type: Some(ty),
        effects: EffectFlags::default(),
        modifiers: ModifierFlags {
            is_static: decl.is_type_level(),
            is_final: decl.modifiers.contains(&Modifier::Final),
            is_mutable: decl.binding == BindingSpecifier::Var,
        },
    })
}

#[must_use]
pub fn describe_container(decl: &ContainerDecl) -> DeclarationDescriptor {
    DeclarationDescriptor {
        kind: DeclarationKind::Container,
        name: decl.name.clone(),
        parameters: Vec::new(),
        return_type: None,
        effects: EffectFlags::default(),
        modifiers: ModifierFlags {
            is_static: false,
            is_final: decl.is_final(),
            is_mutable: false,
        },
    }
}

/// What a call to the declaration hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    Void,
    /// Uninhabited: the call never returns, so nothing is returned either.
    Never,
    Value,
}

impl ReturnShape {
    #[must_use]
    pub fn returns_value(self) -> bool {
        matches!(self, ReturnShape::Value)
    }
}

/// Classify a return clause. `core_module` qualifies spellings like `Swift.Void`.
#[must_use]
pub fn return_shape(return_type: Option<&TypeExpr>, core_module: &str) -> ReturnShape {
    let Some(ty) = return_type else {
        return ReturnShape::Void;
    };
    match ty {
        TypeExpr::Tuple { elements } => match elements.as_slice() {
            [] => ReturnShape::Void,
            [single] if is_named(single, "Void", core_module) => ReturnShape::Void,
            _ => ReturnShape::Value,
        },
        TypeExpr::Verbatim { text } => verbatim_shape(text, core_module),
        _ if is_named(ty, "Void", core_module) => ReturnShape::Void,
        _ if is_named(ty, "Never", core_module) => ReturnShape::Never,
        _ => ReturnShape::Value,
    }
}

fn is_named(ty: &TypeExpr, name: &str, core_module: &str) -> bool {
    ty.is_path(&[name]) || ty.is_path(&[core_module, name])
}

fn verbatim_shape(text: &str, core_module: &str) -> ReturnShape {
    let compact: String = text.chars().filter(|ch| !ch.is_whitespace()).collect();
    let qualified_void = format!("{core_module}.Void");
    let inner = compact
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(&compact);
    if inner.is_empty() || inner == "Void" || inner == qualified_void {
        return ReturnShape::Void;
    }
    if compact == "Never" || compact == format!("{core_module}.Never") {
        return ReturnShape::Never;
    }
    ReturnShape::Value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{
        Block, EffectSpecifiers, Parameter, Pattern, PatternBinding, Signature, ThrowsSpecifier,
    };

    fn sample_function() -> FunctionDecl {
        FunctionDecl::new(
            "load",
            Signature::new(
                vec![
                    Parameter::new("from", TypeExpr::named("URL")).with_name("url"),
                    Parameter::new("_", TypeExpr::named("String"))
                        .with_name("tags")
                        .variadic(),
                ],
                EffectSpecifiers::new(true, Some(ThrowsSpecifier::Throws)),
                Some(TypeExpr::named("Data")),
            ),
            Some(Block::default()),
        )
    }

    #[test]
    fn function_descriptor_reads_labels_bindings_and_effects() {
        let descriptor = describe_function(&sample_function());
        assert_eq!(descriptor.kind, DeclarationKind::Function);
        assert_eq!(descriptor.parameters[0].label.as_deref(), Some("from"));
        assert_eq!(descriptor.parameters[0].binding, "url");
        assert_eq!(descriptor.parameters[1].label, None);
        assert!(descriptor.parameters[1].is_variadic);
        assert!(descriptor.effects.is_async && descriptor.effects.is_failable);
        assert_eq!(descriptor.return_shape("Swift"), ReturnShape::Value);
    }

    #[test]
    fn extraction_is_idempotent() {
        let function = sample_function();
        assert_eq!(describe_function(&function), describe_function(&function));
    }

    #[test]
    fn void_equivalent_spellings() {
        let void_spellings = [
            None,
            Some(TypeExpr::named("Void")),
            Some(TypeExpr::named("Swift.Void")),
            Some(TypeExpr::tuple(Vec::new())),
            Some(TypeExpr::tuple(vec![TypeExpr::named("Void")])),
            Some(TypeExpr::tuple(vec![TypeExpr::named("Swift.Void")])),
            Some(TypeExpr::Verbatim {
                text: "( Swift.Void )".into(),
            }),
        ];
        for spelling in &void_spellings {
            assert_eq!(
                return_shape(spelling.as_ref(), "Swift"),
                ReturnShape::Void,
                "{spelling:?}"
            );
        }
    }

    #[test]
    fn never_and_values_are_not_void() {
        assert_eq!(
            return_shape(Some(&TypeExpr::named("Swift.Never")), "Swift"),
            ReturnShape::Never
        );
        for value in [
            TypeExpr::named("Int"),
            TypeExpr::named("Foundation.Void"),
            TypeExpr::tuple(vec![TypeExpr::named("Void"), TypeExpr::named("Void")]),
            TypeExpr::optional(TypeExpr::named("Void")),
        ] {
            assert_eq!(return_shape(Some(&value), "Swift"), ReturnShape::Value, "{value}");
        }
    }

    #[test]
    fn property_descriptor_requires_single_typed_identifier() {
        let property = VariableDecl::var("count", Some(TypeExpr::named("Int")), None);
        let descriptor = describe_property(&property).expect("descriptor");
        assert_eq!(descriptor.name, "count");
        assert!(descriptor.modifiers.is_mutable);

        let untyped = VariableDecl::var("count", None, None);
        assert!(describe_property(&untyped).is_none());

        let mut tuple = property.clone();
        tuple.bindings[0].pattern = Pattern::Tuple {
            elements: vec![Pattern::Wildcard],
        };
        assert!(describe_property(&tuple).is_none());

        let mut pair = property;
        pair.bindings.push(PatternBinding {
            pattern: Pattern::Identifier { name: "b".into() },
            type_annotation: Some(TypeExpr::named("Int")),
            initializer: None,
            accessors: None,
        });
        assert!(describe_property(&pair).is_none());
    }
}

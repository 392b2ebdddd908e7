//! Hook slot types synthesised from declaration descriptors.

use crate::config::{ExpansionConfig, SetterHookStyle};
use crate::frontend::ast::{
    Decl, EffectSpecifiers, Expr, FunctionType, Modifier, ThrowsSpecifier, TypeExpr, VariableDecl,
};

use super::signature::DeclarationDescriptor;

/// An override point: `var <name>: (<ty>)? = nil`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookDescriptor {
    pub name: String,
    pub ty: FunctionType,
}

impl HookDescriptor {
    /// Hooks are optional; `nil` means no override is installed.
    #[must_use]
    pub fn slot_type(&self) -> TypeExpr {
        TypeExpr::optional(TypeExpr::Function(self.ty.clone()))
    }

    #[must_use]
    pub fn slot(&self) -> VariableDecl {
        VariableDecl::var(self.name.clone(), Some(self.slot_type()), Some(Expr::Nil))
    }
}

/// Hook for a function member. Variadic parameters become arrays; a missing return is `Void`.
#[must_use]
pub fn function_hook(descriptor: &DeclarationDescriptor, config: &ExpansionConfig) -> HookDescriptor {
    let parameters = descriptor
        .parameters
        .iter()
        .map(|parameter| {
            if parameter.is_variadic {
                TypeExpr::array(parameter.ty.clone())
            } else {
                parameter.ty.clone()
            }
        })
        .collect();
    let effects = EffectSpecifiers::new(
        descriptor.effects.is_async,
        descriptor
            .effects
            .is_failable
            .then_some(ThrowsSpecifier::Throws),
    );
    let return_type = descriptor
        .return_type
        .clone()
        .unwrap_or_else(TypeExpr::void);
    HookDescriptor {
        name: format!("{}{}", config.hook_prefix, descriptor.name),
        ty: FunctionType::new(parameters, effects, return_type),
    }
}

/// Backing storage plus the getter and setter hooks of a stubbed property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyHooks {
    pub backing_name: String,
    pub value_type: TypeExpr,
    pub getter: HookDescriptor,
    pub setter: HookDescriptor,
    pub setter_style: SetterHookStyle,
}

impl PropertyHooks {
    /// `private var _x: T [= initializer]` followed by the getter and setter hook slots.
    #[must_use]
    pub fn peers(&self, initializer: Option<Expr>) -> Vec<Decl> {
        let mut backing =
            VariableDecl::var(self.backing_name.clone(), Some(self.value_type.clone()), initializer);
        backing.modifiers.push(Modifier::Private);
        vec![
            Decl::Variable(backing),
            Decl::Variable(self.getter.slot()),
            Decl::Variable(self.setter.slot()),
        ]
    }
}

#[must_use]
pub fn property_hooks(descriptor: &DeclarationDescriptor, config: &ExpansionConfig) -> PropertyHooks {
    let value_type = descriptor
        .return_type
        .clone()
        .unwrap_or_else(|| TypeExpr::placeholder("Type"));
    let capitalised = capitalise_first(&descriptor.name);
    let getter = HookDescriptor {
        name: format!("{}{capitalised}", config.getter_prefix),
        ty: FunctionType::new(Vec::new(), EffectSpecifiers::NONE, value_type.clone()),
    };
    let setter_parameters = match config.setter_hook {
        SetterHookStyle::InOut => vec![TypeExpr::inout(value_type.clone()), value_type.clone()],
        SetterHookStyle::ValueOnly => vec![value_type.clone()],
    };
    let setter = HookDescriptor {
        name: format!("{}{capitalised}", config.setter_prefix),
        ty: FunctionType::new(setter_parameters, EffectSpecifiers::NONE, TypeExpr::void()),
    };
    PropertyHooks {
        backing_name: format!("{}{}", config.backing_prefix, descriptor.name),
        value_type,
        getter,
        setter,
        setter_style: config.setter_hook,
    }
}

/// Upper-cases the first character only: `myValue` becomes `MyValue`.
#[must_use]
pub fn capitalise_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

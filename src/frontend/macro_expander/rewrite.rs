//! Replacement bodies and accessors that consult hook slots before the original logic.

use crate::config::SetterHookStyle;
use crate::frontend::ast::{
    AccessorBlock, AccessorDecl, AccessorKind, Argument, Attribute, Block, Expr, FunctionDecl,
    Modifier, Statement,
};

use super::hook_type::{HookDescriptor, PropertyHooks};
use super::registry::MacroRegistry;
use super::signature::{DeclarationDescriptor, EffectFlags, ParameterDescriptor, ReturnShape};

const INITIAL_VALUE: &str = "initialValue";
const NEW_VALUE: &str = "newValue";

/// `try await <hook>(a, b)`: positional arguments, wrappers matching the effects.
#[must_use]
pub fn hook_call(hook: &HookDescriptor, descriptor: &DeclarationDescriptor) -> Expr {
    let arguments = descriptor
        .parameters
        .iter()
        .map(|parameter| Argument::positional(forwarded(parameter)))
        .collect();
    with_effects(
        Expr::call(Expr::identifier(&hook.name), arguments),
        descriptor.effects,
    )
}

/// `try await super.<name>(label: a, b)`: labels as declared.
#[must_use]
pub fn super_call(descriptor: &DeclarationDescriptor) -> Expr {
    let arguments = descriptor
        .parameters
        .iter()
        .map(|parameter| {
            let value = forwarded(parameter);
            match &parameter.label {
                Some(label) => Argument::labeled(label, value),
                None => Argument::positional(value),
            }
        })
        .collect();
    with_effects(
        Expr::call(Expr::member(Expr::Super, &descriptor.name), arguments),
        descriptor.effects,
    )
}

/// A parameter passed on unchanged; `inout` ones are handed over as `&name`.
fn forwarded(parameter: &ParameterDescriptor) -> Expr {
    let value = Expr::identifier(&parameter.binding);
    if parameter.ty.is_inout() {
        Expr::inout(value)
    } else {
        value
    }
}

fn with_effects(call: Expr, effects: EffectFlags) -> Expr {
    let mut expr = call;
    if effects.is_async {
        expr = Expr::await_(expr);
    }
    if effects.is_failable {
        expr = Expr::try_(expr);
    }
    expr
}

fn result_of(expr: Expr, shape: ReturnShape) -> Statement {
    if shape.returns_value() {
        Statement::return_value(expr)
    } else {
        Statement::expr(expr)
    }
}

fn branch_on(hook: &HookDescriptor, then_branch: Block, else_branch: Block) -> Block {
    Block::new(vec![Statement::IfLet {
        binding: hook.name.clone(),
        value: None,
        then_branch,
        else_branch: Some(else_branch),
    }])
}

/// New body for a stubbed function: the hook when installed, the original statements otherwise.
///
/// A single-expression body that produced the value implicitly gets an explicit `return`.
#[must_use]
pub fn function_body(
    function: &FunctionDecl,
    descriptor: &DeclarationDescriptor,
    hook: &HookDescriptor,
    core_module: &str,
) -> Block {
    let shape = descriptor.return_shape(core_module);
    let then_branch = Block::new(vec![result_of(hook_call(hook, descriptor), shape)]);
    let original = function.body.clone().unwrap_or_default();
    let else_branch = match original.single_expression() {
        Some(expr) if shape.returns_value() => {
            Block::new(vec![Statement::return_value(expr.clone())])
        }
        _ => original,
    };
    branch_on(hook, then_branch, else_branch)
}

/// `init` seeds the backing slot, `get`/`set` route through the hooks when installed.
#[must_use]
pub fn property_accessors(hooks: &PropertyHooks) -> AccessorBlock {
    let backing = || Expr::identifier(&hooks.backing_name);

    let mut init = AccessorDecl::new(
        AccessorKind::Init,
        Block::new(vec![Statement::expr(Expr::assign(
            backing(),
            Expr::identifier(INITIAL_VALUE),
        ))]),
    );
    init.parameter = Some(INITIAL_VALUE.to_string());
    init.attributes.push(
        Attribute::new("storageRestrictions")
            .with_arguments(format!("initializes: {}", hooks.backing_name)),
    );

    let get = AccessorDecl::new(
        AccessorKind::Get,
        branch_on(
            &hooks.getter,
            Block::new(vec![Statement::return_value(Expr::call(
                Expr::identifier(&hooks.getter.name),
                Vec::new(),
            ))]),
            Block::new(vec![Statement::return_value(backing())]),
        ),
    );

    let setter_arguments = match hooks.setter_style {
        SetterHookStyle::InOut => vec![
            Argument::positional(Expr::inout(backing())),
            Argument::positional(Expr::identifier(NEW_VALUE)),
        ],
        SetterHookStyle::ValueOnly => vec![Argument::positional(Expr::identifier(NEW_VALUE))],
    };
    let set = AccessorDecl::new(
        AccessorKind::Set,
        branch_on(
            &hooks.setter,
            Block::new(vec![Statement::expr(Expr::call(
                Expr::identifier(&hooks.setter.name),
                setter_arguments,
            ))]),
            Block::new(vec![Statement::expr(Expr::assign(
                backing(),
                Expr::identifier(NEW_VALUE),
            ))]),
        ),
    );

    AccessorBlock::Accessors {
        accessors: vec![init, get, set],
    }
}

/// Overriding method for a mock subclass. Registered annotations are not carried over.
#[must_use]
pub fn mock_override(
    function: &FunctionDecl,
    descriptor: &DeclarationDescriptor,
    hook: &HookDescriptor,
    registry: &MacroRegistry,
    core_module: &str,
) -> FunctionDecl {
    let shape = descriptor.return_shape(core_module);
    let body = branch_on(
        hook,
        Block::new(vec![result_of(hook_call(hook, descriptor), shape)]),
        Block::new(vec![result_of(super_call(descriptor), shape)]),
    );

    let mut modifiers = vec![Modifier::Override];
    modifiers.extend(
        function
            .modifiers
            .iter()
            .copied()
            .filter(|modifier| *modifier != Modifier::Override),
    );
    let attributes = function
        .attributes
        .iter()
        .filter(|attribute| registry.role_of(&attribute.name).is_none())
        .cloned()
        .collect();

    FunctionDecl {
        attributes,
        modifiers,
        name: function.name.clone(),
        generics: None,
        signature: function.signature.clone(),
        body: Some(body),
        span: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpansionConfig;
    use crate::format::render_decl;
    use crate::frontend::ast::{
        Decl, EffectSpecifiers, Parameter, Signature, ThrowsSpecifier, TypeExpr, VariableDecl,
    };
    use crate::frontend::macro_expander::hook_type::{function_hook, property_hooks};
    use crate::frontend::macro_expander::signature::{describe_function, describe_property};
    use expect_test::expect;

    fn rewritten(mut function: FunctionDecl) -> String {
        let config = ExpansionConfig::default();
        let descriptor = describe_function(&function);
        let hook = function_hook(&descriptor, &config);
        function.body = Some(function_body(&function, &descriptor, &hook, &config.core_module));
        render_decl(&Decl::Function(function), 4)
    }

    #[test]
    fn value_returning_async_throwing_function() {
        let function = FunctionDecl::new(
            "fetch",
            Signature::new(
                vec![
                    Parameter::new("for", TypeExpr::named("Int")).with_name("id"),
                    Parameter::new("_", TypeExpr::named("String"))
                        .with_name("tags")
                        .variadic(),
                ],
                EffectSpecifiers::new(true, Some(ThrowsSpecifier::Throws)),
                Some(TypeExpr::named("Item")),
            ),
            Some(Block::new(vec![Statement::expr(Expr::source(
                "try await store.load(id)",
            ))])),
        );
        expect![[r#"
            func fetch(for id: Int, _ tags: String...) async throws -> Item {
                if let _fetch {
                    return try await _fetch(id, tags)
                } else {
                    return try await store.load(id)
                }
            }"#]]
        .assert_eq(&rewritten(function));
    }

    #[test]
    fn void_function_keeps_its_statements() {
        let function = FunctionDecl::new(
            "reset",
            Signature::new(Vec::new(), EffectSpecifiers::NONE, Some(TypeExpr::named("Swift.Void"))),
            Some(Block::new(vec![Statement::expr(Expr::source("count = 0"))])),
        );
        expect![[r#"
            func reset() -> Swift.Void {
                if let _reset {
                    _reset()
                } else {
                    count = 0
                }
            }"#]]
        .assert_eq(&rewritten(function));
    }

    #[test]
    fn never_returning_function_emits_no_return() {
        let function = FunctionDecl::new(
            "crash",
            Signature::new(Vec::new(), EffectSpecifiers::NONE, Some(TypeExpr::named("Never"))),
            Some(Block::new(vec![Statement::expr(Expr::source("fatalError()"))])),
        );
        expect![[r#"
            func crash() -> Never {
                if let _crash {
                    _crash()
                } else {
                    fatalError()
                }
            }"#]]
        .assert_eq(&rewritten(function));
    }

    #[test]
    fn multi_statement_bodies_are_left_untouched() {
        let statements = vec![
            Statement::source("let doubled = value * 2"),
            Statement::return_value(Expr::identifier("doubled")),
        ];
        let function = FunctionDecl::new(
            "double",
            Signature::new(
                vec![Parameter::new("value", TypeExpr::named("Int"))],
                EffectSpecifiers::NONE,
                Some(TypeExpr::named("Int")),
            ),
            Some(Block::new(statements)),
        );
        expect![[r#"
            func double(value: Int) -> Int {
                if let _double {
                    return _double(value)
                } else {
                    let doubled = value * 2
                    return doubled
                }
            }"#]]
        .assert_eq(&rewritten(function));
    }

    #[test]
    fn property_accessor_triplet() {
        let property = VariableDecl::var("count", Some(TypeExpr::named("Int")), None);
        let descriptor = describe_property(&property).expect("descriptor");
        let hooks = property_hooks(&descriptor, &ExpansionConfig::default());
        let mut rewritten = property.clone();
        rewritten.bindings[0].accessors = Some(property_accessors(&hooks));
        expect![[r#"
            var count: Int {
                @storageRestrictions(initializes: _count)
                init(initialValue) {
                    _count = initialValue
                }
                get {
                    if let _getCount {
                        return _getCount()
                    } else {
                        return _count
                    }
                }
                set {
                    if let _setCount {
                        _setCount(&_count, newValue)
                    } else {
                        _count = newValue
                    }
                }
            }"#]]
        .assert_eq(&render_decl(&Decl::Variable(rewritten), 4));
    }

    #[test]
    fn inout_parameters_are_forwarded_by_reference() {
        let mut function = FunctionDecl::new(
            "bump",
            Signature::new(
                vec![
                    Parameter::new("_", TypeExpr::inout(TypeExpr::named("Int"))).with_name("x"),
                    Parameter::new("by", TypeExpr::named("Int")).with_name("step"),
                ],
                EffectSpecifiers::NONE,
                None,
            ),
            Some(Block::new(vec![Statement::source("x += step")])),
        );
        expect![[r#"
            func bump(_ x: inout Int, by step: Int) {
                if let _bump {
                    _bump(&x, step)
                } else {
                    x += step
                }
            }"#]]
        .assert_eq(&rewritten(function.clone()));

        let config = ExpansionConfig::default();
        let descriptor = describe_function(&function);
        let hook = function_hook(&descriptor, &config);
        assert_eq!(hook.slot_type().to_string(), "((inout Int, Int) -> Void)?");
        let registry = MacroRegistry::with_builtins();
        function = mock_override(&function, &descriptor, &hook, &registry, "Swift");
        expect![[r#"
            override func bump(_ x: inout Int, by step: Int) {
                if let _bump {
                    _bump(&x, step)
                } else {
                    super.bump(&x, by: step)
                }
            }"#]]
        .assert_eq(&render_decl(&Decl::Function(function), 4));
    }

    #[test]
    fn mock_override_delegates_to_super_with_labels() {
        let mut function = FunctionDecl::new(
            "save",
            Signature::new(
                vec![
                    Parameter::new("_", TypeExpr::named("Item")).with_name("item"),
                    Parameter::new("to", TypeExpr::named("URL")).with_name("url"),
                ],
                EffectSpecifiers::new(false, Some(ThrowsSpecifier::Throws)),
                Some(TypeExpr::named("Bool")),
            ),
            Some(Block::new(vec![Statement::source("true")])),
        );
        function.modifiers.push(Modifier::Public);
        function.attributes.push(Attribute::new("discardableResult"));
        function.attributes.push(Attribute::new("StubbableFunction"));

        let config = ExpansionConfig::default();
        let descriptor = describe_function(&function);
        let hook = function_hook(&descriptor, &config);
        let registry = MacroRegistry::with_builtins();
        let overriding = mock_override(&function, &descriptor, &hook, &registry, "Swift");
        expect![[r#"
            @discardableResult
            override public func save(_ item: Item, to url: URL) throws -> Bool {
                if let _save {
                    return try _save(item, url)
                } else {
                    return try super.save(item, to: url)
                }
            }"#]]
        .assert_eq(&render_decl(&Decl::Function(overriding), 4));
    }
}

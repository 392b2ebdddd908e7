use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use hookwright::ExpansionConfig;
use hookwright::format::render_module;
use hookwright::frontend::ast::{
    Attribute, Block, ContainerDecl, ContainerKind, Decl, EffectSpecifiers, Expr, FunctionDecl,
    Item, Module, Parameter, Signature, Statement, ThrowsSpecifier, TypeExpr, VariableDecl,
};
use hookwright::frontend::macro_expander::{MacroRegistry, expand_module};

fn sample_module(members: usize) -> Module {
    let mut service = ContainerDecl::new(ContainerKind::Class, "Service");
    service.attributes.push(Attribute::new("Stubbable"));
    service.attributes.push(Attribute::new("Mockable"));
    for index in 0..members {
        let function = FunctionDecl::new(
            format!("fetch{index}"),
            Signature::new(
                vec![Parameter::new("for", TypeExpr::named("Int")).with_name("id")],
                EffectSpecifiers::new(true, Some(ThrowsSpecifier::Throws)),
                Some(TypeExpr::named("String")),
            ),
            Some(Block::new(vec![Statement::expr(Expr::source(
                "try await client.get(id)",
            ))])),
        );
        let property = VariableDecl::var(
            format!("value{index}"),
            Some(TypeExpr::named("Int")),
            Some(Expr::source("0")),
        );
        service
            .members
            .push(Item::spaced(Decl::Function(function), 2));
        service
            .members
            .push(Item::spaced(Decl::Variable(property), 2));
    }
    let mut module = Module::new();
    module.push_item(Decl::Container(service));
    module
}

fn bench_expand(c: &mut Criterion) {
    let registry = MacroRegistry::with_builtins();
    let config = ExpansionConfig::default();
    let template = sample_module(32);

    c.bench_function("expand_container", |b| {
        b.iter(|| {
            let mut module = template.clone();
            let result = expand_module(black_box(&mut module), &registry, &config);
            black_box((module, result.hooks_synthesized));
        })
    });

    let mut expanded = template.clone();
    let _ = expand_module(&mut expanded, &registry, &config);
    c.bench_function("render_expanded", |b| {
        b.iter(|| {
            let rendered = render_module(black_box(&expanded), config.indent_width);
            black_box(rendered);
        })
    });
}

criterion_group!(expand, bench_expand);
criterion_main!(expand);

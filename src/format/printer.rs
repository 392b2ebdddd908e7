use crate::frontend::ast::{
    AccessorBlock, AccessorDecl, Attribute, Block, ContainerDecl, Decl, Expr, FunctionDecl,
    InitializerDecl, Modifier, Module, Parameter, Statement, VariableDecl,
};

/// Render a whole module, separating top-level items by their recorded spacing.
#[must_use]
pub fn render_module(module: &Module, indent_width: usize) -> String {
    let mut printer = Printer::new(indent_width);
    for (index, item) in module.items.iter().enumerate() {
        if index > 0 {
            printer.newlines(item.leading_newlines.max(1));
        }
        printer.decl(&item.decl);
    }
    printer.finish()
}

/// Render a single declaration at column zero without a trailing newline.
#[must_use]
pub fn render_decl(decl: &Decl, indent_width: usize) -> String {
    let mut printer = Printer::new(indent_width);
    printer.decl(decl);
    printer.out
}

#[must_use]
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Identifier { name } => name.clone(),
        Expr::Member { base, name } => format!("{}.{name}", render_expr(base)),
        Expr::Super => "super".to_string(),
        Expr::Call { callee, arguments } => {
            let args = arguments
                .iter()
                .map(|argument| match &argument.label {
                    Some(label) => format!("{label}: {}", render_expr(&argument.value)),
                    None => render_expr(&argument.value),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({args})", render_expr(callee))
        }
        Expr::Try { inner } => format!("try {}", render_expr(inner)),
        Expr::Await { inner } => format!("await {}", render_expr(inner)),
        Expr::InOut { inner } => format!("&{}", render_expr(inner)),
        Expr::Assign { target, value } => {
            format!("{} = {}", render_expr(target), render_expr(value))
        }
        Expr::Nil => "nil".to_string(),
        Expr::Source { text } => text.clone(),
    }
}

#[must_use]
pub fn render_parameter(parameter: &Parameter) -> String {
    let mut text = match &parameter.name {
        Some(name) => format!("{} {name}: {}", parameter.label, parameter.ty),
        None => format!("{}: {}", parameter.label, parameter.ty),
    };
    if parameter.variadic {
        text.push_str("...");
    }
    if let Some(default) = &parameter.default {
        text.push_str(" = ");
        text.push_str(&render_expr(default));
    }
    text
}

struct Printer {
    indent_width: usize,
    level: usize,
    out: String,
}

impl Printer {
    fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            level: 0,
            out: String::new(),
        }
    }

    fn finish(mut self) -> String {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.out
    }

    fn newlines(&mut self, count: usize) {
        for _ in 0..count {
            self.out.push('\n');
        }
    }

    fn start_line(&mut self) {
        let width = self.level * self.indent_width;
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn attributes(&mut self, attributes: &[Attribute]) {
        for attribute in attributes {
            self.start_line();
            self.push(&attribute.to_string());
            self.out.push('\n');
        }
    }

    fn modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.push(modifier.as_str());
            self.out.push(' ');
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Container(container) => self.container(container),
            Decl::Function(function) => self.function(function),
            Decl::Variable(variable) => self.variable(variable),
            Decl::Initializer(init) => self.initializer(init),
            Decl::Deinitializer(deinit) => {
                self.attributes(&deinit.attributes);
                self.start_line();
                self.push("deinit");
                if let Some(body) = &deinit.body {
                    self.push(" ");
                    self.block(body);
                }
            }
            Decl::Verbatim(verbatim) => self.verbatim(&verbatim.text),
        }
    }

    fn container(&mut self, decl: &ContainerDecl) {
        self.attributes(&decl.attributes);
        self.start_line();
        self.modifiers(&decl.modifiers);
        self.push(&format!("{} {}", decl.kind, decl.name));
        if let Some(generics) = &decl.generics {
            self.push(&generics.to_string());
        }
        if !decl.inheritance.is_empty() {
            let inheritance = decl
                .inheritance
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.push(&format!(": {inheritance}"));
        }
        if decl.members.is_empty() {
            self.push(" {}");
            return;
        }
        self.push(" {");
        self.level += 1;
        for member in &decl.members {
            self.newlines(member.leading_newlines.max(1));
            self.decl(&member.decl);
        }
        self.level -= 1;
        self.out.push('\n');
        self.start_line();
        self.push("}");
    }

    fn function(&mut self, decl: &FunctionDecl) {
        self.attributes(&decl.attributes);
        self.start_line();
        self.modifiers(&decl.modifiers);
        self.push("func ");
        self.push(&decl.name);
        if let Some(generics) = &decl.generics {
            self.push(&generics.to_string());
        }
        self.parameters(&decl.signature.parameters);
        self.push(&decl.signature.effects.to_string());
        if let Some(return_type) = &decl.signature.return_type {
            self.push(&format!(" -> {return_type}"));
        }
        if let Some(body) = &decl.body {
            self.push(" ");
            self.block(body);
        }
    }

    fn initializer(&mut self, decl: &InitializerDecl) {
        self.attributes(&decl.attributes);
        self.start_line();
        self.modifiers(&decl.modifiers);
        self.push(if decl.failable { "init?" } else { "init" });
        self.parameters(&decl.parameters);
        self.push(&decl.effects.to_string());
        if let Some(body) = &decl.body {
            self.push(" ");
            self.block(body);
        }
    }

    fn parameters(&mut self, parameters: &[Parameter]) {
        let rendered = parameters
            .iter()
            .map(render_parameter)
            .collect::<Vec<_>>()
            .join(", ");
        self.push(&format!("({rendered})"));
    }

    fn variable(&mut self, decl: &VariableDecl) {
        self.attributes(&decl.attributes);
        self.start_line();
        self.modifiers(&decl.modifiers);
        self.push(decl.binding.as_str());
        self.push(" ");
        for (index, binding) in decl.bindings.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.push(&binding.pattern.to_string());
            if let Some(ty) = &binding.type_annotation {
                self.push(&format!(": {ty}"));
            }
            if let Some(initializer) = &binding.initializer {
                self.push(&format!(" = {}", render_expr(initializer)));
            }
            if let Some(accessors) = &binding.accessors {
                self.push(" ");
                self.accessor_block(accessors);
            }
        }
    }

    fn accessor_block(&mut self, accessors: &AccessorBlock) {
        match accessors {
            AccessorBlock::Getter { body } => self.block(body),
            AccessorBlock::Accessors { accessors } => {
                self.push("{");
                self.level += 1;
                for accessor in accessors {
                    self.out.push('\n');
                    self.accessor(accessor);
                }
                self.level -= 1;
                self.out.push('\n');
                self.start_line();
                self.push("}");
            }
        }
    }

    fn accessor(&mut self, accessor: &AccessorDecl) {
        self.attributes(&accessor.attributes);
        self.start_line();
        self.push(accessor.kind.as_str());
        if let Some(parameter) = &accessor.parameter {
            self.push(&format!("({parameter})"));
        }
        if let Some(body) = &accessor.body {
            self.push(" ");
            self.block(body);
        }
    }

    fn block(&mut self, block: &Block) {
        if block.statements.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.level += 1;
        for statement in &block.statements {
            self.out.push('\n');
            self.statement(statement);
        }
        self.level -= 1;
        self.out.push('\n');
        self.start_line();
        self.push("}");
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expression { expr } => {
                self.start_line();
                self.push(&render_expr(expr));
            }
            Statement::Return { value } => {
                self.start_line();
                match value {
                    Some(value) => self.push(&format!("return {}", render_expr(value))),
                    None => self.push("return"),
                }
            }
            Statement::IfLet {
                binding,
                value,
                then_branch,
                else_branch,
            } => {
                self.start_line();
                self.push(&format!("if let {binding}"));
                if let Some(value) = value {
                    self.push(&format!(" = {}", render_expr(value)));
                }
                self.push(" ");
                self.block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.push(" else ");
                    self.block(else_branch);
                }
            }
            Statement::Source { text } => self.verbatim(text),
        }
    }

    fn verbatim(&mut self, text: &str) {
        for (index, line) in text.lines().enumerate() {
            if index > 0 {
                self.out.push('\n');
            }
            if !line.trim().is_empty() {
                self.start_line();
                self.push(line.trim_end());
            }
        }
    }
}

use serde::{Deserialize, Serialize};

/// Expression forms the expander needs to read and synthesise.
///
/// Anything else the host hands over arrives as [`Expr::Source`] and is printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Identifier {
        name: String,
    },
    Member {
        base: Box<Expr>,
        name: String,
    },
    Super,
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    Try {
        inner: Box<Expr>,
    },
    Await {
        inner: Box<Expr>,
    },
    /// `&value`
    InOut {
        inner: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Nil,
    Source {
        text: String,
    },
}

impl Expr {
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    #[must_use]
    pub fn source(text: impl Into<String>) -> Self {
        Self::Source { text: text.into() }
    }

    #[must_use]
    pub fn member(base: Expr, name: impl Into<String>) -> Self {
        Self::Member {
            base: Box::new(base),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn call(callee: Expr, arguments: Vec<Argument>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    #[must_use]
    pub fn try_(inner: Expr) -> Self {
        Self::Try {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn await_(inner: Expr) -> Self {
        Self::Await {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn inout(inner: Expr) -> Self {
        Self::InOut {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }
}

/// Call argument; `label` is `None` for positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub label: Option<String>,
    pub value: Expr,
}

impl Argument {
    #[must_use]
    pub fn positional(value: Expr) -> Self {
        Self { label: None, value }
    }

    #[must_use]
    pub fn labeled(label: impl Into<String>, value: Expr) -> Self {
        Self {
            label: Some(label.into()),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Expression {
        expr: Expr,
    },
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },
    /// `if let binding [= value] { .. } else { .. }`
    IfLet {
        binding: String,
        #[serde(default)]
        value: Option<Expr>,
        then_branch: Block,
        #[serde(default)]
        else_branch: Option<Block>,
    },
    Source {
        text: String,
    },
}

impl Statement {
    #[must_use]
    pub fn expr(expr: Expr) -> Self {
        Self::Expression { expr }
    }

    #[must_use]
    pub fn return_value(value: Expr) -> Self {
        Self::Return { value: Some(value) }
    }

    #[must_use]
    pub fn source(text: impl Into<String>) -> Self {
        Self::Source { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Block {
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Returns the expression when the block consists of exactly one expression statement.
    #[must_use]
    pub fn single_expression(&self) -> Option<&Expr> {
        match self.statements.as_slice() {
            [Statement::Expression { expr }] => Some(expr),
            _ => None,
        }
    }
}

//! Syntax tree model and the annotation expander that rewrites it.

pub mod ast;
pub mod macro_expander;

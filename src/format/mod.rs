//! Source printer for expanded syntax trees.
//!
//! Used by the CLI to emit source text, by fix-it suggestions to spell
//! replacement declarations, and by snapshot tests.

pub mod printer;

pub use printer::{render_decl, render_expr, render_module, render_parameter};

//! Syntax tree exchanged with the host compiler.
//!
//! Every node is a closed variant with its own payload so the expander can
//! match on declaration kinds directly; the host serialises the tree to JSON
//! and receives the expanded tree back in the same shape.

pub mod expressions;
pub mod items;
pub mod types;

pub use self::{expressions::*, items::*, types::*};

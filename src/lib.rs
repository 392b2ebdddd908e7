#![deny(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Compile-time stubbing and mocking expansion over a serializable Swift syntax tree.
//!
//! Hosts hand over a [`frontend::ast::Module`]; [`frontend::macro_expander::expand_module`]
//! rewrites annotated declarations in place and returns diagnostics for everything it rejected.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod frontend;
pub mod logging;

pub use config::{ExpansionConfig, SetterHookStyle};
pub use error::{Error, Result};
pub use frontend::macro_expander::{MacroExpansionResult, MacroRegistry, expand_module};

//! Kiln compiler driver.
//!
//! A [`Compilation`] is one snippet of source plus an optional predecessor.
//! Chaining snippets with [`Compilation::continue_with`] lets later ones
//! see the variables earlier ones declared, which is how a REPL-style
//! session carries state from line to line.

pub mod commands;
mod compilation;
mod logging;

pub use compilation::{Backend, Compilation, EmitResult, EvaluationResult};
pub use logging::init_tracing;

pub use kiln_eval::{Console, EvalError, InternalError};
pub use kiln_ir::{Value, Variables};
pub use kiln_parse::SyntaxTree;

//! Runtime support shared by both Kiln backends, plus the tree-walking
//! evaluator.
//!
//! - [`Builtin`]: the closed table of native routines and the name
//!   mangling both backends use to reach it
//! - [`Console`]: where `print` writes and `input` reads
//! - [`EvalError`], [`InternalError`]: runtime and invariant failures
//! - [`evaluate`]: program-counter interpreter over a lowered block

mod builtins;
mod console;
mod errors;
mod evaluator;

pub use builtins::{mangle, Builtin};
pub use console::{BufferConsole, Console};
pub use errors::{EvalError, InternalError};
pub use evaluator::{evaluate, Evaluator};

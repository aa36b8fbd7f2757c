//! User-facing diagnostics for Kiln.
//!
//! Diagnostics are produced by the lexer, parser and binder. Evaluation
//! never creates them; a session refuses to evaluate while any are present
//! and hands them back verbatim.

mod bag;
mod diagnostic;
mod error_code;
pub mod span_utils;

pub use bag::DiagnosticBag;
pub use diagnostic::{Diagnostic, Label, Located};
pub use error_code::ErrorCode;

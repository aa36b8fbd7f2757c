//! Kiln IR - shared data types for every phase of the Kiln compiler.
//!
//! # Layers
//!
//! - [`Span`], [`Token`], [`TokenKind`]: source positions and lexer output
//! - [`ast`]: the syntax tree produced by `kiln_parse`
//! - [`TypeSymbol`], [`VariableSymbol`], [`FunctionSymbol`]: resolved symbols
//! - [`Value`]: the runtime value shared by both evaluators
//! - [`bound`]: the typed, immutable bound tree consumed by the lowerer,
//!   the tree-walking evaluator and the compiled backend
//!
//! The bound tree is the single contract surface between the two
//! evaluators: both dispatch on the same node kinds and the same resolved
//! operator descriptors.

pub mod ast;
pub mod bound;
mod span;
mod symbols;
mod token;
mod types;
mod value;

pub use span::Span;
pub use symbols::{builtins, FunctionSymbol, ParameterSymbol, VariableSymbol, Variables};
pub use token::{Token, TokenKind};
pub use types::TypeSymbol;
pub use value::Value;

//! Runtime and internal error types.
//!
//! Neither backend recovers from any of these: the first one ends the
//! evaluation and is returned to the caller.

use kiln_ir::bound::BoundLabel;
use kiln_ir::TypeSymbol;

/// A broken invariant between phases. Seeing one means the binder,
/// lowerer or emitter produced something the next phase cannot accept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("unexpected {kind} reached the {phase}")]
    UnexpectedNode {
        phase: &'static str,
        kind: &'static str,
    },
    #[error("no built-in routine named `{0}`")]
    UnknownBuiltin(String),
    #[error("jump to {0}, which is never marked")]
    UnmarkedLabel(BoundLabel),
    #[error("operand of type {found} where {expected} was expected")]
    OperandType {
        expected: TypeSymbol,
        found: TypeSymbol,
    },
    #[error("invalid compiled program: {0}")]
    InvalidProgram(String),
}

/// A failure while running a program.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("cannot convert \"{text}\" to {target}")]
    InvalidConversion { text: String, target: TypeSymbol },
    #[error("variable `{variable}` holds a {found} value but is declared {expected}")]
    InvalidCast {
        variable: String,
        expected: TypeSymbol,
        found: TypeSymbol,
    },
    #[error("rnd bound must not be negative, got {0}")]
    NegativeRandomBound(i32),
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

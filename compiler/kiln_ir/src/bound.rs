//! The bound tree: typed, immutable intermediate representation.
//!
//! Produced by `kiln_bind`, rewritten (never mutated) by `kiln_lower`, and
//! consumed by the tree-walking evaluator in `kiln_eval` and the emitter in
//! `kiln_emit`. Every consumer matches exhaustively on [`BoundStatement`]
//! and [`BoundExpr`], so adding a node kind is a compile error until all
//! of them handle it.
//!
//! # Statement kinds by phase
//!
//! | Kind | Bound | Lowered | Host-lowered |
//! |------|-------|---------|--------------|
//! | `Block` | yes | root only | root only |
//! | `If`, `While`, `DoWhile`, `For` | yes | no | no |
//! | `VariableDeclaration`, `Expression` | yes | yes | yes |
//! | `Goto`, `ConditionalGoto`, `Label` | no | yes | yes |
//! | `AssignResult` | no | no | yes |

mod operators;
mod printer;

use std::fmt;

pub use operators::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind,
};

use crate::{FunctionSymbol, TypeSymbol, Value, VariableSymbol};

/// A control-flow target. Labels never carry values and are unique within
/// one lowered program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundLabel(u32);

impl BoundLabel {
    /// Label number `id`; the lowerer numbers from 1.
    #[inline]
    pub const fn new(id: u32) -> Self {
        BoundLabel(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label{}", self.0)
    }
}

/// A sequence of statements.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BoundBlock {
    pub statements: Vec<BoundStatement>,
}

impl BoundBlock {
    /// Wrap `statements` in a block.
    pub fn new(statements: Vec<BoundStatement>) -> Self {
        BoundBlock { statements }
    }
}

/// A type-checked statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundStatement {
    Block(BoundBlock),
    VariableDeclaration {
        variable: VariableSymbol,
        initializer: BoundExpr,
    },
    Expression(BoundExpr),
    If {
        condition: BoundExpr,
        then_branch: Box<BoundStatement>,
        else_branch: Option<Box<BoundStatement>>,
    },
    While {
        condition: BoundExpr,
        body: Box<BoundStatement>,
    },
    DoWhile {
        body: Box<BoundStatement>,
        condition: BoundExpr,
    },
    For {
        variable: VariableSymbol,
        lower: BoundExpr,
        upper: BoundExpr,
        body: Box<BoundStatement>,
    },
    Goto(BoundLabel),
    ConditionalGoto {
        label: BoundLabel,
        condition: BoundExpr,
        jump_if_true: bool,
    },
    Label(BoundLabel),
    /// Store the value left by the preceding expression statement into the
    /// routine's result slot, boxing it according to `ty` unless void.
    AssignResult(TypeSymbol),
}

impl BoundStatement {
    /// Kind name for internal error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundStatement::Block(_) => "block statement",
            BoundStatement::VariableDeclaration { .. } => "variable declaration",
            BoundStatement::Expression(_) => "expression statement",
            BoundStatement::If { .. } => "if statement",
            BoundStatement::While { .. } => "while statement",
            BoundStatement::DoWhile { .. } => "do-while statement",
            BoundStatement::For { .. } => "for statement",
            BoundStatement::Goto(_) => "goto statement",
            BoundStatement::ConditionalGoto { .. } => "conditional goto statement",
            BoundStatement::Label(_) => "label statement",
            BoundStatement::AssignResult(_) => "assign-result statement",
        }
    }
}

/// A type-checked expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundExpr {
    /// An expression that failed to bind; a diagnostic was reported.
    Error,
    Literal(Value),
    Variable(VariableSymbol),
    Assignment {
        variable: VariableSymbol,
        value: Box<BoundExpr>,
    },
    Unary {
        op: BoundUnaryOperator,
        operand: Box<BoundExpr>,
    },
    Binary {
        left: Box<BoundExpr>,
        op: BoundBinaryOperator,
        right: Box<BoundExpr>,
    },
    Call {
        function: FunctionSymbol,
        arguments: Vec<BoundExpr>,
    },
    Conversion {
        ty: TypeSymbol,
        expression: Box<BoundExpr>,
    },
}

impl BoundExpr {
    /// Resolved static type.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpr::Error => TypeSymbol::Error,
            BoundExpr::Literal(value) => value.ty(),
            BoundExpr::Variable(variable) => variable.ty(),
            BoundExpr::Assignment { value, .. } => value.ty(),
            BoundExpr::Unary { op, .. } => op.result_type,
            BoundExpr::Binary { op, .. } => op.result_type,
            BoundExpr::Call { function, .. } => function.ty,
            BoundExpr::Conversion { ty, .. } => *ty,
        }
    }

    /// Kind name for internal error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundExpr::Error => "error expression",
            BoundExpr::Literal(_) => "literal expression",
            BoundExpr::Variable(_) => "variable expression",
            BoundExpr::Assignment { .. } => "assignment expression",
            BoundExpr::Unary { .. } => "unary expression",
            BoundExpr::Binary { .. } => "binary expression",
            BoundExpr::Call { .. } => "call expression",
            BoundExpr::Conversion { .. } => "conversion expression",
        }
    }

    /// Literal expression for anything convertible to a [`Value`].
    pub fn literal(value: impl Into<Value>) -> Self {
        BoundExpr::Literal(value.into())
    }
}

#[cfg(test)]
mod tests;

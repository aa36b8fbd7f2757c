//! Resolved operator descriptors.
//!
//! The binder resolves each syntactic operator against its operand types
//! once; evaluators dispatch on the descriptor's `kind` and never look at
//! syntax again.

use crate::ast::{BinaryOp, UnaryOp};
use crate::TypeSymbol;

/// What a unary operator computes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

/// A unary operator resolved against its operand type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundUnaryOperator {
    pub syntax: UnaryOp,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(
        syntax: UnaryOp,
        kind: BoundUnaryOperatorKind,
        operand_type: TypeSymbol,
        result_type: TypeSymbol,
    ) -> Self {
        BoundUnaryOperator {
            syntax,
            kind,
            operand_type,
            result_type,
        }
    }

    /// Resolve `syntax` applied to an operand of type `operand`.
    pub fn bind(syntax: UnaryOp, operand: TypeSymbol) -> Option<Self> {
        UNARY_OPERATORS
            .iter()
            .find(|op| op.syntax == syntax && op.operand_type == operand)
            .copied()
    }
}

static UNARY_OPERATORS: [BoundUnaryOperator; 4] = {
    use BoundUnaryOperatorKind as K;
    use TypeSymbol::{Bool, Int};
    [
        BoundUnaryOperator::new(UnaryOp::Not, K::LogicalNegation, Bool, Bool),
        BoundUnaryOperator::new(UnaryOp::Plus, K::Identity, Int, Int),
        BoundUnaryOperator::new(UnaryOp::Neg, K::Negation, Int, Int),
        BoundUnaryOperator::new(UnaryOp::BitNot, K::OnesComplement, Int, Int),
    ]
};

/// What a binary operator computes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Concatenation,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

/// A binary operator resolved against both operand types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundBinaryOperator {
    pub syntax: BinaryOp,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundBinaryOperator {
    /// `int + int`, used by the lowerer for loop increments.
    pub const INT_ADDITION: Self = Self::same(
        BinaryOp::Add,
        BoundBinaryOperatorKind::Addition,
        TypeSymbol::Int,
        TypeSymbol::Int,
    );

    /// `int <= int`, used by the lowerer for loop conditions.
    pub const INT_LESS_OR_EQUALS: Self = Self::same(
        BinaryOp::LtEq,
        BoundBinaryOperatorKind::LessOrEquals,
        TypeSymbol::Int,
        TypeSymbol::Bool,
    );

    /// Operator whose operands share one type.
    const fn same(
        syntax: BinaryOp,
        kind: BoundBinaryOperatorKind,
        operand_type: TypeSymbol,
        result_type: TypeSymbol,
    ) -> Self {
        BoundBinaryOperator {
            syntax,
            kind,
            left_type: operand_type,
            right_type: operand_type,
            result_type,
        }
    }

    /// Resolve `syntax` applied to operands of types `left` and `right`.
    pub fn bind(syntax: BinaryOp, left: TypeSymbol, right: TypeSymbol) -> Option<Self> {
        BINARY_OPERATORS
            .iter()
            .find(|op| op.syntax == syntax && op.left_type == left && op.right_type == right)
            .copied()
    }
}

static BINARY_OPERATORS: [BoundBinaryOperator; 23] = {
    use BinaryOp as B;
    use BoundBinaryOperatorKind as K;
    use TypeSymbol::{Bool, Int, String};
    [
        BoundBinaryOperator::INT_ADDITION,
        BoundBinaryOperator::same(B::Sub, K::Subtraction, Int, Int),
        BoundBinaryOperator::same(B::Mul, K::Multiplication, Int, Int),
        BoundBinaryOperator::same(B::Div, K::Division, Int, Int),
        BoundBinaryOperator::same(B::BitAnd, K::BitwiseAnd, Int, Int),
        BoundBinaryOperator::same(B::BitOr, K::BitwiseOr, Int, Int),
        BoundBinaryOperator::same(B::BitXor, K::BitwiseXor, Int, Int),
        BoundBinaryOperator::same(B::Eq, K::Equals, Int, Bool),
        BoundBinaryOperator::same(B::NotEq, K::NotEquals, Int, Bool),
        BoundBinaryOperator::same(B::Lt, K::Less, Int, Bool),
        BoundBinaryOperator::INT_LESS_OR_EQUALS,
        BoundBinaryOperator::same(B::Gt, K::Greater, Int, Bool),
        BoundBinaryOperator::same(B::GtEq, K::GreaterOrEquals, Int, Bool),
        BoundBinaryOperator::same(B::And, K::LogicalAnd, Bool, Bool),
        BoundBinaryOperator::same(B::Or, K::LogicalOr, Bool, Bool),
        BoundBinaryOperator::same(B::BitAnd, K::BitwiseAnd, Bool, Bool),
        BoundBinaryOperator::same(B::BitOr, K::BitwiseOr, Bool, Bool),
        BoundBinaryOperator::same(B::BitXor, K::BitwiseXor, Bool, Bool),
        BoundBinaryOperator::same(B::Eq, K::Equals, Bool, Bool),
        BoundBinaryOperator::same(B::NotEq, K::NotEquals, Bool, Bool),
        BoundBinaryOperator::same(B::Add, K::Concatenation, String, String),
        BoundBinaryOperator::same(B::Eq, K::Equals, String, Bool),
        BoundBinaryOperator::same(B::NotEq, K::NotEquals, String, Bool),
    ]
};

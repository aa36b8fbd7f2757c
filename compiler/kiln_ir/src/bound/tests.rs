use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{BinaryOp, UnaryOp};
use crate::builtins;

fn int_var(name: &str) -> VariableSymbol {
    VariableSymbol::new(name, false, TypeSymbol::Int)
}

#[test]
fn binary_operators_resolve_by_operand_types() {
    let add = BoundBinaryOperator::bind(BinaryOp::Add, TypeSymbol::Int, TypeSymbol::Int);
    assert_eq!(add, Some(BoundBinaryOperator::INT_ADDITION));

    let concat = BoundBinaryOperator::bind(BinaryOp::Add, TypeSymbol::String, TypeSymbol::String);
    assert_eq!(
        concat.map(|op| (op.kind, op.result_type)),
        Some((BoundBinaryOperatorKind::Concatenation, TypeSymbol::String))
    );

    let eq = BoundBinaryOperator::bind(BinaryOp::Eq, TypeSymbol::Bool, TypeSymbol::Bool);
    assert_eq!(eq.map(|op| op.result_type), Some(TypeSymbol::Bool));

    assert_eq!(
        BoundBinaryOperator::bind(BinaryOp::Add, TypeSymbol::Int, TypeSymbol::Bool),
        None
    );
    assert_eq!(
        BoundBinaryOperator::bind(BinaryOp::Lt, TypeSymbol::String, TypeSymbol::String),
        None
    );
}

#[test]
fn unary_operators_resolve_by_operand_type() {
    let not = BoundUnaryOperator::bind(UnaryOp::Not, TypeSymbol::Bool);
    assert_eq!(not.map(|op| op.kind), Some(BoundUnaryOperatorKind::LogicalNegation));
    assert_eq!(BoundUnaryOperator::bind(UnaryOp::Not, TypeSymbol::Int), None);
    assert_eq!(
        BoundUnaryOperator::bind(UnaryOp::BitNot, TypeSymbol::Int).map(|op| op.kind),
        Some(BoundUnaryOperatorKind::OnesComplement)
    );
}

#[test]
fn expression_types() {
    let a = int_var("a");
    let assign = BoundExpr::Assignment {
        variable: a.clone(),
        value: Box::new(BoundExpr::literal(3)),
    };
    assert_eq!(assign.ty(), TypeSymbol::Int);

    let compare = BoundExpr::Binary {
        left: Box::new(BoundExpr::Variable(a)),
        op: BoundBinaryOperator::INT_LESS_OR_EQUALS,
        right: Box::new(BoundExpr::literal(10)),
    };
    assert_eq!(compare.ty(), TypeSymbol::Bool);

    let call = BoundExpr::Call {
        function: builtins::PRINT,
        arguments: vec![BoundExpr::literal("hi")],
    };
    assert_eq!(call.ty(), TypeSymbol::Void);
    assert_eq!(BoundExpr::Error.ty(), TypeSymbol::Error);
}

#[test]
fn prints_lowered_shape() {
    let i = int_var("i");
    let block = BoundBlock::new(vec![
        BoundStatement::VariableDeclaration {
            variable: i.clone(),
            initializer: BoundExpr::literal(0),
        },
        BoundStatement::Label(BoundLabel::new(1)),
        BoundStatement::ConditionalGoto {
            label: BoundLabel::new(2),
            condition: BoundExpr::Binary {
                left: Box::new(BoundExpr::Variable(i.clone())),
                op: BoundBinaryOperator::INT_LESS_OR_EQUALS,
                right: Box::new(BoundExpr::literal(3)),
            },
            jump_if_true: false,
        },
        BoundStatement::Expression(BoundExpr::Call {
            function: builtins::PRINT,
            arguments: vec![BoundExpr::literal("say \"hi\"")],
        }),
        BoundStatement::AssignResult(TypeSymbol::Void),
        BoundStatement::Goto(BoundLabel::new(1)),
        BoundStatement::Label(BoundLabel::new(2)),
    ]);

    let expected = "\
{
    var i = 0
Label1:
    goto Label2 unless (i <= 3)
    print(\"say \\\"hi\\\"\")
    <result> = void
    goto Label1
Label2:
}
";
    assert_eq!(block.to_string(), expected);
}

#[test]
fn prints_structured_statements() {
    let x = VariableSymbol::new("x", true, TypeSymbol::Bool);
    let statement = BoundStatement::If {
        condition: BoundExpr::Variable(x.clone()),
        then_branch: Box::new(BoundStatement::Expression(BoundExpr::literal(1))),
        else_branch: Some(Box::new(BoundStatement::Block(BoundBlock::new(vec![
            BoundStatement::Expression(BoundExpr::Conversion {
                ty: TypeSymbol::String,
                expression: Box::new(BoundExpr::Variable(x)),
            }),
        ])))),
    };

    let expected = "\
if x
    1
else
{
    string(x)
}
";
    assert_eq!(statement.to_string(), expected);
}
